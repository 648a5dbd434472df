use anyhow::{Context, Result};
use base::stores::draft_store::DraftStore;
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

pub const ADDRESS_DRAFT_NAME: &str = "address";
pub const WIZARD_DRAFT_NAME: &str = "wizard";

pub const DEFAULT_DRAFT_TTL_HOURS: i64 = 12;

pub type SessionId = String;

pub fn new_session_id() -> SessionId {
    xid::new().to_string()
}

pub fn draft_key(session_id: &str, draft_name: &str) -> String {
    format!("{}_{}", session_id, draft_name)
}

pub trait DraftRepository<T> {
    fn load_draft(&self) -> Result<Option<T>>;
    fn save_draft(&mut self, draft: &T) -> Result<()>;
    fn clear_draft(&mut self) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
struct DraftEnvelope<T> {
    saved_at: DateTime<Utc>,
    value: T,
}

/// Stores a draft as json under one key. Drafts older than the ttl are
/// treated as absent.
pub struct KeyedDraftRepository<S, T>
where
    S: DraftStore,
{
    store: S,
    key: String,
    ttl: Duration,
    draft: PhantomData<T>,
}

impl<S, T> KeyedDraftRepository<S, T>
where
    S: DraftStore,
{
    pub fn new(store: S, key: String) -> Self {
        Self {
            store,
            key,
            ttl: Duration::hours(DEFAULT_DRAFT_TTL_HOURS),
            draft: PhantomData,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S, T> DraftRepository<T> for KeyedDraftRepository<S, T>
where
    S: DraftStore,
    T: Serialize + DeserializeOwned,
{
    fn load_draft(&self) -> Result<Option<T>> {
        let raw = match self.store.read_draft(&self.key)? {
            None => return Ok(None),
            Some(raw) => raw,
        };

        let envelope: DraftEnvelope<T> = serde_json::from_str(&raw)
            .context(format!("error on parsing a draft {}", self.key))?;

        if envelope.saved_at + self.ttl < Utc::now() {
            log::debug!("a draft {} is expired", self.key);
            return Ok(None);
        }

        Ok(Some(envelope.value))
    }

    fn save_draft(&mut self, draft: &T) -> Result<()> {
        let raw = serde_json::to_string(&DraftEnvelope {
            saved_at: Utc::now(),
            value: draft,
        })
        .context(format!("error on serializing a draft {}", self.key))?;

        self.store.write_draft(&self.key, raw)
    }

    fn clear_draft(&mut self) -> Result<()> {
        self.store.remove_draft(&self.key)
    }
}

/// Keeps nothing between reloads.
#[derive(Default, Debug, Clone, Copy)]
pub struct NoDraftRepository;

impl<T> DraftRepository<T> for NoDraftRepository {
    fn load_draft(&self) -> Result<Option<T>> {
        Ok(None)
    }

    fn save_draft(&mut self, _draft: &T) -> Result<()> {
        Ok(())
    }

    fn clear_draft(&mut self) -> Result<()> {
        Ok(())
    }
}

// An unavailable draft store only disables persistence, the flow goes on.

pub fn load_or_warn<T>(repository: &impl DraftRepository<T>) -> Option<T> {
    match repository.load_draft() {
        Ok(draft) => draft,
        Err(e) => {
            log::warn!("a draft can't be loaded, starting from scratch: {:?}", e);
            None
        }
    }
}

pub fn save_or_warn<T>(repository: &mut impl DraftRepository<T>, draft: &T) {
    if let Err(e) = repository.save_draft(draft) {
        log::warn!("a draft can't be saved, continuing without persistence: {:?}", e);
    }
}

pub fn clear_or_warn<T>(repository: &mut impl DraftRepository<T>) {
    if let Err(e) = repository.clear_draft() {
        log::warn!("a draft can't be cleared: {:?}", e);
    }
}
