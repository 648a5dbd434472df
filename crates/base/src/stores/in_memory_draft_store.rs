use crate::stores::draft_store::{DraftKey, DraftStore, DraftValue};
use anyhow::Result;
use std::collections::HashMap;

#[derive(Default, Debug, Clone)]
pub struct InMemoryDraftStore {
    drafts: HashMap<DraftKey, DraftValue>,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

impl DraftStore for InMemoryDraftStore {
    fn read_draft(&self, key: &str) -> Result<Option<DraftValue>> {
        Ok(self.drafts.get(key).cloned())
    }

    fn write_draft(&mut self, key: &str, value: DraftValue) -> Result<()> {
        self.drafts.insert(key.to_string(), value);

        Ok(())
    }

    fn remove_draft(&mut self, key: &str) -> Result<()> {
        self.drafts.remove(key);

        Ok(())
    }
}
