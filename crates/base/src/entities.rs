use serde::{Deserialize, Serialize};

pub type EntityId = u64;

pub const PRICE_DECIMAL_PLACES: u32 = 2;

pub const TARGET_LOGGER_ENV: &str = "TARGET_LOGGER";
pub const DEFAULT_TARGET_LOGGER: &str = "configurator";

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Item<I, P> {
    pub id: I,
    pub props: P,
}

/// Name of the logger target configured for the current process. Falls back
/// to the default one when the variable is not set.
pub fn target_logger() -> String {
    dotenv::var(TARGET_LOGGER_ENV).unwrap_or_else(|_| String::from(DEFAULT_TARGET_LOGGER))
}
