use tracing::{info, warn};

/// Environment variable holding the initial capacity of the document map.
pub const INITIAL_CAPACITY_VAR: &str = "DOCSTORE_INITIAL_CAPACITY";
const DEFAULT_INITIAL_CAPACITY: usize = 0;

/// Settings for building an in-memory document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of documents the map can hold before reallocating.
    pub initial_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    /// for unset or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let initial_capacity = match lookup(INITIAL_CAPACITY_VAR) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(capacity) => {
                    info!(
                        "Using initial capacity {} from environment variable {}.",
                        capacity, INITIAL_CAPACITY_VAR
                    );
                    capacity
                }
                Err(_) => {
                    warn!(
                        "Invalid {} value '{}'. Using default initial capacity {}.",
                        INITIAL_CAPACITY_VAR, raw, DEFAULT_INITIAL_CAPACITY
                    );
                    DEFAULT_INITIAL_CAPACITY
                }
            },
            None => DEFAULT_INITIAL_CAPACITY,
        };

        Self { initial_capacity }
    }
}
