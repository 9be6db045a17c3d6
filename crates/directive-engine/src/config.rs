//! Engine configuration.

use std::time::Duration;

/// Configuration for the directive engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of parsed contents kept in the cache.
    pub cache_capacity: usize,
    /// How long a cached parse stays fresh.
    pub cache_ttl: Duration,
    /// Name of the active backend API, matched against `@if-api`.
    pub active_api: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 500,
            cache_ttl: Duration::from_secs(300),
            active_api: None,
        }
    }
}

impl EngineConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Sets the cache time-to-live.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Sets the active API.
    pub fn with_active_api(mut self, api: impl Into<String>) -> Self {
        self.active_api = Some(api.into());
        self
    }
}
