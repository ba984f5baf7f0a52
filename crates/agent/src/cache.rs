//! Bounded TTL cache for final replies.
//!
//! Keyed on the lower-cased raw query text with no further
//! normalization, so punctuation and whitespace variants are distinct
//! entries. The cache never exceeds its capacity and never returns an
//! expired entry; eviction order beyond that is the backing
//! implementation's choice.

use std::time::Duration;

use moka::sync::Cache;

/// Sizing for the reply cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached replies. Default: 100.
    pub max_entries: u64,
    /// Time-to-live from insertion. Default: 1 hour.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 100, ttl: Duration::from_secs(3600) }
    }
}

/// In-memory reply cache, safe to share across concurrent requests.
pub struct ReplyCache {
    cache: Cache<String, String>,
}

impl ReplyCache {
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, reply: String) {
        self.cache.insert(key, reply);
    }

    #[cfg(test)]
    pub(crate) fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}
