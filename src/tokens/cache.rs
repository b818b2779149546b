//! Expiring LRU cache shared by the holder aggregator and metadata fetcher.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use moka::policy::EvictionPolicy;
use tracing::debug;

use crate::models::{TokenHolderSet, TokenMetadata};

/// Cache key, rendered as `<kind>_<mintAddress>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Holders(String),
    Metadata(String),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Holders(mint) => write!(f, "holders_{}", mint),
            CacheKey::Metadata(mint) => write!(f, "metadata_{}", mint),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CachedValue {
    Holders(Arc<TokenHolderSet>),
    Metadata(Arc<TokenMetadata>),
}

/// Bounded, time-expiring store. Entries expire a fixed time after insertion
/// regardless of reads; when full, the least recently used entry goes first.
#[derive(Clone)]
pub struct TokenCache {
    inner: Cache<String, CachedValue>,
}

impl TokenCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self { inner }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let hit = self.inner.get(&key.to_string()).await;
        debug!(
            "[Cache {}] {}",
            if hit.is_some() { "Hit" } else { "Miss" },
            key
        );
        hit
    }

    pub async fn set(&self, key: CacheKey, value: CachedValue) {
        self.inner.insert(key.to_string(), value).await;
    }

    pub async fn get_holders(&self, mint: &str) -> Option<Arc<TokenHolderSet>> {
        match self.get(&CacheKey::Holders(mint.to_string())).await {
            Some(CachedValue::Holders(holders)) => Some(holders),
            _ => None,
        }
    }

    pub async fn set_holders(&self, mint: &str, holders: Arc<TokenHolderSet>) {
        self.set(CacheKey::Holders(mint.to_string()), CachedValue::Holders(holders))
            .await;
    }

    pub async fn get_metadata(&self, mint: &str) -> Option<Arc<TokenMetadata>> {
        match self.get(&CacheKey::Metadata(mint.to_string())).await {
            Some(CachedValue::Metadata(metadata)) => Some(metadata),
            _ => None,
        }
    }

    pub async fn set_metadata(&self, mint: &str, metadata: Arc<TokenMetadata>) {
        self.set(CacheKey::Metadata(mint.to_string()), CachedValue::Metadata(metadata))
            .await;
    }
}

#[cfg(test)]
impl TokenCache {
    /// Applies pending evictions; `entry_count` is approximate until this runs.
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}
