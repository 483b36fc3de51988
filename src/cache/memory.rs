// ABOUTME: In-memory search cache with LRU eviction and TTL expiry
// ABOUTME: Stale entries are evicted lazily on read using tokio's clock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{normalize_query, CacheConfig, SearchCache};
use crate::constants::cache::DEFAULT_CACHE_MAX_ENTRIES;
use crate::models::NutritionQueryResult;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    results: Vec<NutritionQueryResult>,
    inserted_at: Instant,
}

impl CacheEntry {
    fn new(results: Vec<NutritionQueryResult>) -> Self {
        Self {
            results,
            inserted_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}

/// In-memory search cache with LRU eviction
///
/// `LruCache::get` updates recency and therefore needs the write lock, so
/// every read path takes it. Clones share the same store.
#[derive(Clone)]
pub struct InMemorySearchCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    ttl: Duration,
}

impl InMemorySearchCache {
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CACHE_MAX_ENTRIES) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create an empty cache
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        // LruCache requires NonZeroUsize for capacity
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CAPACITY);

        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            ttl: config.ttl,
        }
    }

    /// Maximum number of entries held before eviction
    pub async fn capacity(&self) -> usize {
        self.store.read().await.cap().get()
    }
}

impl Default for InMemorySearchCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[async_trait::async_trait]
impl SearchCache for InMemorySearchCache {
    async fn get(&self, query: &str) -> Option<Vec<NutritionQueryResult>> {
        let key = normalize_query(query);
        let mut store = self.store.write().await;

        let Some(entry) = store.get(&key) else {
            drop(store);
            debug!(key = %key, "Search cache miss");
            return None;
        };

        if entry.is_expired(self.ttl) {
            store.pop(&key);
            drop(store);
            debug!(key = %key, "Search cache entry expired");
            return None;
        }

        let results = entry.results.clone();
        drop(store);
        debug!(key = %key, count = results.len(), "Search cache hit");
        Some(results)
    }

    async fn put(&self, query: &str, results: Vec<NutritionQueryResult>) {
        let key = normalize_query(query);
        let evicted = self.store.write().await.push(key.clone(), CacheEntry::new(results));

        // push returns the displaced pair, which is the old value when the key was already present
        if let Some((evicted_key, _)) = evicted {
            if evicted_key != key {
                debug!(key = %evicted_key, "Evicted least recently used search cache entry");
            }
        }
    }

    async fn clear(&self) {
        self.store.write().await.clear();
        debug!("Search cache cleared");
    }

    async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}
