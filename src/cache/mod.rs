// ABOUTME: Search result cache abstraction keyed by normalized query text
// ABOUTME: Trait seam for the repository plus the query normalization used to build keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory cache implementation
pub mod memory;

pub use memory::InMemorySearchCache;

use crate::constants::cache::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL_SECS, FILLER_WORDS, QUANTITY_PATTERN,
};
use crate::models::NutritionQueryResult;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

static QUANTITY_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(QUANTITY_PATTERN).ok());

/// Cache of nutrition lookup results
///
/// Implementations normalize the query with [`normalize_query`] before using
/// it as a key, so "250 grams of Chicken" and "grams chicken" share an entry.
/// A cache never fails: a miss is the worst outcome of any operation.
///
/// # Examples
///
/// ```rust,no_run
/// use macro_tracker::cache::{CacheConfig, InMemorySearchCache, SearchCache};
/// use macro_tracker::models::NutritionQueryResult;
/// # async fn example() {
///
/// let cache = InMemorySearchCache::new(CacheConfig::default());
/// let apple = NutritionQueryResult {
///     name: Some("apple".to_owned()),
///     calories: Some(52.0),
///     ..Default::default()
/// };
///
/// cache.put("1 apple", vec![apple]).await;
/// assert!(cache.get("an apple").await.is_some());
/// # }
/// ```
#[async_trait::async_trait]
pub trait SearchCache: Send + Sync {
    /// Cached results for the query, `None` when absent or expired
    async fn get(&self, query: &str) -> Option<Vec<NutritionQueryResult>>;

    /// Store results for the query, evicting the least recently used entry when full
    async fn put(&self, query: &str, results: Vec<NutritionQueryResult>);

    /// Drop every entry
    async fn clear(&self);

    /// Number of entries currently held, including ones not yet found stale
    async fn len(&self) -> usize;

    /// Whether the cache holds no entries
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Search cache configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long an entry stays valid after it is written
    pub ttl: Duration,
    /// Maximum number of entries; zero falls back to the default
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

/// Canonical cache key for a free-text query
///
/// Lowercases and trims the query, strips quantities (digit runs and the
/// whitespace after them), drops filler words and joins the remaining words
/// with single spaces. Applying it twice gives the same key as applying it once.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    let lowered = query.trim().to_lowercase();
    let without_quantities = QUANTITY_REGEX
        .as_ref()
        .map_or_else(|| lowered.clone(), |re| re.replace_all(&lowered, "").into_owned());

    without_quantities
        .split_whitespace()
        .filter(|word| !FILLER_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}
