// ABOUTME: In-memory food store for tests, offline runs, and the `memory` database URL
// ABOUTME: Keeps staged and committed entries separately to mirror transactional backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::FoodStore;
use crate::errors::AppResult;
use crate::models::{LoggedFoodEntry, MealType};
use chrono::{DateTime, Utc};
use std::mem;
use std::ops::Range;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
struct StoreState {
    committed: Vec<LoggedFoodEntry>,
    staged: Vec<LoggedFoodEntry>,
}

/// Food store held entirely in memory
///
/// Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFoodStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryFoodStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of inserts waiting for a commit
    pub async fn staged_len(&self) -> usize {
        self.state.lock().await.staged.len()
    }
}

fn sort_most_recent_first(entries: &mut [LoggedFoodEntry]) {
    entries.sort_by(|a, b| b.recorded_date.cmp(&a.recorded_date));
}

#[async_trait::async_trait]
impl FoodStore for InMemoryFoodStore {
    async fn insert(&self, entry: LoggedFoodEntry) -> AppResult<()> {
        self.state.lock().await.staged.push(entry);
        Ok(())
    }

    async fn fetch_all(&self) -> AppResult<Vec<LoggedFoodEntry>> {
        let mut entries = self.state.lock().await.committed.clone();
        sort_most_recent_first(&mut entries);
        Ok(entries)
    }

    async fn delete(&self, entry: &LoggedFoodEntry) -> AppResult<()> {
        let mut state = self.state.lock().await;
        state.committed.retain(|e| e.id != entry.id);
        state.staged.retain(|e| e.id != entry.id);
        Ok(())
    }

    async fn delete_where(
        &self,
        meal_type: MealType,
        range: Range<DateTime<Utc>>,
    ) -> AppResult<u64> {
        let matches =
            |e: &LoggedFoodEntry| e.meal_type == meal_type && range.contains(&e.recorded_date);

        let mut state = self.state.lock().await;
        let before = state.committed.len();
        state.committed.retain(|e| !matches(e));
        let removed = before - state.committed.len();
        state.staged.retain(|e| !matches(e));
        drop(state);

        Ok(removed as u64)
    }

    async fn commit(&self) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let staged = mem::take(&mut state.staged);
        let count = staged.len();
        state.committed.extend(staged);
        drop(state);

        debug!(count, "Committed staged food entries");
        Ok(())
    }

    async fn rollback(&self) {
        self.state.lock().await.staged.clear();
    }
}
