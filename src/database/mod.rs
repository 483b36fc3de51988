// ABOUTME: Local persistence of accepted food entries behind the FoodStore trait
// ABOUTME: In-memory and SQLite backends selected at runtime from the database URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Food Store
//!
//! Inserts are staged and become visible (and durable, for `SQLite`) only on
//! [`FoodStore::commit`]. A commit consumes the staged batch whether or not it
//! succeeds, so one unwritable entry never blocks later saves. Deletes apply
//! immediately and are idempotent: deleting an entry that is already gone
//! succeeds.

/// Backend selection from a connection string
pub mod factory;
/// In-memory backend
pub mod memory;
/// `SQLite` backend
pub mod sqlite;

pub use factory::{Database, DatabaseType};
pub use memory::InMemoryFoodStore;
pub use sqlite::SqliteFoodStore;

use crate::errors::AppResult;
use crate::models::{LoggedFoodEntry, MealType};
use chrono::{DateTime, Utc};
use std::ops::Range;

/// Persistence of logged food entries
#[async_trait::async_trait]
pub trait FoodStore: Send + Sync {
    /// Stage an entry; it becomes visible after [`FoodStore::commit`]
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be staged
    async fn insert(&self, entry: LoggedFoodEntry) -> AppResult<()>;

    /// Every committed entry, most recent `recorded_date` first
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn fetch_all(&self) -> AppResult<Vec<LoggedFoodEntry>>;

    /// Committed entries recorded inside the half-open range, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn fetch_range(&self, range: Range<DateTime<Utc>>) -> AppResult<Vec<LoggedFoodEntry>> {
        let mut entries = self.fetch_all().await?;
        entries.retain(|entry| range.contains(&entry.recorded_date));
        Ok(entries)
    }

    /// Remove an entry by id; removing a missing entry is a no-op
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete
    async fn delete(&self, entry: &LoggedFoodEntry) -> AppResult<()>;

    /// Remove every entry of the meal type recorded inside the half-open range
    ///
    /// Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete
    async fn delete_where(
        &self,
        meal_type: MealType,
        range: Range<DateTime<Utc>>,
    ) -> AppResult<u64>;

    /// Make every staged insert durable and visible
    ///
    /// # Errors
    ///
    /// Returns an error if the staged entries cannot be written; none of them
    /// are persisted and the batch is discarded
    async fn commit(&self) -> AppResult<()>;

    /// Discard every staged insert without writing it
    async fn rollback(&self);
}
