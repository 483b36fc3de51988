// ABOUTME: Nutrition repository coordinating query validation, caching, remote lookup, and storage
// ABOUTME: Single entry point for searching foods and managing saved food entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Repository
//!
//! A search runs validate → sanitize → cache lookup → remote fetch →
//! record validation → cache write. Out-of-range records coming back from
//! the remote service are sanitized rather than dropped, so the caller always
//! sees every food the service recognised.
//!
//! Local operations never raise: read failures yield an empty list and delete
//! failures are logged. [`NutritionRepository::try_save_food_items`] is the one
//! propagating variant, for callers that must not hide data loss.
//!
//! Saves are serialized so each call stages and commits only its own entries,
//! and every successful save or delete bumps a revision on a watch channel
//! that progress views follow.

use crate::cache::SearchCache;
use crate::database::FoodStore;
use crate::errors::{AppError, AppResult, SearchError};
use crate::external::NutritionLookup;
use crate::intelligence::DailySummary;
use crate::models::{DayCalendar, LoggedFoodEntry, MealType, NutritionQueryResult};
use crate::services::progress_tracker::ProgressDataSource;
use crate::validation::{sanitize, sanitize_search_query, validate, validate_search_query};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Searches foods and manages saved entries
#[derive(Clone)]
pub struct NutritionRepository {
    lookup: Arc<dyn NutritionLookup>,
    cache: Arc<dyn SearchCache>,
    store: Arc<dyn FoodStore>,
    calendar: DayCalendar,
    save_lock: Arc<Mutex<()>>,
    revision: Arc<watch::Sender<u64>>,
}

/// Clamp a lookup record into range, logging what was out of range
fn sanitize_with_warning(record: &NutritionQueryResult, context: &str) -> NutritionQueryResult {
    let violations = validate(record);
    if let Some(first) = violations.first() {
        warn!(
            name = record.name.as_deref().unwrap_or_default(),
            violations = violations.len(),
            first = %first,
            "Sanitizing out-of-range nutrition record {context}"
        );
    }
    sanitize(record)
}

impl NutritionRepository {
    /// Create a repository over its collaborators
    #[must_use]
    pub fn new(
        lookup: Arc<dyn NutritionLookup>,
        cache: Arc<dyn SearchCache>,
        store: Arc<dyn FoodStore>,
        calendar: DayCalendar,
    ) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            lookup,
            cache,
            store,
            calendar,
            save_lock: Arc::new(Mutex::new(())),
            revision: Arc::new(revision),
        }
    }

    /// Calendar used to decide which day an entry belongs to
    #[must_use]
    pub const fn calendar(&self) -> DayCalendar {
        self.calendar
    }

    /// Receiver notified after every successful save or delete
    ///
    /// The value is a revision counter; only the change matters.
    #[must_use]
    pub fn subscribe_changes(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn notify_changed(&self) {
        self.revision.send_modify(|revision| *revision = revision.wrapping_add(1));
    }

    /// Look up nutrients for a free-text meal description
    ///
    /// # Errors
    ///
    /// - [`SearchError::Validation`] with the first violated rule when the query
    ///   is empty, too short or too long; neither the cache nor the remote
    ///   service is consulted
    /// - [`SearchError::Remote`] when the remote lookup fails
    pub async fn search_nutrition(
        &self,
        query: &str,
    ) -> Result<Vec<NutritionQueryResult>, SearchError> {
        if let Some(violation) = validate_search_query(query).into_iter().next() {
            debug!(%violation, "Rejected search query");
            return Err(SearchError::Validation(violation));
        }

        let sanitized = sanitize_search_query(query);

        if let Some(cached) = self.cache.get(&sanitized).await {
            return Ok(cached);
        }

        let fetched = self.lookup.fetch(&sanitized).await?;
        let results: Vec<NutritionQueryResult> = fetched
            .into_iter()
            .map(|record| {
                if validate(&record).is_empty() {
                    record
                } else {
                    sanitize_with_warning(&record, "from lookup")
                }
            })
            .collect();

        self.cache.put(&sanitized, results.clone()).await;
        Ok(results)
    }

    /// Save lookup results as entries for a meal, propagating store failures
    ///
    /// Items are sanitized first, so out-of-range or non-finite nutrients are
    /// clamped before they reach the store. On failure nothing from this call
    /// is persisted, now or later.
    ///
    /// # Errors
    ///
    /// Returns an error if the entries cannot be staged or committed
    pub async fn try_save_food_items(
        &self,
        items: &[NutritionQueryResult],
        date: DateTime<Utc>,
        meal_type: MealType,
    ) -> AppResult<Vec<LoggedFoodEntry>> {
        let entries: Vec<LoggedFoodEntry> = items
            .iter()
            .map(|item| sanitize_with_warning(item, "before save"))
            .map(|item| LoggedFoodEntry::from_query_result(&item, Some(date), meal_type))
            .collect();

        let guard = self.save_lock.lock().await;
        if let Err(e) = self.stage_and_commit(&entries).await {
            self.store.rollback().await;
            return Err(e);
        }
        drop(guard);

        info!(
            count = entries.len(),
            meal_type = meal_type.as_str(),
            "Saved food entries"
        );
        self.notify_changed();
        Ok(entries)
    }

    async fn stage_and_commit(&self, entries: &[LoggedFoodEntry]) -> AppResult<()> {
        for entry in entries {
            self.store.insert(entry.clone()).await?;
        }
        self.store.commit().await
    }

    /// Save lookup results as entries for a meal
    ///
    /// Returns `false` when the store fails; the failure is logged, not raised.
    pub async fn save_food_items(
        &self,
        items: &[NutritionQueryResult],
        date: DateTime<Utc>,
        meal_type: MealType,
    ) -> bool {
        match self.try_save_food_items(items, date, meal_type).await {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, count = items.len(), "Failed to save food entries");
                false
            }
        }
    }

    /// Every saved entry, most recent first
    pub async fn get_all_food_items(&self) -> Vec<LoggedFoodEntry> {
        self.store.fetch_all().await.unwrap_or_else(|e| {
            error!(error = %e, "Failed to load food entries");
            Vec::new()
        })
    }

    /// Entries recorded on the same calendar day as `date`, most recent first
    pub async fn get_food_items(&self, date: DateTime<Utc>) -> Vec<LoggedFoodEntry> {
        let range = self.calendar.day_range(self.calendar.day_of(date));
        self.store.fetch_range(range).await.unwrap_or_else(|e| {
            error!(error = %e, %date, "Failed to load food entries for day");
            Vec::new()
        })
    }

    /// Saved entry with the given id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no saved entry has the id
    pub async fn find_food_item(&self, id: Uuid) -> AppResult<LoggedFoodEntry> {
        self.store
            .fetch_all()
            .await?
            .into_iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| AppError::not_found(format!("Food entry {id}")))
    }

    /// Delete one entry; deleting an entry that is already gone does nothing
    pub async fn delete_food_item(&self, entry: &LoggedFoodEntry) {
        match self.store.delete(entry).await {
            Ok(()) => {
                info!(id = %entry.id, "Deleted food entry");
                self.notify_changed();
            }
            Err(e) => error!(error = %e, id = %entry.id, "Failed to delete food entry"),
        }
    }

    /// Delete every entry of the meal recorded on the same calendar day as `date`
    ///
    /// Returns the number of entries removed; 0 when the store fails.
    pub async fn delete_all_foods_for_meal_type_and_date(
        &self,
        meal_type: MealType,
        date: DateTime<Utc>,
    ) -> u64 {
        let day = self.calendar.day_of(date);
        match self
            .store
            .delete_where(meal_type, self.calendar.day_range(day))
            .await
        {
            Ok(count) => {
                info!(count, meal_type = meal_type.as_str(), %day, "Deleted meal entries");
                if count > 0 {
                    self.notify_changed();
                }
                count
            }
            Err(e) => {
                error!(error = %e, meal_type = meal_type.as_str(), %day, "Failed to delete meal entries");
                0
            }
        }
    }

    /// Entries of one calendar day grouped by meal, with totals
    pub async fn daily_summary(&self, date: NaiveDate) -> DailySummary {
        let entries = self
            .store
            .fetch_range(self.calendar.day_range(date))
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, %date, "Failed to load food entries for summary");
                Vec::new()
            });
        DailySummary::build(date, &entries, &self.calendar)
    }

    /// Drop every cached search result
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}

#[async_trait::async_trait]
impl ProgressDataSource for NutritionRepository {
    async fn load_entries(&self) -> AppResult<Vec<LoggedFoodEntry>> {
        self.store.fetch_all().await
    }
}
