// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging, record fixtures, a counting fake lookup, and repository setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `macro_tracker`

use chrono::{DateTime, TimeZone, Utc};
use macro_tracker::{
    cache::{CacheConfig, InMemorySearchCache},
    database::InMemoryFoodStore,
    errors::{AppError, AppResult},
    external::NutritionLookup,
    models::{DayCalendar, LoggedFoodEntry, MealType, NutritionQueryResult},
    services::NutritionRepository,
};
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// A lookup record with the nutrients most tests care about
pub fn food(name: &str, calories: f64, protein_g: f64, fat_total_g: f64) -> NutritionQueryResult {
    NutritionQueryResult {
        name: Some(name.to_owned()),
        calories: Some(calories),
        serving_size_g: Some(100.0),
        fat_total_g: Some(fat_total_g),
        protein_g: Some(protein_g),
        carbohydrates_total_g: Some(0.0),
        sodium_mg: Some(50),
        ..Default::default()
    }
}

/// Chicken breast as the remote service reports it
pub fn chicken_breast() -> NutritionQueryResult {
    NutritionQueryResult {
        name: Some("chicken breast".to_owned()),
        calories: Some(412.5),
        serving_size_g: Some(250.0),
        fat_total_g: Some(8.9),
        fat_saturated_g: Some(2.5),
        protein_g: Some(77.8),
        sodium_mg: Some(180),
        potassium_mg: Some(563),
        cholesterol_mg: Some(213),
        carbohydrates_total_g: Some(0.0),
        fiber_g: Some(0.0),
        sugar_g: Some(0.0),
    }
}

/// A saved entry at a given instant
pub fn entry_at(
    recorded: DateTime<Utc>,
    meal_type: MealType,
    calories: f64,
    protein_g: f64,
    fat_total_g: f64,
) -> LoggedFoodEntry {
    LoggedFoodEntry::from_query_result(
        &food("test food", calories, protein_g, fat_total_g),
        Some(recorded),
        meal_type,
    )
}

/// Noon UTC on a calendar date
pub fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Fake lookup that returns fixed records and counts calls
#[derive(Default)]
pub struct CountingLookup {
    results: Vec<NutritionQueryResult>,
    failure: Option<String>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl CountingLookup {
    /// Lookup answering every query with `results`
    pub fn returning(results: Vec<NutritionQueryResult>) -> Arc<Self> {
        Arc::new(Self {
            results,
            ..Self::default()
        })
    }

    /// Lookup failing every query with an unavailable-service error
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(message.to_owned()),
            ..Self::default()
        })
    }

    /// Number of fetches so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Queries received, in order
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl NutritionLookup for CountingLookup {
    async fn fetch(&self, query: &str) -> AppResult<Vec<NutritionQueryResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_owned());
        }
        match &self.failure {
            Some(message) => Err(AppError::external_unavailable("Nutrition API", message.clone())),
            None => Ok(self.results.clone()),
        }
    }
}

/// Repository wired over in-memory collaborators
pub struct TestRepository {
    pub repository: NutritionRepository,
    pub lookup: Arc<CountingLookup>,
    pub cache: Arc<InMemorySearchCache>,
    pub store: InMemoryFoodStore,
}

/// Build a repository over the given lookup, an empty cache and an empty store
pub fn create_test_repository(lookup: Arc<CountingLookup>) -> TestRepository {
    init_test_logging();
    let cache = Arc::new(InMemorySearchCache::new(CacheConfig::default()));
    let store = InMemoryFoodStore::new();
    let repository = NutritionRepository::new(
        lookup.clone(),
        cache.clone(),
        Arc::new(store.clone()),
        DayCalendar::utc(),
    );
    TestRepository {
        repository,
        lookup,
        cache,
        store,
    }
}
