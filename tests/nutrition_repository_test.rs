// ABOUTME: Integration tests for the nutrition repository
// ABOUTME: Covers query validation, caching, record sanitization, saving, and deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use common::{chicken_breast, create_test_repository, food, noon, CountingLookup};
use macro_tracker::cache::{InMemorySearchCache, SearchCache};
use macro_tracker::database::{Database, FoodStore, InMemoryFoodStore};
use macro_tracker::errors::{AppError, AppResult, ErrorCode, SearchError, ValidationError};
use macro_tracker::models::{DayCalendar, LoggedFoodEntry, MealType, NutritionQueryResult};
use macro_tracker::services::NutritionRepository;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_search_rejects_short_query_without_lookup() -> Result<()> {
    let setup = create_test_repository(CountingLookup::returning(vec![chicken_breast()]));

    let error = setup
        .repository
        .search_nutrition(" a ")
        .await
        .expect_err("single character query should be rejected");

    match error {
        SearchError::Validation(ValidationError::SearchQueryTooShort(query)) => {
            assert_eq!(query, "a");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(setup.lookup.calls(), 0);
    assert!(setup.cache.is_empty().await);

    Ok(())
}

#[tokio::test]
async fn test_search_rejects_empty_and_long_queries() -> Result<()> {
    let setup = create_test_repository(CountingLookup::returning(Vec::new()));

    let empty = setup.repository.search_nutrition("   ").await;
    assert!(matches!(
        empty,
        Err(SearchError::Validation(ValidationError::EmptySearchQuery))
    ));

    let long = "x".repeat(201);
    let too_long = setup.repository.search_nutrition(&long).await;
    assert!(matches!(
        too_long,
        Err(SearchError::Validation(ValidationError::SearchQueryTooLong(_)))
    ));

    assert_eq!(setup.lookup.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_search_sends_sanitized_query() -> Result<()> {
    let setup = create_test_repository(CountingLookup::returning(vec![chicken_breast()]));

    let results = setup
        .repository
        .search_nutrition("  250 grams   of chicken\tbreast ")
        .await?;

    assert_eq!(results, vec![chicken_breast()]);
    assert_eq!(
        setup.lookup.queries(),
        vec!["250 grams of chicken breast".to_owned()]
    );
    Ok(())
}

#[tokio::test]
async fn test_search_served_from_cache_for_equivalent_query() -> Result<()> {
    let setup = create_test_repository(CountingLookup::returning(vec![chicken_breast()]));

    let first = setup
        .repository
        .search_nutrition("250 grams of chicken breast")
        .await?;
    let second = setup
        .repository
        .search_nutrition("100 grams Chicken Breast")
        .await?;

    assert_eq!(first, second);
    assert_eq!(setup.lookup.calls(), 1, "second search should hit the cache");

    setup.repository.clear_cache().await;
    setup
        .repository
        .search_nutrition("chicken breast")
        .await?;
    assert_eq!(setup.lookup.calls(), 2);

    Ok(())
}

#[tokio::test]
async fn test_search_sanitizes_out_of_range_records() -> Result<()> {
    let suspicious = NutritionQueryResult {
        name: Some("  mystery   shake ".to_owned()),
        calories: Some(25_000.0),
        protein_g: Some(-4.0),
        sodium_mg: Some(90_000),
        ..Default::default()
    };
    let setup = create_test_repository(CountingLookup::returning(vec![
        suspicious,
        chicken_breast(),
    ]));

    let results = setup.repository.search_nutrition("mystery shake").await?;

    assert_eq!(results.len(), 2);
    let shake = &results[0];
    assert_eq!(shake.name.as_deref(), Some("mystery shake"));
    assert_eq!(shake.calories, Some(10_000.0));
    assert_eq!(shake.protein_g, Some(0.0));
    assert_eq!(shake.sodium_mg, Some(50_000));
    assert_eq!(results[1], chicken_breast(), "valid records pass through unchanged");

    Ok(())
}

#[tokio::test]
async fn test_search_remote_failure_is_not_cached() -> Result<()> {
    let setup = create_test_repository(CountingLookup::failing("connection refused"));

    let error = setup
        .repository
        .search_nutrition("chicken breast")
        .await
        .expect_err("remote failure should surface");

    assert!(error.is_retryable());
    let app_error: AppError = error.into();
    assert_eq!(app_error.code, ErrorCode::ExternalServiceUnavailable);
    assert!(setup.cache.is_empty().await);

    Ok(())
}

#[tokio::test]
async fn test_save_and_fetch_by_day() -> Result<()> {
    let setup = create_test_repository(CountingLookup::returning(Vec::new()));
    let lunch_time = noon(2026, 3, 10);

    let saved = setup
        .repository
        .save_food_items(
            &[chicken_breast(), food("rice", 130.0, 2.7, 0.3)],
            lunch_time,
            MealType::Lunch,
        )
        .await;
    assert!(saved);

    let today = setup.repository.get_food_items(lunch_time).await;
    assert_eq!(today.len(), 2);
    assert!(today.iter().all(|e| e.meal_type == MealType::Lunch));
    assert!(today.iter().all(|e| e.recorded_date == lunch_time));
    assert!(today.iter().any(|e| e.name == "chicken breast"));

    let tomorrow = setup
        .repository
        .get_food_items(lunch_time + Duration::days(1))
        .await;
    assert!(tomorrow.is_empty());

    assert_eq!(setup.repository.get_all_food_items().await.len(), 2);
    assert_eq!(setup.store.staged_len().await, 0, "save commits staged inserts");

    Ok(())
}

#[tokio::test]
async fn test_find_and_delete_food_item() -> Result<()> {
    let setup = create_test_repository(CountingLookup::returning(Vec::new()));
    let saved = setup
        .repository
        .try_save_food_items(&[chicken_breast()], noon(2026, 3, 10), MealType::Dinner)
        .await?;
    let entry = &saved[0];

    let found = setup.repository.find_food_item(entry.id).await?;
    assert_eq!(&found, entry);

    setup.repository.delete_food_item(entry).await;
    assert!(setup.repository.get_all_food_items().await.is_empty());

    // Deleting again is a no-op
    setup.repository.delete_food_item(entry).await;

    let missing = setup.repository.find_food_item(entry.id).await;
    assert_eq!(
        missing.map_err(|e| e.code).err(),
        Some(ErrorCode::ResourceNotFound)
    );

    Ok(())
}

#[tokio::test]
async fn test_delete_all_for_meal_type_and_date() -> Result<()> {
    let setup = create_test_repository(CountingLookup::returning(Vec::new()));
    let day = noon(2026, 3, 10);
    let repository = &setup.repository;

    let breakfast = [food("egg", 155.0, 12.6, 10.6), food("toast", 80.0, 3.0, 1.0)];
    repository
        .try_save_food_items(&breakfast, day, MealType::Breakfast)
        .await?;
    repository
        .try_save_food_items(&[chicken_breast()], day, MealType::Lunch)
        .await?;
    let next_day = day + Duration::days(1);
    repository
        .try_save_food_items(&[food("oats", 150.0, 5.0, 3.0)], next_day, MealType::Breakfast)
        .await?;

    let removed = repository
        .delete_all_foods_for_meal_type_and_date(MealType::Breakfast, day)
        .await;
    assert_eq!(removed, 2);

    let remaining = repository.get_all_food_items().await;
    assert_eq!(remaining.len(), 2);
    assert!(remaining
        .iter()
        .any(|e| e.meal_type == MealType::Lunch && e.name == "chicken breast"));
    assert!(remaining
        .iter()
        .any(|e| e.meal_type == MealType::Breakfast && e.name == "oats"));

    assert_eq!(
        repository
            .delete_all_foods_for_meal_type_and_date(MealType::Breakfast, day)
            .await,
        0
    );
    Ok(())
}

#[tokio::test]
async fn test_daily_summary_groups_by_meal() -> Result<()> {
    let setup = create_test_repository(CountingLookup::returning(Vec::new()));
    let day = noon(2026, 3, 10);
    setup
        .repository
        .try_save_food_items(&[food("egg", 155.0, 12.6, 10.6)], day, MealType::Breakfast)
        .await?;
    let snacks = [food("apple", 52.0, 0.3, 0.2), food("banana", 89.0, 1.1, 0.3)];
    setup
        .repository
        .try_save_food_items(&snacks, day, MealType::Snack)
        .await?;

    let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    let summary = setup.repository.daily_summary(date).await;

    assert_eq!(summary.entry_count(), 3);
    assert_eq!(summary.meals.len(), 4);
    let snack = summary.meal(MealType::Snack).unwrap();
    assert_eq!(snack.entries.len(), 2);
    assert!((snack.totals.calories - 141.0).abs() < f64::EPSILON);
    assert!(summary.meal(MealType::Dinner).unwrap().entries.is_empty());
    assert!((summary.totals.calories - 296.0).abs() < f64::EPSILON);

    Ok(())
}

/// Store whose writes always fail
struct BrokenStore;

#[async_trait::async_trait]
impl FoodStore for BrokenStore {
    async fn insert(&self, _entry: LoggedFoodEntry) -> AppResult<()> {
        Err(AppError::database("disk full"))
    }

    async fn fetch_all(&self) -> AppResult<Vec<LoggedFoodEntry>> {
        Err(AppError::database("disk unreadable"))
    }

    async fn delete(&self, _entry: &LoggedFoodEntry) -> AppResult<()> {
        Err(AppError::database("disk full"))
    }

    async fn delete_where(
        &self,
        _meal_type: MealType,
        _range: Range<DateTime<Utc>>,
    ) -> AppResult<u64> {
        Err(AppError::database("disk full"))
    }

    async fn commit(&self) -> AppResult<()> {
        Err(AppError::database("disk full"))
    }

    async fn rollback(&self) {}
}

#[tokio::test]
async fn test_store_failures_are_reported_not_raised() -> Result<()> {
    common::init_test_logging();
    let repository = NutritionRepository::new(
        CountingLookup::returning(Vec::new()),
        Arc::new(InMemorySearchCache::default()),
        Arc::new(BrokenStore),
        DayCalendar::utc(),
    );
    let day = noon(2026, 3, 10);

    assert!(!repository.save_food_items(&[chicken_breast()], day, MealType::Lunch).await);
    assert!(repository
        .try_save_food_items(&[chicken_breast()], day, MealType::Lunch)
        .await
        .is_err());
    assert!(repository.get_all_food_items().await.is_empty());
    assert!(repository.get_food_items(day).await.is_empty());
    assert_eq!(
        repository
            .delete_all_foods_for_meal_type_and_date(MealType::Lunch, day)
            .await,
        0
    );
    assert!(repository.daily_summary(day.date_naive()).await.is_empty());

    Ok(())
}

/// Store whose first commit fails, delegating everything else
struct FailFirstCommitStore {
    inner: InMemoryFoodStore,
    failed_once: AtomicBool,
}

#[async_trait::async_trait]
impl FoodStore for FailFirstCommitStore {
    async fn insert(&self, entry: LoggedFoodEntry) -> AppResult<()> {
        self.inner.insert(entry).await
    }

    async fn fetch_all(&self) -> AppResult<Vec<LoggedFoodEntry>> {
        self.inner.fetch_all().await
    }

    async fn delete(&self, entry: &LoggedFoodEntry) -> AppResult<()> {
        self.inner.delete(entry).await
    }

    async fn delete_where(
        &self,
        meal_type: MealType,
        range: Range<DateTime<Utc>>,
    ) -> AppResult<u64> {
        self.inner.delete_where(meal_type, range).await
    }

    async fn commit(&self) -> AppResult<()> {
        if self.failed_once.swap(true, Ordering::SeqCst) {
            self.inner.commit().await
        } else {
            Err(AppError::database("database is locked"))
        }
    }

    async fn rollback(&self) {
        self.inner.rollback().await;
    }
}

#[tokio::test]
async fn test_failed_save_is_never_persisted_later() -> Result<()> {
    common::init_test_logging();
    let inner = InMemoryFoodStore::new();
    let repository = NutritionRepository::new(
        CountingLookup::returning(Vec::new()),
        Arc::new(InMemorySearchCache::default()),
        Arc::new(FailFirstCommitStore {
            inner: inner.clone(),
            failed_once: AtomicBool::new(false),
        }),
        DayCalendar::utc(),
    );
    let day = noon(2026, 3, 10);

    let rice = [food("rice", 130.0, 2.7, 0.3)];
    let apple = [food("apple", 52.0, 0.3, 0.2)];

    assert!(!repository.save_food_items(&rice, day, MealType::Lunch).await);
    assert_eq!(inner.staged_len().await, 0);
    assert!(repository.save_food_items(&apple, day, MealType::Snack).await);

    let names: Vec<_> = repository
        .get_all_food_items()
        .await
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, ["apple"]);
    Ok(())
}

#[tokio::test]
async fn test_non_finite_nutrients_are_clamped_before_sqlite_save() -> Result<()> {
    common::init_test_logging();
    let store = Database::from_url("sqlite::memory:").await?;
    let repository = NutritionRepository::new(
        CountingLookup::returning(Vec::new()),
        Arc::new(InMemorySearchCache::default()),
        Arc::new(store),
        DayCalendar::utc(),
    );
    let day = noon(2026, 3, 10);
    let broken = NutritionQueryResult {
        name: Some("mystery stew".to_owned()),
        calories: Some(f64::NAN),
        fat_saturated_g: Some(f64::INFINITY),
        ..NutritionQueryResult::default()
    };

    let saved = repository
        .try_save_food_items(&[broken], day, MealType::Dinner)
        .await?;
    assert!(saved[0].calories.abs() < f64::EPSILON);
    assert!(saved[0].fat_saturated_g.is_finite());

    let rice = [food("rice", 130.0, 2.7, 0.3)];
    assert!(repository.save_food_items(&rice, day, MealType::Lunch).await);
    assert_eq!(repository.get_all_food_items().await.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_saves_and_deletes_publish_changes() -> Result<()> {
    let setup = create_test_repository(CountingLookup::returning(Vec::new()));
    let repository = setup.repository;
    let mut changes = repository.subscribe_changes();
    let day = noon(2026, 3, 10);

    let saved = repository
        .try_save_food_items(&[chicken_breast()], day, MealType::Lunch)
        .await?;
    assert!(changes.has_changed()?);
    changes.borrow_and_update();

    repository.delete_food_item(&saved[0]).await;
    assert!(changes.has_changed()?);
    changes.borrow_and_update();

    assert_eq!(
        repository
            .delete_all_foods_for_meal_type_and_date(MealType::Lunch, day)
            .await,
        0
    );
    assert!(!changes.has_changed()?, "removing nothing is not a change");
    Ok(())
}
