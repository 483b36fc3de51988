// ABOUTME: Integration tests for the food stores and the backend factory
// ABOUTME: Runs the same scenarios against the in-memory and SQLite backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use anyhow::Result;
use chrono::Duration;
use common::{chicken_breast, entry_at, noon};
use macro_tracker::database::factory::detect_database_type;
use macro_tracker::database::{Database, DatabaseType, FoodStore, InMemoryFoodStore};
use macro_tracker::errors::ErrorCode;
use macro_tracker::models::{DayCalendar, LoggedFoodEntry, MealType};
use tempfile::TempDir;

async fn create_sqlite_store() -> Result<Database> {
    common::init_test_logging();
    Ok(Database::from_url("sqlite::memory:").await?)
}

async fn check_staged_entries_invisible_until_commit(store: &dyn FoodStore) -> Result<()> {
    let entry = entry_at(noon(2026, 5, 1), MealType::Lunch, 300.0, 20.0, 10.0);

    store.insert(entry.clone()).await?;
    assert!(store.fetch_all().await?.is_empty());

    store.commit().await?;
    assert_eq!(store.fetch_all().await?, vec![entry]);

    // Nothing staged: commit is a no-op
    store.commit().await?;
    assert_eq!(store.fetch_all().await?.len(), 1);
    Ok(())
}

async fn check_fetch_orders_most_recent_first(store: &dyn FoodStore) -> Result<()> {
    let older = entry_at(noon(2026, 5, 1), MealType::Breakfast, 100.0, 5.0, 2.0);
    let newest = entry_at(noon(2026, 5, 3), MealType::Dinner, 700.0, 40.0, 30.0);
    let middle = entry_at(noon(2026, 5, 2), MealType::Snack, 150.0, 1.0, 8.0);

    for entry in [&older, &newest, &middle] {
        store.insert(entry.clone()).await?;
    }
    store.commit().await?;

    let ids: Vec<_> = store.fetch_all().await?.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![newest.id, middle.id, older.id]);

    let calendar = DayCalendar::utc();
    let day = calendar.day_of(noon(2026, 5, 2));
    let in_range = store.fetch_range(calendar.day_range(day)).await?;
    assert_eq!(in_range, vec![middle]);
    Ok(())
}

async fn check_delete_is_idempotent(store: &dyn FoodStore) -> Result<()> {
    let kept = entry_at(noon(2026, 5, 1), MealType::Lunch, 300.0, 20.0, 10.0);
    let removed = entry_at(noon(2026, 5, 1), MealType::Lunch, 200.0, 10.0, 5.0);
    store.insert(kept.clone()).await?;
    store.insert(removed.clone()).await?;
    store.commit().await?;

    store.delete(&removed).await?;
    store.delete(&removed).await?;

    assert_eq!(store.fetch_all().await?, vec![kept]);
    Ok(())
}

async fn check_delete_where_matches_meal_and_day(store: &dyn FoodStore) -> Result<()> {
    let day = noon(2026, 5, 1);
    let dinner = entry_at(day, MealType::Dinner, 600.0, 35.0, 20.0);
    let late_dinner = entry_at(day + Duration::hours(10), MealType::Dinner, 300.0, 10.0, 10.0);
    let lunch = entry_at(day, MealType::Lunch, 400.0, 25.0, 12.0);
    let tomorrow_dinner = entry_at(day + Duration::days(1), MealType::Dinner, 500.0, 30.0, 15.0);

    for entry in [&dinner, &late_dinner, &lunch, &tomorrow_dinner] {
        store.insert(entry.clone()).await?;
    }
    store.commit().await?;

    let calendar = DayCalendar::utc();
    let range = calendar.day_range(calendar.day_of(day));
    let removed = store.delete_where(MealType::Dinner, range).await?;

    // 22:00 UTC is still the same UTC day
    assert_eq!(removed, 2);
    let remaining: Vec<_> = store.fetch_all().await?.iter().map(|e| e.id).collect();
    assert_eq!(remaining, vec![tomorrow_dinner.id, lunch.id]);
    Ok(())
}

#[tokio::test]
async fn test_memory_store_commit_semantics() -> Result<()> {
    common::init_test_logging();
    let store = InMemoryFoodStore::new();
    check_staged_entries_invisible_until_commit(&store).await?;
    assert_eq!(store.staged_len().await, 0);
    Ok(())
}

async fn check_rollback_discards_staged_entries(store: &dyn FoodStore) -> Result<()> {
    let discarded = entry_at(noon(2026, 5, 1), MealType::Lunch, 300.0, 20.0, 10.0);
    let kept = entry_at(noon(2026, 5, 2), MealType::Dinner, 500.0, 30.0, 15.0);

    store.insert(discarded).await?;
    store.rollback().await;
    store.insert(kept.clone()).await?;
    store.commit().await?;

    assert_eq!(store.fetch_all().await?, vec![kept]);
    Ok(())
}

#[tokio::test]
async fn test_memory_store_ordering_and_range() -> Result<()> {
    check_fetch_orders_most_recent_first(&InMemoryFoodStore::new()).await
}

#[tokio::test]
async fn test_memory_store_delete() -> Result<()> {
    check_delete_is_idempotent(&InMemoryFoodStore::new()).await
}

#[tokio::test]
async fn test_memory_store_delete_where() -> Result<()> {
    check_delete_where_matches_meal_and_day(&InMemoryFoodStore::new()).await
}

#[tokio::test]
async fn test_memory_store_rollback() -> Result<()> {
    check_rollback_discards_staged_entries(&InMemoryFoodStore::new()).await
}

#[tokio::test]
async fn test_sqlite_store_rollback() -> Result<()> {
    check_rollback_discards_staged_entries(&create_sqlite_store().await?).await
}

#[tokio::test]
async fn test_sqlite_failed_commit_does_not_block_later_commits() -> Result<()> {
    let store = create_sqlite_store().await?;
    let mut unwritable = entry_at(noon(2026, 5, 1), MealType::Lunch, 300.0, 20.0, 10.0);
    unwritable.calories = f64::NAN;
    let valid = entry_at(noon(2026, 5, 2), MealType::Dinner, 500.0, 30.0, 15.0);

    store.insert(unwritable).await?;
    let error = store.commit().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::DatabaseError);

    store.insert(valid.clone()).await?;
    store.commit().await?;
    store.commit().await?;

    assert_eq!(store.fetch_all().await?, vec![valid]);
    Ok(())
}

#[tokio::test]
async fn test_sqlite_store_commit_semantics() -> Result<()> {
    check_staged_entries_invisible_until_commit(&create_sqlite_store().await?).await
}

#[tokio::test]
async fn test_sqlite_store_ordering_and_range() -> Result<()> {
    check_fetch_orders_most_recent_first(&create_sqlite_store().await?).await
}

#[tokio::test]
async fn test_sqlite_store_delete() -> Result<()> {
    check_delete_is_idempotent(&create_sqlite_store().await?).await
}

#[tokio::test]
async fn test_sqlite_store_delete_where() -> Result<()> {
    check_delete_where_matches_meal_and_day(&create_sqlite_store().await?).await
}

#[tokio::test]
async fn test_sqlite_round_trips_every_field() -> Result<()> {
    let store = create_sqlite_store().await?;
    let recorded = noon(2026, 5, 1) + Duration::microseconds(123_456);
    let entry = LoggedFoodEntry::from_query_result(&chicken_breast(), Some(recorded), MealType::Snack);

    store.insert(entry.clone()).await?;
    store.commit().await?;

    let loaded = store.fetch_all().await?;
    assert_eq!(loaded, vec![entry]);
    Ok(())
}

#[tokio::test]
async fn test_sqlite_file_persists_across_connections() -> Result<()> {
    common::init_test_logging();
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("nested").join("entries.db");
    let url = format!("sqlite:{}", db_path.display());

    let entry = entry_at(noon(2026, 5, 1), MealType::Breakfast, 250.0, 12.0, 9.0);
    {
        let store = Database::from_url(&url).await?;
        assert_eq!(store.database_type(), DatabaseType::SQLite);
        store.insert(entry.clone()).await?;
        store.commit().await?;
    }

    let reopened = Database::from_url(&url).await?;
    assert_eq!(reopened.fetch_all().await?, vec![entry]);
    assert!(db_path.exists());
    Ok(())
}

#[tokio::test]
async fn test_database_factory_detects_backends() -> Result<()> {
    assert_eq!(detect_database_type("memory")?, DatabaseType::Memory);
    assert_eq!(detect_database_type(" MEMORY ")?, DatabaseType::Memory);
    assert_eq!(detect_database_type("sqlite::memory:")?, DatabaseType::SQLite);
    assert_eq!(detect_database_type("sqlite:./data/entries.db")?, DatabaseType::SQLite);

    let error = detect_database_type("postgres://localhost/entries").unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);

    let memory = Database::from_url("memory").await?;
    assert_eq!(memory.database_type(), DatabaseType::Memory);
    assert!(memory.backend_info().contains("In-memory"));
    Ok(())
}
