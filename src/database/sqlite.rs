// ABOUTME: SQLite food store persisting logged entries in the logged_food_entries table
// ABOUTME: Staged inserts are flushed in a single transaction on commit and dropped if it fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::FoodStore;
use crate::errors::{AppError, AppResult};
use crate::models::{LoggedFoodEntry, MealType};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::mem;
use std::ops::Range;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

const SELECT_COLUMNS: &str = r"
    SELECT id, name, calories, serving_size_g, fat_total_g, fat_saturated_g,
           protein_g, sodium_mg, potassium_mg, cholesterol_mg,
           carbohydrates_total_g, fiber_g, sugar_g, recorded_date, meal_type
    FROM logged_food_entries
";

/// Timestamps are stored with a fixed width so text order matches time order
fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Database manager for logged food entries
#[derive(Clone)]
pub struct SqliteFoodStore {
    pool: SqlitePool,
    staged: Arc<Mutex<Vec<LoggedFoodEntry>>>,
}

impl SqliteFoodStore {
    /// Create a store over an existing pool
    ///
    /// Call [`SqliteFoodStore::migrate`] before first use.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            staged: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the entries table and its index
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS logged_food_entries (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                calories REAL NOT NULL DEFAULT 0,
                serving_size_g REAL NOT NULL DEFAULT 0,
                fat_total_g REAL NOT NULL DEFAULT 0,
                fat_saturated_g REAL NOT NULL DEFAULT 0,
                protein_g REAL NOT NULL DEFAULT 0,
                sodium_mg INTEGER NOT NULL DEFAULT 0,
                potassium_mg INTEGER NOT NULL DEFAULT 0,
                cholesterol_mg INTEGER NOT NULL DEFAULT 0,
                carbohydrates_total_g REAL NOT NULL DEFAULT 0,
                fiber_g REAL NOT NULL DEFAULT 0,
                sugar_g REAL NOT NULL DEFAULT 0,
                recorded_date TEXT NOT NULL,
                meal_type TEXT NOT NULL CHECK (meal_type IN ('breakfast', 'lunch', 'dinner', 'snack'))
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create logged_food_entries: {e}")))?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_logged_food_entries_recorded_date
            ON logged_food_entries (recorded_date)
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recorded_date index: {e}")))?;

        Ok(())
    }

    async fn write_batch(&self, entries: &[LoggedFoodEntry]) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        for entry in entries {
            sqlx::query(
                r"
                INSERT INTO logged_food_entries (
                    id, name, calories, serving_size_g, fat_total_g, fat_saturated_g,
                    protein_g, sodium_mg, potassium_mg, cholesterol_mg,
                    carbohydrates_total_g, fiber_g, sugar_g, recorded_date, meal_type
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                ",
            )
            .bind(entry.id.to_string())
            .bind(&entry.name)
            .bind(entry.calories)
            .bind(entry.serving_size_g)
            .bind(entry.fat_total_g)
            .bind(entry.fat_saturated_g)
            .bind(entry.protein_g)
            .bind(entry.sodium_mg)
            .bind(entry.potassium_mg)
            .bind(entry.cholesterol_mg)
            .bind(entry.carbohydrates_total_g)
            .bind(entry.fiber_g)
            .bind(entry.sugar_g)
            .bind(format_timestamp(entry.recorded_date))
            .bind(entry.meal_type.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert food entry: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit food entries: {e}")))
    }
}

#[async_trait::async_trait]
impl FoodStore for SqliteFoodStore {
    async fn insert(&self, entry: LoggedFoodEntry) -> AppResult<()> {
        self.staged.lock().await.push(entry);
        Ok(())
    }

    async fn fetch_all(&self) -> AppResult<Vec<LoggedFoodEntry>> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY recorded_date DESC"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list food entries: {e}")))?;

        rows.iter().map(row_to_logged_food_entry).collect()
    }

    async fn fetch_range(&self, range: Range<DateTime<Utc>>) -> AppResult<Vec<LoggedFoodEntry>> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE recorded_date >= $1 AND recorded_date < $2 ORDER BY recorded_date DESC"
        ))
        .bind(format_timestamp(range.start))
        .bind(format_timestamp(range.end))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list food entries for range: {e}")))?;

        rows.iter().map(row_to_logged_food_entry).collect()
    }

    async fn delete(&self, entry: &LoggedFoodEntry) -> AppResult<()> {
        self.staged.lock().await.retain(|e| e.id != entry.id);

        sqlx::query("DELETE FROM logged_food_entries WHERE id = $1")
            .bind(entry.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete food entry: {e}")))?;

        Ok(())
    }

    async fn delete_where(
        &self,
        meal_type: MealType,
        range: Range<DateTime<Utc>>,
    ) -> AppResult<u64> {
        self.staged.lock().await.retain(|e| {
            !(e.meal_type == meal_type && range.contains(&e.recorded_date))
        });

        let result = sqlx::query(
            r"
            DELETE FROM logged_food_entries
            WHERE meal_type = $1 AND recorded_date >= $2 AND recorded_date < $3
            ",
        )
        .bind(meal_type.as_str())
        .bind(format_timestamp(range.start))
        .bind(format_timestamp(range.end))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete food entries: {e}")))?;

        Ok(result.rows_affected())
    }

    async fn commit(&self) -> AppResult<()> {
        let batch = mem::take(&mut *self.staged.lock().await);
        if batch.is_empty() {
            return Ok(());
        }

        if let Err(e) = self.write_batch(&batch).await {
            warn!(count = batch.len(), error = %e, "Discarded food entries after failed commit");
            return Err(e);
        }

        info!(count = batch.len(), "Persisted food entries");
        Ok(())
    }

    async fn rollback(&self) {
        let discarded = mem::take(&mut *self.staged.lock().await).len();
        if discarded > 0 {
            debug!(count = discarded, "Rolled back staged food entries");
        }
    }
}

/// Convert a database row to a `LoggedFoodEntry`
fn row_to_logged_food_entry(row: &SqliteRow) -> AppResult<LoggedFoodEntry> {
    let id_str: String = row.get("id");
    let recorded_date_str: String = row.get("recorded_date");
    let meal_type_str: String = row.get("meal_type");

    Ok(LoggedFoodEntry {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid entry id '{id_str}': {e}")))?,
        name: row.get("name"),
        calories: row.get("calories"),
        serving_size_g: row.get("serving_size_g"),
        fat_total_g: row.get("fat_total_g"),
        fat_saturated_g: row.get("fat_saturated_g"),
        protein_g: row.get("protein_g"),
        sodium_mg: row.get("sodium_mg"),
        potassium_mg: row.get("potassium_mg"),
        cholesterol_mg: row.get("cholesterol_mg"),
        carbohydrates_total_g: row.get("carbohydrates_total_g"),
        fiber_g: row.get("fiber_g"),
        sugar_g: row.get("sugar_g"),
        recorded_date: DateTime::parse_from_rfc3339(&recorded_date_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
        meal_type: meal_type_str.parse()?,
    })
}
