// ABOUTME: Food store factory with runtime backend selection from the database URL
// ABOUTME: The Database enum delegates every FoodStore call to the selected backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Database factory for creating food stores
//!
//! `memory` selects the in-memory store; any `sqlite:` URL selects `SQLite`,
//! creating the database file (and its directory) when missing.

use super::{FoodStore, InMemoryFoodStore, SqliteFoodStore};
use crate::errors::{AppError, AppResult};
use crate::models::{LoggedFoodEntry, MealType};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info};

const MEMORY_URL: &str = "memory";
const SQLITE_SCHEME: &str = "sqlite:";

/// Supported store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// Process-local, lost on exit
    Memory,
    /// Embedded file (or `sqlite::memory:`) database
    SQLite,
}

/// Food store wrapper that delegates to the selected implementation
#[derive(Clone)]
pub enum Database {
    /// In-memory backend
    Memory(InMemoryFoodStore),
    /// `SQLite` backend
    SQLite(SqliteFoodStore),
}

impl Database {
    /// Get a descriptive string for the current database backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Memory(_) => "In-memory (entries are lost on exit)",
            Self::SQLite(_) => "SQLite (local file)",
        }
    }

    /// Get the database type enum
    #[must_use]
    pub const fn database_type(&self) -> DatabaseType {
        match self {
            Self::Memory(_) => DatabaseType::Memory,
            Self::SQLite(_) => DatabaseType::SQLite,
        }
    }

    /// Create a store from a connection string
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL is neither `memory` nor a `sqlite:` URL
    /// - The database directory cannot be created
    /// - The connection or schema creation fails
    pub async fn from_url(database_url: &str) -> AppResult<Self> {
        debug!("Detecting database type from URL: {}", database_url);
        let db_type = detect_database_type(database_url)?;
        info!("Detected database type: {:?}", db_type);

        match db_type {
            DatabaseType::Memory => Ok(Self::Memory(InMemoryFoodStore::new())),
            DatabaseType::SQLite => {
                let store = connect_sqlite(database_url).await?;
                info!("SQLite database initialized successfully");
                Ok(Self::SQLite(store))
            }
        }
    }
}

/// Detect the backend from a connection string
///
/// # Errors
///
/// Returns an error if the URL format is not recognized
pub fn detect_database_type(database_url: &str) -> AppResult<DatabaseType> {
    let url = database_url.trim();
    if url.eq_ignore_ascii_case(MEMORY_URL) {
        Ok(DatabaseType::Memory)
    } else if url.starts_with(SQLITE_SCHEME) {
        Ok(DatabaseType::SQLite)
    } else {
        Err(AppError::config_invalid(
            "DATABASE_URL",
            format!(
                "Unsupported database URL format: {database_url}. \
                 Supported formats: memory, sqlite:path/to/db.sqlite, sqlite::memory:"
            ),
        ))
    }
}

fn is_sqlite_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Filesystem path of a `sqlite:` URL, without the scheme or query string
fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url.strip_prefix(SQLITE_SCHEME)?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or(rest);
    (!path.is_empty()).then(|| Path::new(path))
}

async fn connect_sqlite(database_url: &str) -> AppResult<SqliteFoodStore> {
    let in_memory = is_sqlite_in_memory(database_url);

    if !in_memory {
        if let Some(parent) = sqlite_file_path(database_url).and_then(Path::parent) {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::database(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::config_invalid("DATABASE_URL", e.to_string()))?
        .create_if_missing(true);

    // Every connection to `sqlite::memory:` opens its own empty database
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| AppError::database(format!("Failed to connect to {database_url}: {e}")))?;

    let store = SqliteFoodStore::new(pool);
    store.migrate().await?;
    Ok(store)
}

#[async_trait::async_trait]
impl FoodStore for Database {
    async fn insert(&self, entry: LoggedFoodEntry) -> AppResult<()> {
        match self {
            Self::Memory(db) => db.insert(entry).await,
            Self::SQLite(db) => db.insert(entry).await,
        }
    }

    async fn fetch_all(&self) -> AppResult<Vec<LoggedFoodEntry>> {
        match self {
            Self::Memory(db) => db.fetch_all().await,
            Self::SQLite(db) => db.fetch_all().await,
        }
    }

    async fn fetch_range(&self, range: Range<DateTime<Utc>>) -> AppResult<Vec<LoggedFoodEntry>> {
        match self {
            Self::Memory(db) => db.fetch_range(range).await,
            Self::SQLite(db) => db.fetch_range(range).await,
        }
    }

    async fn delete(&self, entry: &LoggedFoodEntry) -> AppResult<()> {
        match self {
            Self::Memory(db) => db.delete(entry).await,
            Self::SQLite(db) => db.delete(entry).await,
        }
    }

    async fn delete_where(
        &self,
        meal_type: MealType,
        range: Range<DateTime<Utc>>,
    ) -> AppResult<u64> {
        match self {
            Self::Memory(db) => db.delete_where(meal_type, range).await,
            Self::SQLite(db) => db.delete_where(meal_type, range).await,
        }
    }

    async fn commit(&self) -> AppResult<()> {
        match self {
            Self::Memory(db) => db.commit().await,
            Self::SQLite(db) => db.commit().await,
        }
    }

    async fn rollback(&self) {
        match self {
            Self::Memory(db) => db.rollback().await,
            Self::SQLite(db) => db.rollback().await,
        }
    }
}
