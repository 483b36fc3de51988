// ABOUTME: Application context wiring configuration, store, lookup, cache, and services together
// ABOUTME: Every dependency is built explicitly here and handed to services through constructors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Dependency wiring
//!
//! There are no globals: the binary builds one [`AppContext`] from the loaded
//! configuration and passes references to whatever needs them.

use crate::cache::InMemorySearchCache;
use crate::config::AppConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::external::{MockNutritionClient, NutritionApiClient, NutritionLookup};
use crate::intelligence::ProgressCalculator;
use crate::services::{FoodSearchSession, NutritionRepository, ProgressTracker};
use std::sync::Arc;
use tracing::{info, warn};

/// Long-lived dependencies of the application
#[derive(Clone)]
pub struct AppContext {
    config: Arc<AppConfig>,
    database: Database,
    repository: Arc<NutritionRepository>,
    tracker: Arc<ProgressTracker>,
}

impl AppContext {
    /// Assemble the context from an opened store and a lookup implementation
    ///
    /// # Errors
    ///
    /// Returns an error if the configured calendar offset is invalid
    pub fn new(
        config: AppConfig,
        database: Database,
        lookup: Arc<dyn NutritionLookup>,
    ) -> AppResult<Self> {
        let calendar = config.calendar()?;
        let cache = Arc::new(InMemorySearchCache::new(config.cache.cache_config()));
        let repository = Arc::new(NutritionRepository::new(
            lookup,
            cache,
            Arc::new(database.clone()),
            calendar,
        ));
        let tracker = Arc::new(ProgressTracker::new(
            repository.clone(),
            Arc::new(ProgressCalculator::new(calendar)),
        ));

        Ok(Self {
            config: Arc::new(config),
            database,
            repository,
            tracker,
        })
    }

    /// Open the configured store and pick the lookup implementation
    ///
    /// `offline` (or a missing API key) selects the canned mock lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened or the HTTP client cannot be built
    pub async fn from_config(config: AppConfig, offline: bool) -> AppResult<Self> {
        let database = Database::from_url(&config.database_url).await?;
        info!(backend = database.backend_info(), "Food store ready");

        let lookup: Arc<dyn NutritionLookup> = if offline {
            info!("Using offline nutrition fixtures");
            Arc::new(MockNutritionClient::new())
        } else if config.has_api_key() {
            Arc::new(NutritionApiClient::new(config.nutrition_api.clone())?)
        } else {
            warn!("No NUTRITION_API_KEY configured; falling back to offline nutrition fixtures");
            Arc::new(MockNutritionClient::new())
        };

        Self::new(config, database, lookup)
    }

    /// Loaded configuration
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Food store
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Search and saved-entry operations
    #[must_use]
    pub const fn repository(&self) -> &Arc<NutritionRepository> {
        &self.repository
    }

    /// Progress view-state coordinator
    #[must_use]
    pub const fn tracker(&self) -> &Arc<ProgressTracker> {
        &self.tracker
    }

    /// Fresh search session over the shared repository
    #[must_use]
    pub fn search_session(&self) -> FoodSearchSession {
        FoodSearchSession::new(Arc::clone(&self.repository))
    }
}
