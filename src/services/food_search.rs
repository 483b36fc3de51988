// ABOUTME: Search session holding the transient result list awaiting user confirmation
// ABOUTME: Generation-tagged searches so a slow response never replaces a newer one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppResult, SearchError};
use crate::models::{LoggedFoodEntry, MealType, NutritionQueryResult};
use crate::services::nutrition_repository::NutritionRepository;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// What happened to a search response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response became the current result list, with this many records
    Applied(usize),
    /// A newer search started before this one finished; the response was dropped
    Superseded,
}

#[derive(Debug, Default)]
struct SessionState {
    results: Vec<NutritionQueryResult>,
    last_error: Option<String>,
}

/// Results of the latest search, waiting to be confirmed or discarded
pub struct FoodSearchSession {
    repository: Arc<NutritionRepository>,
    state: Mutex<SessionState>,
    generation: AtomicU64,
}

impl FoodSearchSession {
    /// Create an empty session
    #[must_use]
    pub fn new(repository: Arc<NutritionRepository>) -> Self {
        Self {
            repository,
            state: Mutex::new(SessionState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Run a search, replacing the current results when it is still the latest one
    ///
    /// # Errors
    ///
    /// Returns the search failure when this is still the latest search; the
    /// message is also kept as [`FoodSearchSession::last_error`]
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            state.results.clear();
            state.last_error = None;
        }

        let response = self.repository.search_nutrition(query).await;

        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Dropping superseded search response");
            return Ok(SearchOutcome::Superseded);
        }

        match response {
            Ok(results) => {
                let count = results.len();
                state.results = results;
                Ok(SearchOutcome::Applied(count))
            }
            Err(error) => {
                state.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Current results
    pub async fn results(&self) -> Vec<NutritionQueryResult> {
        self.state.lock().await.results.clone()
    }

    /// Message of the latest failed search, if it failed
    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.last_error.clone()
    }

    /// Discard the results and any error
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.results.clear();
        state.last_error = None;
    }

    /// Save the current results for a meal and empty the session
    ///
    /// # Errors
    ///
    /// Returns an error if the entries cannot be saved; the results are kept
    pub async fn confirm(
        &self,
        date: DateTime<Utc>,
        meal_type: MealType,
    ) -> AppResult<Vec<LoggedFoodEntry>> {
        let mut state = self.state.lock().await;
        let saved = self
            .repository
            .try_save_food_items(&state.results, date, meal_type)
            .await?;
        state.results.clear();
        state.last_error = None;
        Ok(saved)
    }
}
