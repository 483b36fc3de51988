// ABOUTME: Progress view-state coordinator driving loading, loaded, empty, and error states
// ABOUTME: Publishes whole ProgressState snapshots on a watch channel and drops superseded results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Progress Tracker
//!
//! Every `refresh`, `select_tab` or `retry` moves the state to
//! `Loading("Calculating progress...")`, reads the saved entries, runs the
//! aggregation on a blocking worker and publishes the outcome. Each request is
//! tagged with a generation number; a result whose generation is no longer the
//! latest is discarded, so a slow weekly calculation can never overwrite a
//! monthly one the user asked for afterwards.
//!
//! [`ProgressTracker::follow`] recalculates whenever the saved entries change.

use crate::constants::progress::LOADING_MESSAGE;
use crate::errors::{AppResult, ProgressError};
use crate::intelligence::{
    ChartData, NutritionData, ProgressCalculationResult, ProgressCalculationService, ProgressTab,
};
use crate::models::LoggedFoodEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::task::{self, JoinHandle};
use tracing::{debug, warn};

/// Source of the saved entries the tracker aggregates
#[async_trait::async_trait]
pub trait ProgressDataSource: Send + Sync {
    /// Every saved entry
    ///
    /// # Errors
    ///
    /// Returns an error if the entries cannot be read
    async fn load_entries(&self) -> AppResult<Vec<LoggedFoodEntry>>;
}

/// Supplies the current instant
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Loading indicator of the progress view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum LoadingState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A calculation is running
    Loading(String),
    /// The chart has data
    Loaded,
    /// The calculation failed
    Error(ProgressError),
    /// The calculation succeeded with no data points
    Empty,
}

impl LoadingState {
    /// Whether a calculation is running
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    /// The failure, when in the error state
    #[must_use]
    pub const fn error(&self) -> Option<&ProgressError> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }
}

/// Everything the progress view renders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Selected view
    pub selected_tab: ProgressTab,
    /// Summary card values
    pub nutrition_data: NutritionData,
    /// Chart series
    pub chart_data: ChartData,
    /// Loading indicator
    pub loading_state: LoadingState,
}

impl ProgressState {
    fn loading(previous: &Self, tab: ProgressTab) -> Self {
        Self {
            selected_tab: tab,
            nutrition_data: previous.nutrition_data.clone(),
            chart_data: previous.chart_data.clone(),
            loading_state: LoadingState::Loading(LOADING_MESSAGE.to_owned()),
        }
    }

    fn completed(tab: ProgressTab, outcome: Result<ProgressCalculationResult, ProgressError>) -> Self {
        match outcome {
            Ok(result) => {
                let loading_state = if result.chart_data.is_empty() {
                    LoadingState::Empty
                } else {
                    LoadingState::Loaded
                };
                Self {
                    selected_tab: tab,
                    nutrition_data: result.nutrition_data,
                    chart_data: result.chart_data,
                    loading_state,
                }
            }
            Err(error) => Self {
                selected_tab: tab,
                loading_state: LoadingState::Error(error),
                ..Self::default()
            },
        }
    }
}

/// Coordinates progress calculations and publishes their state
pub struct ProgressTracker {
    source: Arc<dyn ProgressDataSource>,
    calculator: Arc<dyn ProgressCalculationService>,
    clock: Clock,
    state: watch::Sender<ProgressState>,
    generation: AtomicU64,
}

impl ProgressTracker {
    /// Create a tracker in the `Idle` state on the weekly tab
    #[must_use]
    pub fn new(
        source: Arc<dyn ProgressDataSource>,
        calculator: Arc<dyn ProgressCalculationService>,
    ) -> Self {
        let (state, _) = watch::channel(ProgressState::default());
        Self {
            source,
            calculator,
            clock: Arc::new(Utc::now),
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Replace the clock used to decide what "today" is
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Receiver observing every state transition
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProgressState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> ProgressState {
        self.state.borrow().clone()
    }

    /// Recalculate the selected tab
    pub async fn refresh(&self) {
        let tab = self.state.borrow().selected_tab;
        self.load(tab).await;
    }

    /// Switch to a tab and calculate it
    pub async fn select_tab(&self, tab: ProgressTab) {
        self.load(tab).await;
    }

    /// Recalculate after a failure
    pub async fn retry(&self) {
        self.refresh().await;
    }

    /// Refresh after every change published on `changes`
    ///
    /// The task ends when the tracker is dropped or the sender side closes.
    pub fn follow(self: &Arc<Self>, mut changes: watch::Receiver<u64>) -> JoinHandle<()> {
        let tracker: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let Some(tracker) = tracker.upgrade() else {
                    break;
                };
                let revision = *changes.borrow_and_update();
                debug!(revision, "Saved entries changed; refreshing progress");
                tracker.refresh().await;
            }
        })
    }

    async fn load(&self, tab: ProgressTab) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state
            .send_modify(|state| *state = ProgressState::loading(state, tab));

        let outcome = self.calculate(tab).await;

        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = ProgressState::completed(tab, outcome);
            true
        });
        if !applied {
            debug!(generation, tab = %tab, "Discarding superseded progress result");
        }
    }

    async fn calculate(&self, tab: ProgressTab) -> Result<ProgressCalculationResult, ProgressError> {
        let entries = self.source.load_entries().await.map_err(|e| {
            warn!(error = %e, "Failed to load saved entries for progress");
            ProgressError::Unknown(e.message)
        })?;

        let calculator = Arc::clone(&self.calculator);
        let now = (self.clock)();
        task::spawn_blocking(move || calculator.calculate_progress(tab, &entries, now))
            .await
            .map_err(|e| ProgressError::Unknown(format!("Progress calculation task failed: {e}")))?
    }
}
