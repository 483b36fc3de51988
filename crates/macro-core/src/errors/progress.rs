// ABOUTME: Progress calculation errors with user-facing descriptions and recovery hints
// ABOUTME: Surfaced by the aggregation service and carried by the progress loading state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a progress calculation can fail
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ProgressError {
    /// No entries were logged at all
    #[error("No nutrition data available")]
    NoData,
    /// Entries exist but none fall in the window being charted
    #[error("Not enough data to show progress")]
    InsufficientData,
    /// Arithmetic produced a non-finite result
    #[error("Unable to calculate progress")]
    CalculationFailed,
    /// An entry carries a negative or non-finite macro value
    #[error("Data appears to be corrupted")]
    DataCorrupted,
    /// Any other failure, with its message
    #[error("An unexpected error occurred: {0}")]
    Unknown(String),
}

impl ProgressError {
    /// Human-readable description of the failure
    #[must_use]
    pub fn description(&self) -> String {
        self.to_string()
    }

    /// What the user can do about it
    #[must_use]
    pub const fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NoData => "Start logging your meals to see your progress",
            Self::InsufficientData => "Log more meals to see detailed progress charts",
            Self::CalculationFailed | Self::Unknown(_) => "Please try again or restart the app",
            Self::DataCorrupted => "Please restart the app or contact support",
        }
    }
}
