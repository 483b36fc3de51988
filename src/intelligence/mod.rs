// ABOUTME: Nutrition intelligence over saved entries: progress trends and daily summaries
// ABOUTME: Pure aggregation with no I/O; callers supply the entries and the current instant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Aggregation over logged food entries. Nothing here touches the store or the
//! network, so every calculation can be unit tested with literal entries.

/// Per-day grouping of entries by meal type
pub mod daily_summary;
/// Weekly and monthly progress aggregation
pub mod progress;

pub use daily_summary::{DailySummary, MealSummary, NutrientTotals};
pub use progress::{
    percent_change, ChartData, NutritionData, ProgressCalculationResult,
    ProgressCalculationService, ProgressCalculator, ProgressTab,
};
