// ABOUTME: Benchmark fixtures for generating logged meals and lookup results
// ABOUTME: Provides deterministic data generation for reproducible performance measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for generating logged meals and lookup results.
//!
//! Provides deterministic data generation for reproducible performance measurements.

use chrono::{DateTime, Duration, TimeZone, Utc};
use macro_tracker::models::{LoggedFoodEntry, MealType, NutritionQueryResult};

/// Predefined history lengths for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum HistorySize {
    /// One week of meals
    Week,
    /// A quarter of meals
    Quarter,
    /// Two years of meals
    TwoYears,
}

impl HistorySize {
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Quarter => 90,
            Self::TwoYears => 730,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Quarter => "quarter",
            Self::TwoYears => "two_years",
        }
    }
}

/// Fixed "now" so runs are comparable
#[must_use]
pub fn bench_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 10, 20, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// A lookup record whose numbers vary with `index`
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn generate_result(index: usize) -> NutritionQueryResult {
    let step = (index % 17) as f64;
    NutritionQueryResult {
        name: Some(format!("food {index}")),
        calories: Some(120.0 + step * 23.0),
        serving_size_g: Some(100.0),
        fat_total_g: Some(2.0 + step),
        fat_saturated_g: Some(0.5),
        protein_g: Some(5.0 + step * 1.5),
        sodium_mg: Some(40 + (index % 90) as i64),
        potassium_mg: Some(200),
        cholesterol_mg: Some(0),
        carbohydrates_total_g: Some(15.0 + step * 2.0),
        fiber_g: Some(1.5),
        sugar_g: Some(4.0),
    }
}

/// Three meals a day going back from [`bench_now`]
#[must_use]
pub fn generate_history(size: HistorySize) -> Vec<LoggedFoodEntry> {
    let now = bench_now();
    (0..size.days())
        .flat_map(|day| {
            [
                (MealType::Breakfast, 8),
                (MealType::Lunch, 13),
                (MealType::Dinner, 19),
            ]
            .into_iter()
            .enumerate()
            .map(move |(slot, (meal_type, hour))| {
                let recorded = now - Duration::days(day) - Duration::hours(20 - hour);
                let index = usize::try_from(day).unwrap_or_default() * 3 + slot;
                LoggedFoodEntry::from_query_result(&generate_result(index), Some(recorded), meal_type)
            })
        })
        .collect()
}
