// ABOUTME: Validation ranges for nutrient fields, food names, and search queries
// ABOUTME: Closed ranges shared by validation and sanitization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::ops::RangeInclusive;

/// Calories per record
pub const CALORIES_RANGE: RangeInclusive<f64> = 0.0..=10_000.0;

/// Protein in grams
pub const PROTEIN_RANGE: RangeInclusive<f64> = 0.0..=1_000.0;

/// Total carbohydrates in grams
pub const CARBS_RANGE: RangeInclusive<f64> = 0.0..=2_000.0;

/// Total (and saturated) fat in grams
pub const FAT_RANGE: RangeInclusive<f64> = 0.0..=500.0;

/// Serving size in grams
pub const SERVING_SIZE_RANGE: RangeInclusive<f64> = 0.0..=10_000.0;

/// Sodium in milligrams
pub const SODIUM_RANGE: RangeInclusive<i64> = 0..=50_000;

/// Potassium in milligrams
pub const POTASSIUM_RANGE: RangeInclusive<i64> = 0..=10_000;

/// Cholesterol in milligrams
pub const CHOLESTEROL_RANGE: RangeInclusive<i64> = 0..=5_000;

/// Fiber in grams
pub const FIBER_RANGE: RangeInclusive<f64> = 0.0..=500.0;

/// Sugar in grams
pub const SUGAR_RANGE: RangeInclusive<f64> = 0.0..=1_000.0;

/// Food name length in characters
pub const NAME_LENGTH_RANGE: RangeInclusive<usize> = 1..=100;

/// Minimum trimmed search query length in characters
pub const SEARCH_QUERY_MIN_LENGTH: usize = 2;

/// Maximum trimmed search query length in characters
pub const SEARCH_QUERY_MAX_LENGTH: usize = 200;
