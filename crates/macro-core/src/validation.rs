// ABOUTME: Validation and sanitization rules for nutrient records and search queries
// ABOUTME: Pure functions; sanitization clamps into the same ranges validation checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrient record and search query validation
//!
//! [`validate`] reports every violated rule rather than stopping at the first.
//! [`sanitize`] is the fallback used instead of rejecting a record outright:
//! its output always passes [`validate`].

use crate::constants::validation::{
    CALORIES_RANGE, CARBS_RANGE, CHOLESTEROL_RANGE, FAT_RANGE, FIBER_RANGE, NAME_LENGTH_RANGE,
    POTASSIUM_RANGE, PROTEIN_RANGE, SEARCH_QUERY_MAX_LENGTH, SEARCH_QUERY_MIN_LENGTH,
    SERVING_SIZE_RANGE, SODIUM_RANGE, SUGAR_RANGE,
};
use crate::errors::ValidationError;
use crate::models::NutritionQueryResult;
use std::ops::RangeInclusive;

/// Collect every rule the record violates, in field order
///
/// Absent fields are not checked. `NaN` is out of every range.
#[must_use]
pub fn validate(record: &NutritionQueryResult) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_f64(record.calories, &CALORIES_RANGE, ValidationError::InvalidCalories, &mut errors);
    check_f64(record.protein_g, &PROTEIN_RANGE, ValidationError::InvalidProtein, &mut errors);
    check_f64(
        record.carbohydrates_total_g,
        &CARBS_RANGE,
        ValidationError::InvalidCarbs,
        &mut errors,
    );
    check_f64(record.fat_total_g, &FAT_RANGE, ValidationError::InvalidFat, &mut errors);
    check_f64(
        record.serving_size_g,
        &SERVING_SIZE_RANGE,
        ValidationError::InvalidServingSize,
        &mut errors,
    );
    check_i64(record.sodium_mg, &SODIUM_RANGE, ValidationError::InvalidSodium, &mut errors);
    check_i64(
        record.potassium_mg,
        &POTASSIUM_RANGE,
        ValidationError::InvalidPotassium,
        &mut errors,
    );
    check_i64(
        record.cholesterol_mg,
        &CHOLESTEROL_RANGE,
        ValidationError::InvalidCholesterol,
        &mut errors,
    );
    check_f64(record.fiber_g, &FIBER_RANGE, ValidationError::InvalidFiber, &mut errors);
    check_f64(record.sugar_g, &SUGAR_RANGE, ValidationError::InvalidSugar, &mut errors);

    if let Some(name) = &record.name {
        if !NAME_LENGTH_RANGE.contains(&name.chars().count()) {
            errors.push(ValidationError::InvalidName(name.clone()));
        }
    }

    errors
}

/// Clamp every numeric field into its range and tidy the name
///
/// Whitespace in the name is trimmed and collapsed; a name that ends up empty
/// is dropped and one that is too long is cut to the maximum length.
/// Saturated fat shares the total fat range.
#[must_use]
pub fn sanitize(record: &NutritionQueryResult) -> NutritionQueryResult {
    NutritionQueryResult {
        name: record.name.as_deref().and_then(sanitize_name),
        calories: record.calories.map(|v| clamp_f64(v, &CALORIES_RANGE)),
        serving_size_g: record.serving_size_g.map(|v| clamp_f64(v, &SERVING_SIZE_RANGE)),
        fat_total_g: record.fat_total_g.map(|v| clamp_f64(v, &FAT_RANGE)),
        fat_saturated_g: record.fat_saturated_g.map(|v| clamp_f64(v, &FAT_RANGE)),
        protein_g: record.protein_g.map(|v| clamp_f64(v, &PROTEIN_RANGE)),
        sodium_mg: record.sodium_mg.map(|v| clamp_i64(v, &SODIUM_RANGE)),
        potassium_mg: record.potassium_mg.map(|v| clamp_i64(v, &POTASSIUM_RANGE)),
        cholesterol_mg: record.cholesterol_mg.map(|v| clamp_i64(v, &CHOLESTEROL_RANGE)),
        carbohydrates_total_g: record
            .carbohydrates_total_g
            .map(|v| clamp_f64(v, &CARBS_RANGE)),
        fiber_g: record.fiber_g.map(|v| clamp_f64(v, &FIBER_RANGE)),
        sugar_g: record.sugar_g.map(|v| clamp_f64(v, &SUGAR_RANGE)),
    }
}

/// Validate a raw search query
///
/// Returns at most one error: empty, too short, or too long (after trimming).
#[must_use]
pub fn validate_search_query(query: &str) -> Vec<ValidationError> {
    let trimmed = query.trim();
    let length = trimmed.chars().count();

    if trimmed.is_empty() {
        vec![ValidationError::EmptySearchQuery]
    } else if length < SEARCH_QUERY_MIN_LENGTH {
        vec![ValidationError::SearchQueryTooShort(trimmed.to_owned())]
    } else if length > SEARCH_QUERY_MAX_LENGTH {
        vec![ValidationError::SearchQueryTooLong(trimmed.to_owned())]
    } else {
        Vec::new()
    }
}

/// Trim a query and collapse internal whitespace runs to single spaces
#[must_use]
pub fn sanitize_search_query(query: &str) -> String {
    collapse_whitespace(query)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn sanitize_name(name: &str) -> Option<String> {
    let collapsed = collapse_whitespace(name);
    if collapsed.is_empty() {
        return None;
    }
    let max = *NAME_LENGTH_RANGE.end();
    if collapsed.chars().count() <= max {
        return Some(collapsed);
    }
    let truncated: String = collapsed.chars().take(max).collect();
    Some(truncated.trim_end().to_owned())
}

fn check_f64(
    value: Option<f64>,
    range: &RangeInclusive<f64>,
    make_error: fn(f64) -> ValidationError,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(v) = value {
        if !range.contains(&v) {
            errors.push(make_error(v));
        }
    }
}

fn check_i64(
    value: Option<i64>,
    range: &RangeInclusive<i64>,
    make_error: fn(i64) -> ValidationError,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(v) = value {
        if !range.contains(&v) {
            errors.push(make_error(v));
        }
    }
}

fn clamp_f64(value: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    }
}

fn clamp_i64(value: i64, range: &RangeInclusive<i64>) -> i64 {
    value.clamp(*range.start(), *range.end())
}
