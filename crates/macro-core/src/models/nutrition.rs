// ABOUTME: Nutrition lookup records, persisted food entries, and meal types
// ABOUTME: Centralizes the optional-to-required mapping applied when an entry is saved
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Name stored when the lookup result has none
pub const UNKNOWN_FOOD_NAME: &str = "Unknown";

/// Type of meal
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    #[default]
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// All meal types in the order a day is displayed
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }

    /// Capitalized name for display
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            other => Err(AppError::invalid_input(format!(
                "Unknown meal type '{other}'; expected breakfast, lunch, dinner or snack"
            ))),
        }
    }
}

/// One nutrient record returned by the remote lookup
///
/// Every field is optional because the API may omit any of them. Field names
/// match the snake_case wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionQueryResult {
    /// Food name as reported by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Energy in kcal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Serving size in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size_g: Option<f64>,
    /// Total fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_total_g: Option<f64>,
    /// Saturated fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_saturated_g: Option<f64>,
    /// Protein in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    /// Sodium in milligrams
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_milligrams"
    )]
    pub sodium_mg: Option<i64>,
    /// Potassium in milligrams
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_milligrams"
    )]
    pub potassium_mg: Option<i64>,
    /// Cholesterol in milligrams
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_milligrams"
    )]
    pub cholesterol_mg: Option<i64>,
    /// Total carbohydrates in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrates_total_g: Option<f64>,
    /// Fiber in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber_g: Option<f64>,
    /// Sugar in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar_g: Option<f64>,
}

/// Milligram fields are integral in the model but the API occasionally sends decimals
fn deserialize_milligrams<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(|mg| mg.round() as i64))
}

/// A food record accepted by the user and persisted locally
///
/// Entries are immutable once saved; they are only ever deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedFoodEntry {
    /// Unique identifier generated at save time
    pub id: Uuid,
    /// Food name
    pub name: String,
    /// Energy in kcal
    pub calories: f64,
    /// Serving size in grams
    pub serving_size_g: f64,
    /// Total fat in grams
    pub fat_total_g: f64,
    /// Saturated fat in grams
    pub fat_saturated_g: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Sodium in milligrams
    pub sodium_mg: i64,
    /// Potassium in milligrams
    pub potassium_mg: i64,
    /// Cholesterol in milligrams
    pub cholesterol_mg: i64,
    /// Total carbohydrates in grams
    pub carbohydrates_total_g: f64,
    /// Fiber in grams
    pub fiber_g: f64,
    /// Sugar in grams
    pub sugar_g: f64,
    /// When the food was eaten
    pub recorded_date: DateTime<Utc>,
    /// Meal the food belongs to
    pub meal_type: MealType,
}

impl LoggedFoodEntry {
    /// Build a persisted entry from a lookup result
    ///
    /// Defaults: `"Unknown"` for a missing name, `0` for every missing nutrient,
    /// the current instant when no date is given. A fresh id is generated.
    #[must_use]
    pub fn from_query_result(
        result: &NutritionQueryResult,
        recorded_date: Option<DateTime<Utc>>,
        meal_type: MealType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: result
                .name
                .clone()
                .unwrap_or_else(|| UNKNOWN_FOOD_NAME.to_owned()),
            calories: result.calories.unwrap_or(0.0),
            serving_size_g: result.serving_size_g.unwrap_or(0.0),
            fat_total_g: result.fat_total_g.unwrap_or(0.0),
            fat_saturated_g: result.fat_saturated_g.unwrap_or(0.0),
            protein_g: result.protein_g.unwrap_or(0.0),
            sodium_mg: result.sodium_mg.unwrap_or(0),
            potassium_mg: result.potassium_mg.unwrap_or(0),
            cholesterol_mg: result.cholesterol_mg.unwrap_or(0),
            carbohydrates_total_g: result.carbohydrates_total_g.unwrap_or(0.0),
            fiber_g: result.fiber_g.unwrap_or(0.0),
            sugar_g: result.sugar_g.unwrap_or(0.0),
            recorded_date: recorded_date.unwrap_or_else(Utc::now),
            meal_type,
        }
    }
}
