// ABOUTME: Core data models for nutrition lookup, logged food entries, and calendar days
// ABOUTME: Re-exports NutritionQueryResult, LoggedFoodEntry, MealType, and DayCalendar
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `NutritionQueryResult`: one record returned by the remote lookup; every field optional
//! - `LoggedFoodEntry`: a persisted, immutable food record with required fields
//! - `MealType`: breakfast, lunch, dinner, or snack
//! - `DayCalendar`: decides which calendar day an instant belongs to

mod calendar;
mod nutrition;

pub use calendar::DayCalendar;
pub use nutrition::{LoggedFoodEntry, MealType, NutritionQueryResult, UNKNOWN_FOOD_NAME};
