// ABOUTME: Core data models re-exported from macro-core
// ABOUTME: Re-exports NutritionQueryResult, LoggedFoodEntry, MealType, and DayCalendar
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `NutritionQueryResult`: one record from the remote lookup, every field optional
//! - `LoggedFoodEntry`: a saved food with required fields, a meal type and a date
//! - `MealType`: breakfast, lunch, dinner or snack
//! - `DayCalendar`: which calendar day an instant belongs to

pub use macro_core::models::*;
