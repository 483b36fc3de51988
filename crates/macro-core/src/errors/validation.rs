// ABOUTME: Validation error kinds for nutrient records and search queries
// ABOUTME: Each variant carries the offending value and describes the allowed range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};
use thiserror::Error;

/// A violated validation rule together with the value that broke it
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Calories outside [0, 10,000]
    #[error("Invalid calories: {0}. Must be between 0 and 10,000.")]
    InvalidCalories(f64),
    /// Protein outside [0, 1,000] g
    #[error("Invalid protein: {0}g. Must be between 0 and 1,000g.")]
    InvalidProtein(f64),
    /// Carbohydrates outside [0, 2,000] g
    #[error("Invalid carbohydrates: {0}g. Must be between 0 and 2,000g.")]
    InvalidCarbs(f64),
    /// Fat outside [0, 500] g
    #[error("Invalid fat: {0}g. Must be between 0 and 500g.")]
    InvalidFat(f64),
    /// Serving size outside [0, 10,000] g
    #[error("Invalid serving size: {0}g. Must be between 0 and 10,000g.")]
    InvalidServingSize(f64),
    /// Sodium outside [0, 50,000] mg
    #[error("Invalid sodium: {0}mg. Must be between 0 and 50,000mg.")]
    InvalidSodium(i64),
    /// Potassium outside [0, 10,000] mg
    #[error("Invalid potassium: {0}mg. Must be between 0 and 10,000mg.")]
    InvalidPotassium(i64),
    /// Cholesterol outside [0, 5,000] mg
    #[error("Invalid cholesterol: {0}mg. Must be between 0 and 5,000mg.")]
    InvalidCholesterol(i64),
    /// Fiber outside [0, 500] g
    #[error("Invalid fiber: {0}g. Must be between 0 and 500g.")]
    InvalidFiber(f64),
    /// Sugar outside [0, 1,000] g
    #[error("Invalid sugar: {0}g. Must be between 0 and 1,000g.")]
    InvalidSugar(f64),
    /// Name shorter than 1 or longer than 100 characters
    #[error("Invalid food name: '{0}'. Must be between 1 and 100 characters.")]
    InvalidName(String),
    /// Query is empty after trimming
    #[error("Search query cannot be empty.")]
    EmptySearchQuery,
    /// Trimmed query shorter than 2 characters
    #[error("Search query '{0}' is too short. Must be at least 2 characters.")]
    SearchQueryTooShort(String),
    /// Trimmed query longer than 200 characters
    #[error("Search query is too long. Must be at most 200 characters.")]
    SearchQueryTooLong(String),
}

impl ValidationError {
    /// Whether this error concerns a search query rather than a nutrient record
    #[must_use]
    pub const fn is_search_query_error(&self) -> bool {
        matches!(
            self,
            Self::EmptySearchQuery | Self::SearchQueryTooShort(_) | Self::SearchQueryTooLong(_)
        )
    }

    /// Error code used when this violation is reported as an [`AppError`]
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptySearchQuery | Self::SearchQueryTooShort(_) | Self::SearchQueryTooLong(_) => {
                ErrorCode::InvalidInput
            }
            Self::InvalidName(_) => ErrorCode::InvalidFormat,
            _ => ErrorCode::ValueOutOfRange,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        Self::new(error.error_code(), error.to_string())
    }
}
