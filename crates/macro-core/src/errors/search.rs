// ABOUTME: Error type for the nutrition search pipeline
// ABOUTME: Separates caller-fixable validation failures from retryable remote failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ValidationError};
use thiserror::Error;

/// Failure of a nutrition search
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query broke a validation rule; the caller must change the input
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The remote lookup failed; retrying may succeed
    #[error(transparent)]
    Remote(#[from] AppError),
}

impl SearchError {
    /// Whether retrying the same search may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Remote(error) => error.is_retryable(),
        }
    }

    /// The violated rule, when this is a validation failure
    #[must_use]
    pub const fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(error) => Some(error),
            Self::Remote(_) => None,
        }
    }
}

impl From<SearchError> for AppError {
    fn from(error: SearchError) -> Self {
        match error {
            SearchError::Validation(violation) => violation.into(),
            SearchError::Remote(error) => error,
        }
    }
}
