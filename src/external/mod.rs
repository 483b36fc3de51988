// ABOUTME: External API client modules (natural-language nutrition lookup)
// ABOUTME: Defines the lookup trait the repository depends on and its implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External API Clients
//!
//! The repository only sees [`NutritionLookup`]. [`NutritionApiClient`] talks
//! to the remote service; [`MockNutritionClient`] answers from canned data for
//! offline runs and tests.

pub mod nutrition_client;

pub use nutrition_client::{
    decode_items, MockNutritionClient, NutritionApiClient, NutritionClientConfig,
};

use crate::errors::AppResult;
use crate::models::NutritionQueryResult;

/// Remote nutrition lookup for a free-text meal description
#[async_trait::async_trait]
pub trait NutritionLookup: Send + Sync {
    /// Fetch nutrient records for the query
    ///
    /// # Errors
    ///
    /// Returns an `AppError` with an external-service code when the service
    /// cannot be reached, rejects the request, or returns an unreadable body
    async fn fetch(&self, query: &str) -> AppResult<Vec<NutritionQueryResult>>;
}
