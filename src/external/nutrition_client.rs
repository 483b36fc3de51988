// ABOUTME: HTTP client for the natural-language nutrition API plus an offline mock
// ABOUTME: Maps transport, status, and decode failures onto external-service error codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition API Client
//!
//! Sends the meal description to `GET {base_url}/v1/nutrition?query=...` with
//! the API key in the `X-Api-Key` header. The response body is a JSON object
//! holding an `items` list; older deployments call it `foods`.
//!
//! # Example
//! ```rust,no_run
//! use macro_tracker::external::{NutritionApiClient, NutritionClientConfig, NutritionLookup};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NutritionClientConfig {
//!     api_key: "your_api_key".to_owned(),
//!     ..Default::default()
//! };
//!
//! let client = NutritionApiClient::new(config)?;
//! let items = client.fetch("250 grams of chicken breast").await?;
//! # Ok(())
//! # }
//! ```

use super::NutritionLookup;
use crate::constants::nutrition_api::{
    API_KEY_HEADER, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, NUTRITION_PATH, QUERY_PARAM,
    SERVICE_NAME,
};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::NutritionQueryResult;
use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Nutrition API client configuration
#[derive(Clone)]
pub struct NutritionClientConfig {
    /// API key sent in the `X-Api-Key` header
    pub api_key: String,
    /// Base URL without a trailing path (default: <https://api.calorieninjas.com>)
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for NutritionClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// The key stays out of logs
impl fmt::Debug for NutritionClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NutritionClientConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NutritionResponse {
    items: Option<Vec<NutritionQueryResult>>,
    foods: Option<Vec<NutritionQueryResult>>,
}

/// Decode a response body into nutrient records
///
/// A body without an `items` (or `foods`) list decodes to an empty list.
///
/// # Errors
///
/// Returns `ExternalServiceError` if the body is not a JSON object of the expected shape
pub fn decode_items(body: &[u8]) -> AppResult<Vec<NutritionQueryResult>> {
    let response: NutritionResponse = serde_json::from_slice(body).map_err(|e| {
        AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}")).with_source(e)
    })?;

    Ok(response.items.or(response.foods).unwrap_or_default())
}

fn status_error(status: StatusCode, body: &str) -> AppError {
    let message = format!("HTTP {status}: {body}");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AppError::new(ErrorCode::ExternalAuthFailed, format!("{SERVICE_NAME}: {message}"))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            AppError::new(ErrorCode::ExternalRateLimited, format!("{SERVICE_NAME}: {message}"))
        }
        _ => AppError::external_service(SERVICE_NAME, message),
    }
}

/// Natural-language nutrition API client
pub struct NutritionApiClient {
    config: NutritionClientConfig,
    http_client: reqwest::Client,
}

impl NutritionApiClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn new(config: NutritionClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Full endpoint URL
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}{NUTRITION_PATH}",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl NutritionLookup for NutritionApiClient {
    async fn fetch(&self, query: &str) -> AppResult<Vec<NutritionQueryResult>> {
        if self.config.api_key.is_empty() {
            warn!("Nutrition API key is not configured; the request will likely be rejected");
        }

        let response = self
            .http_client
            .get(self.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .query(&[(QUERY_PARAM, query)])
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE_NAME, e.to_string()).with_source(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE_NAME, e.to_string()).with_source(e))?;

        let items = decode_items(&body)?;
        debug!(query = %query, count = items.len(), "Nutrition API returned items");
        Ok(items)
    }
}

/// Mock nutrition client answering from canned records (no API calls)
///
/// A query matches every fixture whose name appears in it, case-insensitively,
/// so "2 eggs and an apple" returns both the egg and the apple.
pub struct MockNutritionClient {
    fixtures: Vec<NutritionQueryResult>,
}

impl MockNutritionClient {
    /// Create a mock client with a few common foods
    #[must_use]
    pub fn new() -> Self {
        Self {
            fixtures: vec![
                fixture("chicken breast", 165.0, 100.0, 3.6, 1.0, 31.0, 74, 256, 85, 0.0, 0.0, 0.0),
                fixture("apple", 52.0, 100.0, 0.2, 0.0, 0.3, 1, 107, 0, 13.8, 2.4, 10.4),
                fixture("rice", 130.0, 100.0, 0.3, 0.1, 2.7, 1, 35, 0, 28.2, 0.4, 0.1),
                fixture("egg", 155.0, 100.0, 10.6, 3.3, 12.6, 124, 126, 373, 1.1, 0.0, 1.1),
                fixture("banana", 89.0, 100.0, 0.3, 0.1, 1.1, 1, 358, 0, 22.8, 2.6, 12.2),
            ],
        }
    }

    /// Create a mock client answering from the given records only
    #[must_use]
    pub const fn with_fixtures(fixtures: Vec<NutritionQueryResult>) -> Self {
        Self { fixtures }
    }
}

impl Default for MockNutritionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NutritionLookup for MockNutritionClient {
    async fn fetch(&self, query: &str) -> AppResult<Vec<NutritionQueryResult>> {
        let query_lower = query.to_lowercase();
        Ok(self
            .fixtures
            .iter()
            .filter(|food| {
                food.name
                    .as_deref()
                    .is_some_and(|name| query_lower.contains(&name.to_lowercase()))
            })
            .cloned()
            .collect())
    }
}

#[allow(clippy::too_many_arguments)]
fn fixture(
    name: &str,
    calories: f64,
    serving_size_g: f64,
    fat_total_g: f64,
    fat_saturated_g: f64,
    protein_g: f64,
    sodium_mg: i64,
    potassium_mg: i64,
    cholesterol_mg: i64,
    carbohydrates_total_g: f64,
    fiber_g: f64,
    sugar_g: f64,
) -> NutritionQueryResult {
    NutritionQueryResult {
        name: Some(name.to_owned()),
        calories: Some(calories),
        serving_size_g: Some(serving_size_g),
        fat_total_g: Some(fat_total_g),
        fat_saturated_g: Some(fat_saturated_g),
        protein_g: Some(protein_g),
        sodium_mg: Some(sodium_mg),
        potassium_mg: Some(potassium_mg),
        cholesterol_mg: Some(cholesterol_mg),
        carbohydrates_total_g: Some(carbohydrates_total_g),
        fiber_g: Some(fiber_g),
        sugar_g: Some(sugar_g),
    }
}
