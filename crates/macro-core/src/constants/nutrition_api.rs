// ABOUTME: Remote nutrition lookup constants for endpoint, auth header, and timeouts
// ABOUTME: Defaults for the CalorieNinjas-compatible nutrition API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Service name used in error messages and logs
pub const SERVICE_NAME: &str = "Nutrition API";

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.calorieninjas.com";

/// Path of the natural-language nutrition endpoint
pub const NUTRITION_PATH: &str = "/v1/nutrition";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Query parameter carrying the search text
pub const QUERY_PARAM: &str = "query";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
