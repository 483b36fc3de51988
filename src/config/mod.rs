// ABOUTME: Configuration module for the nutrition API, local store, cache, and calendar settings
// ABOUTME: Loads typed settings from environment variables with validated defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! | Variable | Default |
//! |---|---|
//! | `NUTRITION_API_KEY` | empty |
//! | `NUTRITION_API_BASE_URL` | `https://api.calorieninjas.com` |
//! | `NUTRITION_API_TIMEOUT_SECS` | 10 |
//! | `DATABASE_URL` | `sqlite:./data/macro_tracker.db` |
//! | `NUTRITION_CACHE_TTL_SECS` | 3600 |
//! | `NUTRITION_CACHE_MAX_ENTRIES` | 100 |
//! | `CALENDAR_UTC_OFFSET_MINUTES` | 0 |

/// Environment variable parsing
pub mod environment;

pub use environment::{AppConfig, CacheSettings, DEFAULT_DATABASE_URL, MAX_UTC_OFFSET_MINUTES};
