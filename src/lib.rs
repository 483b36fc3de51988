// ABOUTME: Main library entry point for the macro-tracker nutrition core
// ABOUTME: Food search with caching, local entry storage, and progress aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macro Tracker
//!
//! A personal nutrition-tracking core. Free-text meal descriptions such as
//! "250 grams of chicken breast" are sent to a natural-language nutrition API,
//! the returned records are checked against plausible ranges, and the entries
//! the user accepts are saved locally by date and meal type. Saved entries are
//! aggregated into weekly and monthly progress series.
//!
//! ## Architecture
//!
//! - **Validation**: range checks and sanitization of records and queries
//! - **Cache**: normalized-query LRU cache with a TTL
//! - **External**: the remote nutrition lookup and an offline mock
//! - **Database**: in-memory and `SQLite` food stores
//! - **Services**: the repository, the search session, and the progress tracker
//! - **Intelligence**: progress aggregation and daily summaries
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use macro_tracker::config::AppConfig;
//! use macro_tracker::context::AppContext;
//! use macro_tracker::models::MealType;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let context = AppContext::from_config(config, false).await?;
//!
//! let repository = context.repository();
//! let items = repository.search_nutrition("2 eggs and toast").await?;
//! repository.save_food_items(&items, Utc::now(), MealType::Breakfast).await;
//! # Ok(())
//! # }
//! ```

/// Search result cache keyed by normalized query
pub mod cache;

/// Configuration loaded from environment variables
pub mod config;

/// Application constants organized by domain
pub mod constants;

/// Dependency wiring for the binary
pub mod context;

/// Food stores (in-memory and `SQLite`)
pub mod database;

/// Unified error handling system with standard error codes
pub mod errors;

/// External API clients (nutrition lookup)
pub mod external;

/// Progress aggregation and daily summaries
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Core data models
pub mod models;

/// Domain services (repository, search session, progress tracker)
pub mod services;

/// Validation and sanitization rules
pub mod validation;
