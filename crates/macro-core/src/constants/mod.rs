// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for caching, validation, the nutrition API, and progress views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Search cache constants (TTL, capacity, normalization)
pub mod cache;
/// Remote nutrition lookup constants (endpoint, header, timeouts)
pub mod nutrition_api;
/// Progress view constants (window sizes, labels, messages)
pub mod progress;
/// Validation ranges for nutrient fields and search queries
pub mod validation;
