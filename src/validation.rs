// ABOUTME: Validation and sanitization rules re-exported from macro-core
// ABOUTME: Range checks for nutrient records and length checks for search queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use macro_core::validation::*;
