// ABOUTME: Search cache constants for TTL, capacity, and query normalization
// ABOUTME: Defaults used when configuration does not override them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Lookup results stay valid for one hour
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3_600;

/// Maximum number of cached queries before least-recently-used eviction
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 100;

/// Words dropped from queries when building cache keys
pub const FILLER_WORDS: [&str; 4] = ["of", "the", "a", "an"];

/// Leading quantities ("250 grams") are stripped so portions share a key
pub const QUANTITY_PATTERN: &str = r"\d+\s*";
