// ABOUTME: Domain service layer coordinating lookup, cache, storage, and progress aggregation
// ABOUTME: Protocol-agnostic services reused by the CLI and by integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services receive their collaborators through constructors and never reach
//! for globals, so tests can swap any of them for a fake.

/// Transient search results awaiting confirmation
pub mod food_search;

/// Search pipeline and saved-entry management
pub mod nutrition_repository;

/// Progress view-state coordinator
pub mod progress_tracker;

pub use food_search::{FoodSearchSession, SearchOutcome};
pub use nutrition_repository::NutritionRepository;
pub use progress_tracker::{Clock, LoadingState, ProgressDataSource, ProgressState, ProgressTracker};
