// ABOUTME: Core types and constants for the macro-tracker nutrition core
// ABOUTME: Foundation crate with error handling, data models, validation rules, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macro Core
//!
//! Foundation crate providing shared types and constants for the macro-tracker
//! nutrition core. It has no I/O and no async runtime dependency, so everything
//! here can be unit tested in isolation.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Lookup results, persisted food entries, meal types, and the day calendar
//! - **validation**: Range checks and sanitization for nutrient records and search queries

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (lookup results, logged entries, meal types, calendar)
pub mod models;

/// Validation and sanitization rules for nutrient records and search queries
pub mod validation;
