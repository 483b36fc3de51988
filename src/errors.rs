// ABOUTME: Unified error handling re-exported from macro-core
// ABOUTME: Preserves crate::errors import paths for AppError, ErrorCode, and domain errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Infrastructure failures are [`AppError`] values carrying an [`ErrorCode`];
//! validation, search and progress failures have their own enums so callers
//! can match on them.

pub use macro_core::errors::*;
