// ABOUTME: Constants module re-exported from macro-core
// ABOUTME: Domain-separated constants for caching, validation, the nutrition API, and progress

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

pub use macro_core::constants::*;
