// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for macro-tracker
// ABOUTME: Provides access to food logging and progress commands

pub mod food;
pub mod progress;
