// ABOUTME: Progress view constants for aggregation windows, labels, and state messages
// ABOUTME: Shared by the progress calculator and the progress tracker state machine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Days in each weekly comparison window
pub const WEEK_WINDOW_DAYS: i64 = 7;

/// Comparison label for the weekly view
pub const WEEKLY_COMPARISON_LABEL: &str = "vs Last 7 Days";

/// Comparison label for the monthly view
pub const MONTHLY_COMPARISON_LABEL: &str = "vs Last Month";

/// Tab title for the weekly view
pub const WEEKLY_TAB_TITLE: &str = "Last 7 Days";

/// Tab title for the monthly view
pub const MONTHLY_TAB_TITLE: &str = "Last 30 Days";

/// `chrono` format for weekday labels ("Mon")
pub const WEEKDAY_LABEL_FORMAT: &str = "%a";

/// `chrono` format for month labels ("Jan")
pub const MONTH_LABEL_FORMAT: &str = "%b";

/// Message shown while a calculation is running
pub const LOADING_MESSAGE: &str = "Calculating progress...";
