// ABOUTME: Weekly and monthly progress aggregation over logged food entries
// ABOUTME: Produces chart series, latest-bucket totals, and percent-change comparisons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Progress Calculation Module
//!
//! Two views are supported:
//!
//! - **Weekly**: one bucket per calendar day for the last seven days (today
//!   included), compared against the seven days before that.
//! - **Monthly**: one bucket per calendar month that has entries, each holding
//!   the average per logged day, compared month over month.
//!
//! Only calories, protein and fat are charted. The current instant is an
//! argument so callers decide what "today" is.

use crate::constants::progress::{
    MONTHLY_COMPARISON_LABEL, MONTHLY_TAB_TITLE, MONTH_LABEL_FORMAT, WEEKDAY_LABEL_FORMAT,
    WEEKLY_COMPARISON_LABEL, WEEKLY_TAB_TITLE, WEEK_WINDOW_DAYS,
};
use crate::errors::{AppError, ProgressError};
use crate::models::{DayCalendar, LoggedFoodEntry};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Progress view selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTab {
    /// Last seven days, one bucket per day
    #[default]
    Weekly,
    /// One bucket per month with entries
    Monthly,
}

impl ProgressTab {
    /// Both tabs in display order
    pub const ALL: [Self; 2] = [Self::Weekly, Self::Monthly];

    /// Tab title shown to the user
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Weekly => WEEKLY_TAB_TITLE,
            Self::Monthly => MONTHLY_TAB_TITLE,
        }
    }

    /// Label describing what the percent changes compare against
    #[must_use]
    pub const fn comparison_label(&self) -> &'static str {
        match self {
            Self::Weekly => WEEKLY_COMPARISON_LABEL,
            Self::Monthly => MONTHLY_COMPARISON_LABEL,
        }
    }
}

impl fmt::Display for ProgressTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for ProgressTab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            other => Err(AppError::invalid_input(format!(
                "Unknown progress tab '{other}'; expected weekly or monthly"
            ))),
        }
    }
}

/// Latest-bucket totals and percent changes against the comparison window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionData {
    /// Calories in the latest bucket, truncated
    pub calories: i64,
    /// Protein grams in the latest bucket, truncated
    pub protein: i64,
    /// Fat grams in the latest bucket, truncated
    pub fat: i64,
    /// Percent change of average calories
    pub calories_change: i64,
    /// Percent change of average protein
    pub protein_change: i64,
    /// Percent change of average fat
    pub fat_change: i64,
    /// What the changes are relative to ("vs Last 7 Days")
    pub comparison_label: String,
}

/// Chart series; every series has one value per label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Calories per bucket
    pub calories: Vec<f64>,
    /// Protein grams per bucket
    pub protein: Vec<f64>,
    /// Fat grams per bucket
    pub fat: Vec<f64>,
    /// Bucket labels ("Mon", "Jan")
    pub labels: Vec<String>,
}

impl ChartData {
    /// Whether the chart has no data points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calories.is_empty() && self.protein.is_empty() && self.fat.is_empty()
    }

    /// Number of buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are enough buckets to draw a trend line
    #[must_use]
    pub fn has_sufficient_data(&self) -> bool {
        self.calories.len() >= 2 && self.protein.len() >= 2 && self.fat.len() >= 2
    }
}

/// Output of a successful progress calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressCalculationResult {
    /// Summary card values
    pub nutrition_data: NutritionData,
    /// Chart series
    pub chart_data: ChartData,
}

/// Aggregates logged entries into progress views
pub trait ProgressCalculationService: Send + Sync {
    /// Aggregate `entries` for the tab as of `now`
    ///
    /// # Errors
    ///
    /// - `NoData` when `entries` is empty
    /// - `DataCorrupted` when an entry has negative or non-finite calories, protein or fat
    /// - `InsufficientData` when nothing falls inside the charted window
    /// - `CalculationFailed` when the arithmetic produces a non-finite value
    fn calculate_progress(
        &self,
        tab: ProgressTab,
        entries: &[LoggedFoodEntry],
        now: DateTime<Utc>,
    ) -> Result<ProgressCalculationResult, ProgressError>;
}

/// Default progress calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressCalculator {
    calendar: DayCalendar,
}

#[derive(Debug, Default)]
struct MacroSeries {
    calories: Vec<f64>,
    protein: Vec<f64>,
    fat: Vec<f64>,
}

impl MacroSeries {
    fn push(&mut self, calories: f64, protein: f64, fat: f64) {
        self.calories.push(calories);
        self.protein.push(protein);
        self.fat.push(fat);
    }
}

#[derive(Debug, Default)]
struct MonthBucket {
    calories: f64,
    protein: f64,
    fat: f64,
    days: HashSet<NaiveDate>,
}

impl ProgressCalculator {
    /// Calculator that groups entries by day using the given calendar
    #[must_use]
    pub const fn new(calendar: DayCalendar) -> Self {
        Self { calendar }
    }

    fn weekly(
        &self,
        entries: &[LoggedFoodEntry],
        now: DateTime<Utc>,
    ) -> Result<ProgressCalculationResult, ProgressError> {
        let today = self.calendar.day_of(now);
        let window = |offset_days: i64| -> Vec<NaiveDate> {
            (0..WEEK_WINDOW_DAYS)
                .rev()
                .map(|back| today - Duration::days(back + offset_days))
                .collect()
        };
        let current_days = window(0);
        let previous_days = window(WEEK_WINDOW_DAYS);

        let mut daily_totals: BTreeMap<NaiveDate, (f64, f64, f64)> = BTreeMap::new();
        for entry in entries {
            let totals = daily_totals
                .entry(self.calendar.day_of(entry.recorded_date))
                .or_default();
            totals.0 += entry.calories;
            totals.1 += entry.protein_g;
            totals.2 += entry.fat_total_g;
        }

        let series_for = |days: &[NaiveDate]| {
            let mut series = MacroSeries::default();
            for day in days {
                let (calories, protein, fat) = daily_totals.get(day).copied().unwrap_or_default();
                series.push(calories, protein, fat);
            }
            series
        };
        let current = series_for(&current_days);
        let previous = series_for(&previous_days);

        if !current.calories.iter().any(|&calories| calories > 0.0) {
            return Err(ProgressError::InsufficientData);
        }

        let labels = current_days
            .iter()
            .map(|day| day.format(WEEKDAY_LABEL_FORMAT).to_string())
            .collect();

        let nutrition_data = NutritionData {
            calories: truncate(current.calories.last().copied())?,
            protein: truncate(current.protein.last().copied())?,
            fat: truncate(current.fat.last().copied())?,
            calories_change: percent_change(&current.calories, &previous.calories)?,
            protein_change: percent_change(&current.protein, &previous.protein)?,
            fat_change: percent_change(&current.fat, &previous.fat)?,
            comparison_label: ProgressTab::Weekly.comparison_label().to_owned(),
        };

        Ok(ProgressCalculationResult {
            nutrition_data,
            chart_data: ChartData {
                calories: current.calories,
                protein: current.protein,
                fat: current.fat,
                labels,
            },
        })
    }

    fn monthly(
        &self,
        entries: &[LoggedFoodEntry],
    ) -> Result<ProgressCalculationResult, ProgressError> {
        let mut months: BTreeMap<(i32, u32), MonthBucket> = BTreeMap::new();
        for entry in entries {
            let day = self.calendar.day_of(entry.recorded_date);
            let bucket = months.entry((day.year(), day.month())).or_default();
            bucket.calories += entry.calories;
            bucket.protein += entry.protein_g;
            bucket.fat += entry.fat_total_g;
            bucket.days.insert(day);
        }

        if months.is_empty() {
            return Err(ProgressError::InsufficientData);
        }

        let mut series = MacroSeries::default();
        let mut labels = Vec::with_capacity(months.len());
        for (&(year, month), bucket) in &months {
            let logged_days = bucket.days.len().max(1) as f64;
            series.push(
                bucket.calories / logged_days,
                bucket.protein / logged_days,
                bucket.fat / logged_days,
            );
            let first_of_month =
                NaiveDate::from_ymd_opt(year, month, 1).ok_or(ProgressError::CalculationFailed)?;
            labels.push(first_of_month.format(MONTH_LABEL_FORMAT).to_string());
        }

        let month_over_month = |values: &[f64]| -> Result<i64, ProgressError> {
            match values {
                [.., previous, current] => percent_change(&[*current], &[*previous]),
                _ => Ok(0),
            }
        };

        let nutrition_data = NutritionData {
            calories: truncate(series.calories.last().copied())?,
            protein: truncate(series.protein.last().copied())?,
            fat: truncate(series.fat.last().copied())?,
            calories_change: month_over_month(&series.calories)?,
            protein_change: month_over_month(&series.protein)?,
            fat_change: month_over_month(&series.fat)?,
            comparison_label: ProgressTab::Monthly.comparison_label().to_owned(),
        };

        Ok(ProgressCalculationResult {
            nutrition_data,
            chart_data: ChartData {
                calories: series.calories,
                protein: series.protein,
                fat: series.fat,
                labels,
            },
        })
    }
}

impl ProgressCalculationService for ProgressCalculator {
    fn calculate_progress(
        &self,
        tab: ProgressTab,
        entries: &[LoggedFoodEntry],
        now: DateTime<Utc>,
    ) -> Result<ProgressCalculationResult, ProgressError> {
        if entries.is_empty() {
            return Err(ProgressError::NoData);
        }

        let is_valid = |value: f64| value.is_finite() && value >= 0.0;
        if !entries
            .iter()
            .all(|e| is_valid(e.calories) && is_valid(e.protein_g) && is_valid(e.fat_total_g))
        {
            return Err(ProgressError::DataCorrupted);
        }

        match tab {
            ProgressTab::Weekly => self.weekly(entries, now),
            ProgressTab::Monthly => self.monthly(entries),
        }
    }
}

/// Truncated percent change between the averages of two series
///
/// Returns 0 when the previous average is 0 (including an empty previous series).
///
/// # Errors
///
/// Returns `CalculationFailed` if the result is not finite
#[allow(clippy::float_cmp)]
pub fn percent_change(current: &[f64], previous: &[f64]) -> Result<i64, ProgressError> {
    let previous_avg = average(previous);
    if previous_avg == 0.0 {
        return Ok(0);
    }
    let change = (average(current) - previous_avg) / previous_avg * 100.0;
    if change.is_finite() {
        Ok(change.trunc() as i64)
    } else {
        Err(ProgressError::CalculationFailed)
    }
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn truncate(value: Option<f64>) -> Result<i64, ProgressError> {
    let value = value.unwrap_or(0.0);
    if value.is_finite() {
        Ok(value.trunc() as i64)
    } else {
        Err(ProgressError::CalculationFailed)
    }
}
