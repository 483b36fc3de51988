// ABOUTME: Per-day grouping of logged entries by meal type with nutrient totals
// ABOUTME: Every meal type is present in display order even when nothing was logged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{DayCalendar, LoggedFoodEntry, MealType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Summed nutrients over a set of entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Total carbohydrates in grams
    pub carbohydrates_total_g: f64,
    /// Total fat in grams
    pub fat_total_g: f64,
    /// Fiber in grams
    pub fiber_g: f64,
    /// Sugar in grams
    pub sugar_g: f64,
    /// Cholesterol in milligrams
    pub cholesterol_mg: i64,
    /// Sodium in milligrams
    pub sodium_mg: i64,
    /// Potassium in milligrams
    pub potassium_mg: i64,
}

impl NutrientTotals {
    /// Sum the nutrients of every entry
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a LoggedFoodEntry>) -> Self {
        let mut totals = Self::default();
        for entry in entries {
            totals += entry;
        }
        totals
    }
}

impl AddAssign<&LoggedFoodEntry> for NutrientTotals {
    fn add_assign(&mut self, entry: &LoggedFoodEntry) {
        self.calories += entry.calories;
        self.protein_g += entry.protein_g;
        self.carbohydrates_total_g += entry.carbohydrates_total_g;
        self.fat_total_g += entry.fat_total_g;
        self.fiber_g += entry.fiber_g;
        self.sugar_g += entry.sugar_g;
        self.cholesterol_mg = self.cholesterol_mg.saturating_add(entry.cholesterol_mg);
        self.sodium_mg = self.sodium_mg.saturating_add(entry.sodium_mg);
        self.potassium_mg = self.potassium_mg.saturating_add(entry.potassium_mg);
    }
}

impl AddAssign<&Self> for NutrientTotals {
    fn add_assign(&mut self, other: &Self) {
        self.calories += other.calories;
        self.protein_g += other.protein_g;
        self.carbohydrates_total_g += other.carbohydrates_total_g;
        self.fat_total_g += other.fat_total_g;
        self.fiber_g += other.fiber_g;
        self.sugar_g += other.sugar_g;
        self.cholesterol_mg = self.cholesterol_mg.saturating_add(other.cholesterol_mg);
        self.sodium_mg = self.sodium_mg.saturating_add(other.sodium_mg);
        self.potassium_mg = self.potassium_mg.saturating_add(other.potassium_mg);
    }
}

/// Entries of one meal on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSummary {
    /// The meal
    pub meal_type: MealType,
    /// Entries in chronological order
    pub entries: Vec<LoggedFoodEntry>,
    /// Sum over `entries`
    pub totals: NutrientTotals,
}

/// Everything logged on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// The calendar day
    pub date: NaiveDate,
    /// One summary per meal type, in [`MealType::ALL`] order
    pub meals: Vec<MealSummary>,
    /// Sum over every meal
    pub totals: NutrientTotals,
}

impl DailySummary {
    /// Group the entries falling on `date` by meal type
    ///
    /// Entries recorded on other days are ignored.
    #[must_use]
    pub fn build(date: NaiveDate, entries: &[LoggedFoodEntry], calendar: &DayCalendar) -> Self {
        let mut day_entries: Vec<&LoggedFoodEntry> = entries
            .iter()
            .filter(|entry| calendar.day_of(entry.recorded_date) == date)
            .collect();
        day_entries.sort_by_key(|entry| entry.recorded_date);

        let mut totals = NutrientTotals::default();
        let meals = MealType::ALL
            .iter()
            .map(|&meal_type| {
                let meal_entries: Vec<LoggedFoodEntry> = day_entries
                    .iter()
                    .filter(|entry| entry.meal_type == meal_type)
                    .map(|&entry| entry.clone())
                    .collect();
                let meal_totals = NutrientTotals::from_entries(&meal_entries);
                totals += &meal_totals;
                MealSummary {
                    meal_type,
                    entries: meal_entries,
                    totals: meal_totals,
                }
            })
            .collect();

        Self {
            date,
            meals,
            totals,
        }
    }

    /// Summary of one meal
    #[must_use]
    pub fn meal(&self, meal_type: MealType) -> Option<&MealSummary> {
        self.meals.iter().find(|meal| meal.meal_type == meal_type)
    }

    /// Number of entries across all meals
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.meals.iter().map(|meal| meal.entries.len()).sum()
    }

    /// Whether nothing was logged that day
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::NutritionQueryResult;
    use chrono::{TimeZone, Utc};

    fn entry(hour: u32, day: u32, meal_type: MealType, calories: f64, sodium_mg: i64) -> LoggedFoodEntry {
        LoggedFoodEntry::from_query_result(
            &NutritionQueryResult {
                calories: Some(calories),
                protein_g: Some(10.0),
                sodium_mg: Some(sodium_mg),
                ..Default::default()
            },
            Some(Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()),
            meal_type,
        )
    }

    #[test]
    fn test_groups_by_meal_in_display_order() {
        let entries = vec![
            entry(19, 17, MealType::Dinner, 600.0, 300),
            entry(8, 17, MealType::Breakfast, 350.0, 120),
            entry(7, 17, MealType::Breakfast, 100.0, 5),
            entry(12, 16, MealType::Lunch, 900.0, 1_000),
        ];
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let summary = DailySummary::build(date, &entries, &DayCalendar::utc());

        let order: Vec<_> = summary.meals.iter().map(|m| m.meal_type).collect();
        assert_eq!(order, MealType::ALL.to_vec());
        assert_eq!(summary.entry_count(), 3);

        let breakfast = summary.meal(MealType::Breakfast).unwrap();
        assert_eq!(breakfast.entries.len(), 2);
        assert!(breakfast.entries[0].recorded_date < breakfast.entries[1].recorded_date);
        assert!((breakfast.totals.calories - 450.0).abs() < f64::EPSILON);
        assert_eq!(breakfast.totals.sodium_mg, 125);

        assert!(summary.meal(MealType::Lunch).unwrap().entries.is_empty());
        assert!((summary.totals.calories - 1_050.0).abs() < f64::EPSILON);
        assert!((summary.totals.protein_g - 30.0).abs() < f64::EPSILON);
        assert_eq!(summary.totals.sodium_mg, 425);
    }

    #[test]
    fn test_empty_day() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let summary = DailySummary::build(date, &[], &DayCalendar::utc());

        assert!(summary.is_empty());
        assert_eq!(summary.meals.len(), 4);
        assert_eq!(summary.totals, NutrientTotals::default());
    }
}
