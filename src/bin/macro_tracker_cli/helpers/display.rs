// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for macro-tracker
// ABOUTME: Provides consistent display functions for lookups, entries, summaries, and progress

use macro_tracker::{
    intelligence::{DailySummary, NutrientTotals},
    models::{DayCalendar, LoggedFoodEntry, MealType, NutritionQueryResult, UNKNOWN_FOOD_NAME},
    services::{LoadingState, ProgressState},
};

const RULE_WIDTH: usize = 72;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn grams(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |g| format!("{g:.1} g"))
}

/// Display lookup results
pub fn display_query_results(query: &str, results: &[NutritionQueryResult]) {
    if results.is_empty() {
        println!("No foods recognised in \"{query}\".");
        return;
    }

    println!("\nResults for \"{query}\"");
    println!("{}", rule());
    for result in results {
        println!(
            "{:<28} {:>8} kcal  P {:>9}  C {:>9}  F {:>9}",
            result.name.as_deref().unwrap_or(UNKNOWN_FOOD_NAME),
            result
                .calories
                .map_or_else(|| "-".to_owned(), |kcal| format!("{kcal:.0}")),
            grams(result.protein_g),
            grams(result.carbohydrates_total_g),
            grams(result.fat_total_g),
        );
    }
}

fn display_entry_line(entry: &LoggedFoodEntry, calendar: &DayCalendar) {
    let local = entry.recorded_date.with_timezone(&calendar.offset());
    println!(
        "{}  {}  {:<9} {:<24} {:>6.0} kcal",
        entry.id,
        local.format("%Y-%m-%d %H:%M"),
        entry.meal_type.display_name(),
        entry.name,
        entry.calories,
    );
}

/// Display saved entries, most recent first
pub fn display_entries(entries: &[LoggedFoodEntry], calendar: &DayCalendar) {
    if entries.is_empty() {
        println!("No saved entries.");
        return;
    }
    for entry in entries {
        display_entry_line(entry, calendar);
    }
    println!("{} entries", entries.len());
}

/// Display the entries created by a log command
pub fn display_saved_entries(meal: MealType, entries: &[LoggedFoodEntry]) {
    println!("\nLogged {} foods for {}", entries.len(), meal.display_name());
    println!("{}", rule());
    for entry in entries {
        println!("  {:<28} {:>6.0} kcal  ({})", entry.name, entry.calories, entry.id);
    }
    let totals = NutrientTotals::from_entries(entries);
    println!("  {:<28} {:>6.0} kcal", "Total", totals.calories);
}

fn display_totals(label: &str, totals: &NutrientTotals) {
    println!(
        "  {label:<12} {:>6.0} kcal  P {:>6.1} g  C {:>6.1} g  F {:>6.1} g  Na {:>5} mg",
        totals.calories,
        totals.protein_g,
        totals.carbohydrates_total_g,
        totals.fat_total_g,
        totals.sodium_mg,
    );
}

/// Display a day's entries grouped by meal
pub fn display_daily_summary(summary: &DailySummary) {
    println!("\nSummary for {}", summary.date.format("%A, %B %-d, %Y"));
    println!("{}", rule());
    for meal in &summary.meals {
        println!("{}", meal.meal_type.display_name());
        if meal.entries.is_empty() {
            println!("    (nothing logged)");
            continue;
        }
        for entry in &meal.entries {
            println!("    {:<28} {:>6.0} kcal", entry.name, entry.calories);
        }
        display_totals("Subtotal", &meal.totals);
    }
    println!("{}", rule());
    display_totals("Day total", &summary.totals);
}

fn signed_percent(change: i64) -> String {
    if change > 0 {
        format!("+{change}%")
    } else {
        format!("{change}%")
    }
}

/// Display the outcome of a progress calculation
pub fn display_progress(state: &ProgressState) {
    println!("\n{}", state.selected_tab.title());
    println!("{}", rule());

    match &state.loading_state {
        LoadingState::Loaded => {
            let data = &state.nutrition_data;
            println!(
                "Calories {:>6}  ({} {})",
                data.calories,
                signed_percent(data.calories_change),
                data.comparison_label
            );
            println!(
                "Protein  {:>6}g ({} {})",
                data.protein,
                signed_percent(data.protein_change),
                data.comparison_label
            );
            println!(
                "Fat      {:>6}g ({} {})",
                data.fat,
                signed_percent(data.fat_change),
                data.comparison_label
            );
            println!();

            let chart = &state.chart_data;
            for (index, label) in chart.labels.iter().enumerate() {
                println!(
                    "  {label:<4} {:>7.0} kcal  P {:>6.1} g  F {:>6.1} g",
                    chart.calories.get(index).copied().unwrap_or_default(),
                    chart.protein.get(index).copied().unwrap_or_default(),
                    chart.fat.get(index).copied().unwrap_or_default(),
                );
            }
        }
        LoadingState::Empty => println!("No data points to chart yet."),
        LoadingState::Error(error) => {
            println!("{}", error.description());
            println!("{}", error.recovery_suggestion());
        }
        LoadingState::Idle | LoadingState::Loading(_) => println!("Progress is not available."),
    }
}
