// ABOUTME: Food commands for macro-tracker
// ABOUTME: Handles search, log, list, delete, clear-meal, and summary operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, NaiveDate, Utc};
use macro_tracker::{
    context::AppContext,
    errors::AppResult,
    models::{DayCalendar, MealType},
    services::SearchOutcome,
};
use tracing::info;
use uuid::Uuid;

use crate::helpers::display::{
    display_daily_summary, display_entries, display_query_results, display_saved_entries,
};

type Result<T> = AppResult<T>;

/// Meals logged for a past day are placed at local noon
const LOGGED_HOUR: i64 = 12;

fn recorded_instant(calendar: DayCalendar, date: Option<NaiveDate>) -> DateTime<Utc> {
    date.map_or_else(Utc::now, |day| {
        calendar.start_of_day(day) + Duration::hours(LOGGED_HOUR)
    })
}

/// Look up nutrients without saving
pub async fn search(context: &AppContext, query: &str) -> Result<()> {
    let results = context.repository().search_nutrition(query).await?;
    display_query_results(query, &results);
    Ok(())
}

/// Look up a description and save every food found
pub async fn log(
    context: &AppContext,
    query: &str,
    meal: MealType,
    date: Option<NaiveDate>,
) -> Result<()> {
    let session = context.search_session();
    if let SearchOutcome::Applied(0) = session.search(query).await? {
        println!("No foods recognised in \"{query}\"; nothing was logged.");
        return Ok(());
    }

    let recorded = recorded_instant(context.repository().calendar(), date);
    let saved = session.confirm(recorded, meal).await?;
    info!(count = saved.len(), meal = meal.as_str(), "Logged meal");
    display_saved_entries(meal, &saved);
    Ok(())
}

/// List saved entries, optionally for one day
pub async fn list(context: &AppContext, date: Option<NaiveDate>) {
    let repository = context.repository();
    let entries = match date {
        Some(day) => {
            repository
                .get_food_items(repository.calendar().start_of_day(day))
                .await
        }
        None => repository.get_all_food_items().await,
    };
    display_entries(&entries, &repository.calendar());
}

/// Delete one saved entry by id
pub async fn delete(context: &AppContext, id: Uuid) -> Result<()> {
    let repository = context.repository();
    let entry = repository.find_food_item(id).await?;
    repository.delete_food_item(&entry).await;
    println!("Deleted {} ({})", entry.name, entry.id);
    Ok(())
}

/// Delete every entry of a meal on a day
pub async fn clear_meal(context: &AppContext, meal: MealType, date: NaiveDate) {
    let repository = context.repository();
    let removed = repository
        .delete_all_foods_for_meal_type_and_date(meal, repository.calendar().start_of_day(date))
        .await;
    println!("Removed {removed} {} entries on {date}", meal.display_name());
}

/// Show one day's entries grouped by meal
pub async fn summary(context: &AppContext, date: Option<NaiveDate>) {
    let repository = context.repository();
    let calendar = repository.calendar();
    let day = date.unwrap_or_else(|| calendar.day_of(Utc::now()));
    let summary = repository.daily_summary(day).await;
    display_daily_summary(&summary);
}
