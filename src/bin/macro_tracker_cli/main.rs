// ABOUTME: macro-tracker CLI - search foods, log meals, and review saved entries and progress
// ABOUTME: Loads configuration, initializes logging, and wires every dependency explicitly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Look up nutrients without saving
//! macro-tracker search "250 grams of chicken breast"
//!
//! # Log a lunch for today
//! macro-tracker log "2 eggs and an apple" --meal lunch
//!
//! # List the entries of a day
//! macro-tracker list --date 2026-10-17
//!
//! # Delete one entry, or a whole meal
//! macro-tracker delete 5b7e1c2a-0f7e-4c1d-9a57-3f0c2b8e6d41
//! macro-tracker clear-meal --meal dinner --date 2026-10-17
//!
//! # Daily totals and progress
//! macro-tracker summary
//! macro-tracker progress --tab monthly
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use macro_tracker::{
    config::AppConfig, context::AppContext, intelligence::ProgressTab, logging::LoggingConfig,
    models::MealType,
};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "macro-tracker",
    about = "Personal nutrition tracker",
    long_about = "Look up nutrients for free-text meal descriptions, save the foods you ate, and follow your weekly and monthly progress."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override (`memory` or `sqlite:path`)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Answer lookups from built-in fixtures instead of the remote API
    #[arg(long, global = true)]
    offline: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Look up nutrients for a meal description
    Search {
        /// Free-text description, e.g. "250 grams of chicken breast"
        query: String,
    },

    /// Look up a meal description and save every food found
    Log {
        /// Free-text description
        query: String,

        /// Meal the foods belong to (breakfast, lunch, dinner, snack)
        #[arg(long)]
        meal: MealType,

        /// Day the meal was eaten (YYYY-MM-DD, defaults to now)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List saved entries
    List {
        /// Only entries of this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Delete one saved entry
    Delete {
        /// Entry id as shown by `list`
        id: Uuid,
    },

    /// Delete every entry of a meal on a day
    ClearMeal {
        /// Meal to clear
        #[arg(long)]
        meal: MealType,

        /// Day to clear (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },

    /// Show a day's entries grouped by meal, with totals
    Summary {
        /// Day to summarize (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show weekly or monthly progress
    Progress {
        /// weekly or monthly
        #[arg(long, default_value = "weekly")]
        tab: ProgressTab,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose { logging.verbose() } else { logging };
    logging.init()?;

    let mut config = AppConfig::from_env()?;
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
        config.validate()?;
    }
    debug!("{}", config.summary());

    let context = AppContext::from_config(config, cli.offline).await?;
    info!(backend = context.database().backend_info(), "macro-tracker ready");

    match cli.command {
        Command::Search { query } => commands::food::search(&context, &query).await?,
        Command::Log { query, meal, date } => {
            commands::food::log(&context, &query, meal, date).await?;
        }
        Command::List { date } => commands::food::list(&context, date).await,
        Command::Delete { id } => commands::food::delete(&context, id).await?,
        Command::ClearMeal { meal, date } => commands::food::clear_meal(&context, meal, date).await,
        Command::Summary { date } => commands::food::summary(&context, date).await,
        Command::Progress { tab } => commands::progress::show(&context, tab).await,
    }

    Ok(())
}
