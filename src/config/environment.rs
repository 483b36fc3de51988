// ABOUTME: Environment configuration for the nutrition API, local store, cache, and calendar
// ABOUTME: Parses environment variables into typed settings and rejects invalid values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::cache::CacheConfig;
use crate::constants::cache::{DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL_SECS};
use crate::constants::nutrition_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::errors::{AppError, AppResult};
use crate::external::NutritionClientConfig;
use crate::models::DayCalendar;
use reqwest::Url;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Default local store
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/macro_tracker.db";

/// Largest accepted calendar offset from UTC, in minutes
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Search cache settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Entry lifetime in seconds
    pub ttl_secs: u64,
    /// Maximum number of cached queries
    pub max_entries: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

impl CacheSettings {
    /// Runtime cache configuration
    #[must_use]
    pub const fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(self.ttl_secs),
            max_entries: self.max_entries,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Remote nutrition lookup
    pub nutrition_api: NutritionClientConfig,
    /// Local store URL (`memory` or `sqlite:...`)
    pub database_url: String,
    /// Search cache
    pub cache: CacheSettings,
    /// Offset east of UTC used to decide calendar days, in minutes
    pub utc_offset_minutes: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            nutrition_api: NutritionClientConfig::default(),
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            cache: CacheSettings::default(),
            utc_offset_minutes: 0,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error naming the variable when a value cannot
    /// be parsed or is out of range
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            nutrition_api: NutritionClientConfig {
                api_key: env_var_or("NUTRITION_API_KEY", ""),
                base_url: env_var_or("NUTRITION_API_BASE_URL", DEFAULT_BASE_URL),
                timeout: Duration::from_secs(parse_env(
                    "NUTRITION_API_TIMEOUT_SECS",
                    DEFAULT_TIMEOUT_SECS,
                )?),
            },
            database_url: env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            cache: CacheSettings {
                ttl_secs: parse_env("NUTRITION_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
                max_entries: parse_env("NUTRITION_CACHE_MAX_ENTRIES", DEFAULT_CACHE_MAX_ENTRIES)?,
            },
            utc_offset_minutes: parse_env("CALENDAR_UTC_OFFSET_MINUTES", 0)?,
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error for the first invalid setting
    pub fn validate(&self) -> AppResult<()> {
        if self.nutrition_api.timeout.is_zero() {
            return Err(AppError::config_invalid(
                "NUTRITION_API_TIMEOUT_SECS",
                "timeout must be at least one second",
            ));
        }

        let base_url = Url::parse(&self.nutrition_api.base_url)
            .map_err(|e| AppError::config_invalid("NUTRITION_API_BASE_URL", e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::config_invalid(
                "NUTRITION_API_BASE_URL",
                format!("unsupported scheme '{}'", base_url.scheme()),
            ));
        }

        if self.database_url.trim().is_empty() {
            return Err(AppError::config_invalid("DATABASE_URL", "must not be empty"));
        }

        if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&self.utc_offset_minutes) {
            return Err(AppError::config_invalid(
                "CALENDAR_UTC_OFFSET_MINUTES",
                format!(
                    "{} is outside ±{MAX_UTC_OFFSET_MINUTES} minutes",
                    self.utc_offset_minutes
                ),
            ));
        }

        if !self.has_api_key() {
            warn!("NUTRITION_API_KEY is not set; remote lookups will be rejected");
        }

        Ok(())
    }

    /// Whether a nutrition API key was configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.nutrition_api.api_key.trim().is_empty()
    }

    /// Calendar evaluated at the configured offset
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error if the offset is not a valid UTC offset
    pub fn calendar(&self) -> AppResult<DayCalendar> {
        DayCalendar::from_offset_minutes(self.utc_offset_minutes).ok_or_else(|| {
            AppError::config_invalid(
                "CALENDAR_UTC_OFFSET_MINUTES",
                format!("{} is not a valid offset", self.utc_offset_minutes),
            )
        })
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Macro Tracker Configuration:\n\
             - Nutrition API: {}\n\
             - API Key: {}\n\
             - Timeout: {}s\n\
             - Database: {}\n\
             - Cache: {} entries, {}s TTL\n\
             - Calendar Offset: {} minutes",
            self.nutrition_api.base_url,
            if self.has_api_key() {
                "Configured"
            } else {
                "Missing"
            },
            self.nutrition_api.timeout.as_secs(),
            if self.database_url.trim().eq_ignore_ascii_case("memory") {
                "In-memory"
            } else {
                "SQLite"
            },
            self.cache.max_entries,
            self.cache.ttl_secs,
            self.utc_offset_minutes,
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config_invalid(key, format!("invalid value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.cache.cache_config(), CacheConfig::default());
    }

    #[test]
    fn test_rejects_offsets_beyond_fourteen_hours() {
        let config = AppConfig {
            utc_offset_minutes: 15 * 60,
            ..AppConfig::default()
        };
        let error = config.validate().unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigInvalid);
        assert!(error.message.contains("CALENDAR_UTC_OFFSET_MINUTES"));
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let config = AppConfig {
            nutrition_api: NutritionClientConfig {
                base_url: "ftp://example.com".to_owned(),
                ..NutritionClientConfig::default()
            },
            ..AppConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err().code,
            ErrorCode::ConfigInvalid
        );
    }

    #[test]
    fn test_summary_omits_secrets() {
        let config = AppConfig {
            nutrition_api: NutritionClientConfig {
                api_key: "secret-key".to_owned(),
                ..NutritionClientConfig::default()
            },
            ..AppConfig::default()
        };
        let summary = config.summary();
        assert!(summary.contains("API Key: Configured"));
        assert!(!summary.contains("secret-key"));
    }
}
