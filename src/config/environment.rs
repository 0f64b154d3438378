// ABOUTME: Environment configuration for the progress engine and its record store
// ABOUTME: Parses LIFTLOG_* variables with logged fallbacks and explicit validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::channels::{
    DEFAULT_CHANGE_CHANNEL_CAPACITY, DEFAULT_NOTIFICATION_CHANNEL_CAPACITY,
};
use crate::constants::env_config;
use crate::constants::storage::{DATABASE_FILE_NAME, FALLBACK_DATABASE_URL};
use crate::constants::streak::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS, MIN_WINDOW_DAYS};
use crate::errors::{AppError, AppResult};
use crate::progress::{MuscleGroupAggregator, ProgressAggregator, StreakCalculator};

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Progress engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Days walked back from today when counting a streak
    pub streak_window_days: u32,
    /// Record store database URL
    pub database_url: String,
    /// Change events buffered per listener
    pub change_channel_capacity: usize,
    /// User notifications buffered per listener
    pub notification_channel_capacity: usize,
    /// Ignore muscle group entries that weigh nothing
    pub skip_zero_weight_entries: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            streak_window_days: DEFAULT_WINDOW_DAYS,
            database_url: default_database_url(),
            change_channel_capacity: DEFAULT_CHANGE_CHANNEL_CAPACITY,
            notification_channel_capacity: DEFAULT_NOTIFICATION_CHANNEL_CAPACITY,
            skip_zero_weight_entries: true,
        }
    }
}

impl ProgressConfig {
    /// Load configuration from environment variables.
    ///
    /// Unparseable values fall back to their defaults with a warning; call
    /// `validate` to reject values that parse but are out of range.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            environment: env::var(env_config::ENVIRONMENT)
                .map(|v| Environment::from_str_or_default(&v))
                .unwrap_or_default(),
            streak_window_days: parse_env_or(
                env_config::STREAK_WINDOW_DAYS,
                defaults.streak_window_days,
            ),
            database_url: env::var(env_config::DATABASE_URL).unwrap_or(defaults.database_url),
            change_channel_capacity: parse_env_or(
                env_config::CHANGE_CHANNEL_CAPACITY,
                defaults.change_channel_capacity,
            ),
            notification_channel_capacity: parse_env_or(
                env_config::NOTIFICATION_CHANNEL_CAPACITY,
                defaults.notification_channel_capacity,
            ),
            skip_zero_weight_entries: parse_env_or(
                env_config::SKIP_ZERO_WEIGHT_ENTRIES,
                defaults.skip_zero_weight_entries,
            ),
        }
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first invalid setting.
    pub fn validate(&self) -> AppResult<()> {
        if !(MIN_WINDOW_DAYS..=MAX_WINDOW_DAYS).contains(&self.streak_window_days) {
            return Err(AppError::config(format!(
                "{} must be between {MIN_WINDOW_DAYS} and {MAX_WINDOW_DAYS}, got {}",
                env_config::STREAK_WINDOW_DAYS,
                self.streak_window_days
            )));
        }
        if self.change_channel_capacity == 0 {
            return Err(AppError::config(format!(
                "{} must be greater than zero",
                env_config::CHANGE_CHANNEL_CAPACITY
            )));
        }
        if self.notification_channel_capacity == 0 {
            return Err(AppError::config(format!(
                "{} must be greater than zero",
                env_config::NOTIFICATION_CHANNEL_CAPACITY
            )));
        }
        if self.database_url.trim().is_empty() {
            return Err(AppError::config(format!(
                "{} must not be empty",
                env_config::DATABASE_URL
            )));
        }
        Ok(())
    }

    /// Aggregator configured from these settings
    #[must_use]
    pub const fn aggregator(&self) -> ProgressAggregator {
        ProgressAggregator::new(
            StreakCalculator::new(self.streak_window_days),
            MuscleGroupAggregator::new(self.skip_zero_weight_entries),
        )
    }
}

/// Default SQLite URL inside the platform data directory
fn default_database_url() -> String {
    dirs::data_dir().map_or_else(
        || FALLBACK_DATABASE_URL.to_owned(),
        |dir| {
            format!(
                "sqlite:{}",
                dir.join("liftlog").join(DATABASE_FILE_NAME).display()
            )
        },
    )
}

/// Parse an environment variable, warning and falling back when it is invalid
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value '{raw}' for {key}, using default {default}");
            default
        }),
        Err(_) => default,
    }
}
