// ABOUTME: Unit tests for environment-driven progress configuration
// ABOUTME: Validates defaults, overrides, invalid-value fallbacks, and range checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use liftlog::config::{Environment, ProgressConfig};
use liftlog::constants::env_config;
use liftlog::errors::ErrorCode;
use serial_test::serial;

const ALL_KEYS: [&str; 6] = [
    env_config::STREAK_WINDOW_DAYS,
    env_config::DATABASE_URL,
    env_config::CHANGE_CHANNEL_CAPACITY,
    env_config::NOTIFICATION_CHANNEL_CAPACITY,
    env_config::SKIP_ZERO_WEIGHT_ENTRIES,
    env_config::ENVIRONMENT,
];

fn clear_env() {
    for key in ALL_KEYS {
        env::remove_var(key);
    }
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("production"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("test"),
        Environment::Testing
    );
    assert_eq!(
        Environment::from_str_or_default("invalid"),
        Environment::Development
    );
    assert!(Environment::Production.is_production());
    assert_eq!(Environment::Testing.to_string(), "testing");
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = ProgressConfig::from_env();

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.streak_window_days, 30);
    assert_eq!(config.change_channel_capacity, 256);
    assert_eq!(config.notification_channel_capacity, 64);
    assert!(config.skip_zero_weight_entries);
    assert!(config.database_url.starts_with("sqlite:"));
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var(env_config::STREAK_WINDOW_DAYS, "60");
    env::set_var(env_config::DATABASE_URL, "sqlite::memory:");
    env::set_var(env_config::SKIP_ZERO_WEIGHT_ENTRIES, "false");
    env::set_var(env_config::ENVIRONMENT, "production");

    let config = ProgressConfig::from_env();
    clear_env();

    assert_eq!(config.streak_window_days, 60);
    assert_eq!(config.database_url, "sqlite::memory:");
    assert!(!config.skip_zero_weight_entries);
    assert!(config.environment.is_production());
    assert_eq!(config.aggregator().streak_calculator().window_days(), 60);
}

#[test]
#[serial]
fn test_unparseable_values_fall_back_to_defaults() {
    clear_env();
    env::set_var(env_config::STREAK_WINDOW_DAYS, "a month");
    env::set_var(env_config::CHANGE_CHANNEL_CAPACITY, "-4");

    let config = ProgressConfig::from_env();
    clear_env();

    assert_eq!(config.streak_window_days, 30);
    assert_eq!(config.change_channel_capacity, 256);
}

#[test]
#[serial]
fn test_out_of_range_values_fail_validation() {
    clear_env();
    env::set_var(env_config::STREAK_WINDOW_DAYS, "0");
    let config = ProgressConfig::from_env();
    clear_env();

    let error = config.validate().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains(env_config::STREAK_WINDOW_DAYS));

    let oversized = ProgressConfig {
        streak_window_days: 400,
        ..ProgressConfig::default()
    };
    assert!(oversized.validate().is_err());

    let no_buffer = ProgressConfig {
        notification_channel_capacity: 0,
        ..ProgressConfig::default()
    };
    assert!(no_buffer.validate().is_err());

    let no_database = ProgressConfig {
        database_url: "  ".into(),
        ..ProgressConfig::default()
    };
    assert!(no_database.validate().is_err());
}
