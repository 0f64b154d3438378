// ABOUTME: Unit tests for logging functionality
// ABOUTME: Validates logging configuration defaults and environment variable handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use liftlog::logging::{LogFormat, LoggingConfig};
use serial_test::serial;

const LOG_KEYS: [&str; 5] = [
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
    "SERVICE_NAME",
    "LOG_INCLUDE_SPANS",
];

fn clear_env() {
    for key in LOG_KEYS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "liftlog-test");

    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert_eq!(config.service_name, "liftlog-test");
    assert!(config.include_location);
    assert!(config.include_thread);
    assert!(!config.include_spans);
}

#[test]
fn test_default_logging_config() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.environment, "development");
    assert_eq!(config.service_name, "liftlog");
    assert!(!config.include_location);
}

#[test]
#[serial]
fn test_cli_logging_is_compact_and_quiet() {
    clear_env();
    let quiet = LoggingConfig::for_cli(false);
    let verbose = LoggingConfig::for_cli(true);

    assert_eq!(quiet.format, LogFormat::Compact);
    assert_eq!(quiet.level, "warn");
    assert_eq!(verbose.level, "debug");
}

#[test]
#[serial]
fn test_init_installs_subscriber_once() {
    clear_env();
    let config = LoggingConfig {
        format: LogFormat::Compact,
        level: "warn".into(),
        ..LoggingConfig::default()
    };

    assert!(config.init().is_ok());
    // A second global subscriber is rejected rather than silently replacing the first
    assert!(config.init().is_err());
}
