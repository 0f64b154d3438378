// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for streaks, channels, validation limits, and environment keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than a single flat list.

/// Streak calculation defaults
pub mod streak {
    /// Number of days walked backward from today when counting a streak
    pub const DEFAULT_WINDOW_DAYS: u32 = 30;
    /// Smallest accepted streak window
    pub const MIN_WINDOW_DAYS: u32 = 1;
    /// Largest accepted streak window (one leap year)
    pub const MAX_WINDOW_DAYS: u32 = 366;
}

/// Record validation limits
pub mod validation {
    /// Lowest valid self-reported energy level
    pub const MIN_ENERGY_LEVEL: u8 = 1;
    /// Highest valid self-reported energy level
    pub const MAX_ENERGY_LEVEL: u8 = 5;
    /// Maximum mood note length in characters
    pub const MAX_MOOD_CHARS: usize = 64;
}

/// Channel capacities for change and notification fan-out
pub mod channels {
    /// Buffered change events per record store before receivers lag
    pub const DEFAULT_CHANGE_CHANNEL_CAPACITY: usize = 256;
    /// Buffered user-facing notifications before receivers lag
    pub const DEFAULT_NOTIFICATION_CHANNEL_CAPACITY: usize = 64;
}

/// Environment variable names
pub mod env_config {
    /// Streak window override
    pub const STREAK_WINDOW_DAYS: &str = "LIFTLOG_STREAK_WINDOW_DAYS";
    /// Record store database URL
    pub const DATABASE_URL: &str = "LIFTLOG_DATABASE_URL";
    /// Change notification channel capacity
    pub const CHANGE_CHANNEL_CAPACITY: &str = "LIFTLOG_CHANGE_CHANNEL_CAPACITY";
    /// User-facing notification channel capacity
    pub const NOTIFICATION_CHANNEL_CAPACITY: &str = "LIFTLOG_NOTIFICATION_CHANNEL_CAPACITY";
    /// Whether zero-weight muscle group entries are dropped before aggregation
    pub const SKIP_ZERO_WEIGHT_ENTRIES: &str = "LIFTLOG_SKIP_ZERO_WEIGHT_ENTRIES";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Service name reported at startup
    pub const LIFTLOG: &str = "liftlog";
}

/// Storage defaults
pub mod storage {
    /// Database file name inside the data directory
    pub const DATABASE_FILE_NAME: &str = "liftlog.db";
    /// Fallback database URL when no data directory can be resolved
    pub const FALLBACK_DATABASE_URL: &str = "sqlite:./data/liftlog.db";
}
