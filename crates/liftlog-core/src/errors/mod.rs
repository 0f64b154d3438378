// ABOUTME: Unified error handling with error codes and domain-specific error types
// ABOUTME: Defines AppError, ErrorCode, and re-exports record and store errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in Liftlog ends up as an `AppError` carrying a
//! stable `ErrorCode`. Domain errors (`RecordError`, `StoreError`) keep the
//! structured detail and convert into `AppError` at module boundaries.

mod record;
mod store;

pub use record::RecordError;
pub use store::StoreError;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A persisted record could not be turned into a valid model
    #[serde(rename = "MALFORMED_RECORD")]
    MalformedRecord = 3004,

    // Resource Management (4000-4999)
    /// Requested resource does not exist (or is not owned by the caller)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // Record store (5000-5999)
    /// Record store could not return data
    #[serde(rename = "FETCH_FAILURE")]
    FetchFailure = 5000,
    /// Record store rejected a write
    #[serde(rename = "WRITE_FAILURE")]
    WriteFailure = 5001,
    /// Change subscription could not be created
    #[serde(rename = "SUBSCRIPTION_FAILURE")]
    SubscriptionFailure = 5002,

    // Configuration (6000-6999)
    /// Configuration is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Database operation failed
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MalformedRecord => "A stored workout record is malformed",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::FetchFailure => "Workout data could not be loaded",
            Self::WriteFailure => "Workout data could not be saved",
            Self::SubscriptionFailure => "Live updates could not be started",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::DatabaseError => "Database operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the failure is transient and a later refresh may succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::FetchFailure | Self::SubscriptionFailure | Self::DatabaseError
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Record store could not return data
    pub fn fetch_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FetchFailure, message)
    }

    /// Persisted record failed validation
    pub fn malformed_record(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedRecord, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::fetch_failure("connection reset");
        assert_eq!(
            error.to_string(),
            "Workout data could not be loaded: connection reset"
        );
    }

    #[test]
    fn test_transient_codes() {
        assert!(ErrorCode::FetchFailure.is_transient());
        assert!(!ErrorCode::MalformedRecord.is_transient());
        assert!(!ErrorCode::ConfigInvalid.is_transient());
    }

    #[test]
    fn test_error_code_serializes_to_stable_name() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&ErrorCode::MalformedRecord)?;
        assert_eq!(json, "\"MALFORMED_RECORD\"");
        Ok(())
    }
}
