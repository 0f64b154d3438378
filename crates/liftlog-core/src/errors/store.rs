// ABOUTME: Record store error types for fetch, write, and subscription failures
// ABOUTME: Converts backend errors into AppError codes consumed by the refresh controller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode, RecordError};
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by a record store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the user's records failed
    #[error("failed to fetch {what} for user {user_id}: {reason}")]
    FetchFailed {
        /// User whose data was requested
        user_id: Uuid,
        /// Which collection was being read
        what: &'static str,
        /// Backend-specific reason
        reason: String,
    },
    /// Persisting a submission or deletion failed
    #[error("failed to write workout data: {reason}")]
    WriteFailed {
        /// Backend-specific reason
        reason: String,
    },
    /// Record does not exist or belongs to another user
    #[error("workout record {record_id} not found")]
    NotFound {
        /// Requested record
        record_id: Uuid,
    },
    /// Submission rejected before reaching storage
    #[error("invalid submission: {0}")]
    InvalidSubmission(#[from] RecordError),
    /// Change listener could not be registered
    #[error("failed to subscribe to changes for user {user_id}: {reason}")]
    SubscribeFailed {
        /// User whose changes were requested
        user_id: Uuid,
        /// Backend-specific reason
        reason: String,
    },
    /// Underlying database driver error
    #[cfg(feature = "sqlx-errors")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Build a fetch failure for the given collection
    pub fn fetch_failed(user_id: Uuid, what: &'static str, reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            user_id,
            what,
            reason: reason.into(),
        }
    }

    /// Build a write failure
    pub fn write_failed(reason: impl Into<String>) -> Self {
        Self::WriteFailed {
            reason: reason.into(),
        }
    }

    /// Error code this failure maps to
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::FetchFailed { .. } => ErrorCode::FetchFailure,
            Self::WriteFailed { .. } => ErrorCode::WriteFailure,
            Self::NotFound { .. } => ErrorCode::ResourceNotFound,
            Self::InvalidSubmission(_) => ErrorCode::InvalidInput,
            Self::SubscribeFailed { .. } => ErrorCode::SubscriptionFailure,
            #[cfg(feature = "sqlx-errors")]
            Self::Database(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        Self::new(error.code(), error.to_string()).with_source(error)
    }
}
