// ABOUTME: Validation errors raised when stored rows are converted into workout models
// ABOUTME: Each variant classifies one kind of malformed record for skip-and-log handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::AppError;
use thiserror::Error;

/// A row that cannot become a valid `WorkoutRecord` or `MuscleGroupEntry`.
///
/// These are never fatal: the record store skips the offending row, logs it,
/// and keeps aggregating the rest.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// A stored column could not be decoded into its expected type
    #[error("row {row_id} has undecodable {column}: {reason}")]
    UndecodableColumn {
        /// Offending row, or `unknown` when its identifier is unreadable too
        row_id: String,
        /// Column that failed to decode
        column: &'static str,
        /// Driver-specific reason
        reason: String,
    },
    /// Identifier column is not a UUID
    #[error("invalid identifier '{raw}' in {column}")]
    InvalidIdentifier {
        /// Column holding the identifier
        column: &'static str,
        /// Raw stored value
        raw: String,
    },
    /// Creation timestamp is not RFC 3339 / SQLite datetime text
    #[error("record {record_id} has unparseable timestamp '{raw}'")]
    InvalidTimestamp {
        /// Offending record
        record_id: String,
        /// Raw stored value
        raw: String,
    },
    /// A numeric field that must be non-negative was negative or not finite
    #[error("record {record_id} has invalid {field}: {value}")]
    NegativeValue {
        /// Offending record
        record_id: String,
        /// Field name
        field: &'static str,
        /// Rejected value
        value: f64,
    },
    /// Energy level outside 1..=5
    #[error("record {record_id} has energy level {value} outside 1-5")]
    EnergyOutOfRange {
        /// Offending record
        record_id: String,
        /// Rejected value
        value: i64,
    },
    /// Mood note longer than allowed
    #[error("record {record_id} has a mood note of {length} characters")]
    MoodTooLong {
        /// Offending record
        record_id: String,
        /// Length in characters
        length: usize,
    },
    /// Muscle group tag not in the supported set
    #[error("entry {entry_id} has unknown muscle group '{tag}'")]
    UnknownMuscleGroup {
        /// Offending entry
        entry_id: String,
        /// Raw tag
        tag: String,
    },
}

impl RecordError {
    /// Identifier of the row that failed validation, when known
    #[must_use]
    pub fn row_id(&self) -> &str {
        match self {
            Self::InvalidIdentifier { raw, .. } => raw,
            Self::UndecodableColumn { row_id, .. } => row_id,
            Self::InvalidTimestamp { record_id, .. }
            | Self::NegativeValue { record_id, .. }
            | Self::EnergyOutOfRange { record_id, .. }
            | Self::MoodTooLong { record_id, .. } => record_id,
            Self::UnknownMuscleGroup { entry_id, .. } => entry_id,
        }
    }
}

impl From<RecordError> for AppError {
    fn from(error: RecordError) -> Self {
        Self::malformed_record(error.to_string()).with_source(error)
    }
}
