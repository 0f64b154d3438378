// ABOUTME: Tests for error classification across record, store, and application errors
// ABOUTME: Verifies error code mapping, source chaining, and stable serialized names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::error::Error as _;

use liftlog::errors::{AppError, ErrorCode, RecordError, StoreError};
use uuid::Uuid;

#[test]
fn test_record_errors_are_malformed_records() {
    let error = RecordError::InvalidTimestamp {
        record_id: "abc".into(),
        raw: "soon".into(),
    };
    assert_eq!(error.row_id(), "abc");

    let app: AppError = error.into();
    assert_eq!(app.code, ErrorCode::MalformedRecord);
    assert!(app.source().is_some());
}

#[test]
fn test_store_error_codes() {
    let user_id = Uuid::new_v4();
    let record_id = Uuid::new_v4();

    let cases = [
        (
            StoreError::fetch_failed(user_id, "workout records", "timeout"),
            ErrorCode::FetchFailure,
        ),
        (StoreError::write_failed("disk full"), ErrorCode::WriteFailure),
        (
            StoreError::NotFound { record_id },
            ErrorCode::ResourceNotFound,
        ),
        (
            StoreError::InvalidSubmission(RecordError::MoodTooLong {
                record_id: "new workout".into(),
                length: 200,
            }),
            ErrorCode::InvalidInput,
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.code(), expected);
        let app = AppError::from(error);
        assert_eq!(app.code, expected);
    }
}

#[test]
fn test_app_error_display_and_serialization() {
    let error = AppError::not_found("workout");
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert!(error.to_string().ends_with("workout not found"));

    let json = serde_json::to_string(&ErrorCode::FetchFailure).unwrap();
    let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, ErrorCode::FetchFailure);
}
