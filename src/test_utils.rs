// ABOUTME: Test utilities for building timestamps, clocks, and workout rows consistently
// ABOUTME: Centralizes test data creation to avoid duplication across unit and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{MuscleGroup, MuscleGroupEntryRow, NewWorkout, WorkoutRecordRow};
use crate::refresh::{Clock, FixedClock};

/// Offset `hours` east of UTC, or UTC when out of range
#[must_use]
pub fn offset_hours(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| Utc.fix())
}

/// Wall-clock time on `date` at `hour:minute` in a zone `offset` hours from UTC
///
/// # Panics
///
/// Panics if the date or time is invalid.
#[must_use]
#[allow(clippy::expect_used)]
pub fn local_time(date: NaiveDate, hour: u32, minute: u32, offset: i32) -> DateTime<FixedOffset> {
    let naive = date
        .and_hms_opt(hour, minute, 0)
        .expect("valid wall-clock time");
    offset_hours(offset)
        .from_local_datetime(&naive)
        .single()
        .expect("fixed offsets are unambiguous")
}

/// Calendar date shorthand
///
/// # Panics
///
/// Panics if the date does not exist.
#[must_use]
#[allow(clippy::expect_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// A clock frozen at the given wall-clock time
#[must_use]
pub fn fixed_clock(now: DateTime<FixedOffset>) -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(now))
}

/// A minimal valid submission logged at `at`
#[must_use]
pub fn workout_at(user_id: Uuid, at: DateTime<Utc>) -> NewWorkout {
    NewWorkout::new(user_id, 3).at(at)
}

/// A submission with duration, volume, and one muscle group entry
#[must_use]
pub fn full_workout(
    user_id: Uuid,
    at: DateTime<Utc>,
    duration_minutes: u32,
    muscle_group: MuscleGroup,
    weight: f64,
) -> NewWorkout {
    NewWorkout::new(user_id, 4)
        .at(at)
        .duration_minutes(duration_minutes)
        .total_volume(weight)
        .muscle_group(muscle_group, weight)
}

/// A raw workout row for seeding stores directly
#[must_use]
pub fn raw_record(id: Uuid, user_id: Uuid, created_at: &str) -> WorkoutRecordRow {
    WorkoutRecordRow {
        id: id.to_string(),
        user_id: user_id.to_string(),
        created_at: created_at.to_owned(),
        duration_minutes: Some(30),
        total_volume: Some(1000.0),
        mood: None,
        energy_level: 3,
    }
}

/// A raw muscle group row for seeding stores directly
#[must_use]
pub fn raw_entry(workout_record_id: Uuid, tag: &str, total_weight: f64) -> MuscleGroupEntryRow {
    MuscleGroupEntryRow {
        id: Uuid::new_v4().to_string(),
        workout_record_id: workout_record_id.to_string(),
        muscle_group: tag.to_owned(),
        total_weight,
    }
}
