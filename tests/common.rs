// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, fixed clocks, workout builders, and store helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `liftlog`

use std::sync::{Arc, Once};
use std::time::Duration;

use anyhow::{bail, Result};
use chrono::{
    DateTime, Datelike, FixedOffset, MappedLocalTime, NaiveDate, NaiveDateTime, Offset, TimeDelta,
    TimeZone, Utc, Weekday,
};
use liftlog::{
    models::{MuscleGroup, MuscleGroupEntryRow, NewWorkout, ProgressSnapshot, WorkoutRecordRow},
    refresh::{Clock, FixedClock},
};
use tokio::sync::watch;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// How long async tests wait for a published snapshot
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn offset(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).unwrap()
}

/// Wall-clock time in a zone `offset_hours` from UTC
pub fn local(day: NaiveDate, hour: u32, minute: u32, offset_hours: i32) -> DateTime<FixedOffset> {
    offset(offset_hours)
        .from_local_datetime(&day.and_hms_opt(hour, minute, 0).unwrap())
        .single()
        .unwrap()
}

/// UTC instant for a wall-clock time in a zone `offset_hours` from UTC
pub fn instant(day: NaiveDate, hour: u32, offset_hours: i32) -> DateTime<Utc> {
    local(day, hour, 0, offset_hours).with_timezone(&Utc)
}

/// `count` consecutive days ending at `last`
pub fn days_back(last: NaiveDate, count: u64) -> Vec<NaiveDate> {
    (0..count)
        .map(|back| last.checked_sub_days(chrono::Days::new(back)).unwrap())
        .collect()
}

pub fn fixed_clock(now: DateTime<FixedOffset>) -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(now))
}

/// A clock frozen at `now`, reporting calendar days in `now`'s timezone
pub fn zoned_clock<Tz>(now: DateTime<Tz>) -> Arc<dyn Clock>
where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync + 'static,
{
    Arc::new(FixedClock::new(now))
}

/// US Eastern time with daylight saving, for tests that cross a clock change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsEastern;

impl UsEastern {
    /// Daylight time runs from the second Sunday of March (07:00 UTC) to the
    /// first Sunday of November (06:00 UTC)
    fn daylight_window(year: i32) -> (NaiveDateTime, NaiveDateTime) {
        let start = NaiveDate::from_weekday_of_month_opt(year, 3, Weekday::Sun, 2)
            .and_then(|day| day.and_hms_opt(7, 0, 0))
            .unwrap();
        let end = NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Sun, 1)
            .and_then(|day| day.and_hms_opt(6, 0, 0))
            .unwrap();
        (start, end)
    }

    fn offset_at(utc: &NaiveDateTime) -> FixedOffset {
        let (start, end) = Self::daylight_window(utc.year());
        if (start..end).contains(utc) {
            offset(-4)
        } else {
            offset(-5)
        }
    }
}

impl TimeZone for UsEastern {
    type Offset = FixedOffset;

    fn from_offset(_offset: &FixedOffset) -> Self {
        Self
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> MappedLocalTime<FixedOffset> {
        self.offset_from_local_datetime(&local.and_hms_opt(12, 0, 0).unwrap())
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> MappedLocalTime<FixedOffset> {
        let matching: Vec<FixedOffset> = [offset(-5), offset(-4)]
            .into_iter()
            .filter(|candidate| {
                let utc = *local - TimeDelta::seconds(i64::from(candidate.fix().local_minus_utc()));
                Self::offset_at(&utc) == *candidate
            })
            .collect();
        match matching.as_slice() {
            [single] => MappedLocalTime::Single(*single),
            [earlier, later] => MappedLocalTime::Ambiguous(*earlier, *later),
            _ => MappedLocalTime::None,
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        Self::offset_at(&utc.and_hms_opt(0, 0, 0).unwrap())
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        Self::offset_at(utc)
    }
}

/// Wall-clock time in US Eastern, daylight saving applied
pub fn eastern(day: NaiveDate, hour: u32, minute: u32) -> DateTime<UsEastern> {
    UsEastern
        .from_local_datetime(&day.and_hms_opt(hour, minute, 0).unwrap())
        .single()
        .unwrap()
}

/// A submission with duration, volume, and one muscle group entry
pub fn workout(
    user_id: Uuid,
    at: DateTime<Utc>,
    minutes: u32,
    muscle_group: MuscleGroup,
    weight: f64,
) -> NewWorkout {
    NewWorkout::new(user_id, 4)
        .at(at)
        .duration_minutes(minutes)
        .total_volume(weight)
        .muscle_group(muscle_group, weight)
}

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

pub fn raw_entry(workout_record_id: Uuid, tag: &str, total_weight: f64) -> MuscleGroupEntryRow {
    MuscleGroupEntryRow {
        id: Uuid::new_v4().to_string(),
        workout_record_id: workout_record_id.to_string(),
        muscle_group: tag.to_owned(),
        total_weight,
    }
}

/// Wait until a snapshot satisfying `predicate` is published
pub async fn wait_for_snapshot<F>(
    receiver: &mut watch::Receiver<Arc<ProgressSnapshot>>,
    predicate: F,
) -> Result<Arc<ProgressSnapshot>>
where
    F: Fn(&ProgressSnapshot) -> bool,
{
    let waited = tokio::time::timeout(WAIT_TIMEOUT, receiver.wait_for(|s| predicate(&**s))).await;
    match waited {
        Ok(Ok(snapshot)) => Ok(Arc::clone(&snapshot)),
        Ok(Err(_)) => bail!("snapshot channel closed"),
        Err(_) => bail!("timed out waiting for snapshot"),
    }
}

/// Float comparison for summed volumes
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
