// ABOUTME: Current-streak calculation over workout timestamps in the viewer's timezone
// ABOUTME: Walks backward from today through a bounded window of calendar days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use tracing::debug;

use crate::constants::streak::DEFAULT_WINDOW_DAYS;
use crate::models::WorkoutRecord;

/// Counts consecutive calendar days, ending today, that contain a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakCalculator {
    window_days: u32,
}

impl Default for StreakCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }
}

impl StreakCalculator {
    /// Create a calculator that looks back at most `window_days` days
    #[must_use]
    pub const fn new(window_days: u32) -> Self {
        Self { window_days }
    }

    /// Maximum streak this calculator can report
    #[must_use]
    pub const fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Compute the current streak for a set of workout timestamps.
    ///
    /// Calendar days are taken in `now`'s timezone. Timestamps whose local day
    /// falls after today are ignored, as are days older than the window.
    pub fn current_streak<'a, Tz, I>(&self, timestamps: I, now: &DateTime<Tz>) -> u32
    where
        Tz: TimeZone,
        I: IntoIterator<Item = &'a DateTime<Utc>>,
    {
        let timezone = now.timezone();
        self.streak_by_local_date(timestamps, &now.with_timezone(&Utc), |instant| {
            instant.with_timezone(&timezone).date_naive()
        })
    }

    /// Compute the current streak with a caller-supplied mapping from instants
    /// to the viewer's calendar days.
    ///
    /// `local_date` must apply the offset in effect at each instant, so that
    /// days on the far side of a daylight-saving change land correctly.
    pub fn streak_by_local_date<'a, I, F>(
        &self,
        timestamps: I,
        now: &DateTime<Utc>,
        local_date: F,
    ) -> u32
    where
        I: IntoIterator<Item = &'a DateTime<Utc>>,
        F: Fn(&DateTime<Utc>) -> NaiveDate,
    {
        let today = local_date(now);
        let oldest = today
            .checked_sub_days(Days::new(u64::from(self.window_days)))
            .unwrap_or(NaiveDate::MIN);

        let mut future_days = 0_usize;
        let active_days: HashSet<NaiveDate> = timestamps
            .into_iter()
            .filter_map(|timestamp| {
                let day = local_date(timestamp);
                if day > today {
                    future_days += 1;
                    None
                } else if day > oldest {
                    Some(day)
                } else {
                    None
                }
            })
            .collect();

        if future_days > 0 {
            debug!(
                streak.future_records = future_days,
                "Ignoring workouts dated after today"
            );
        }

        let mut streak = 0_u32;
        let mut day = today;
        for _ in 0..self.window_days {
            if !active_days.contains(&day) {
                break;
            }
            streak += 1;
            match day.pred_opt() {
                Some(previous) => day = previous,
                None => break,
            }
        }
        streak
    }

    /// Compute the current streak for workout records
    pub fn streak_for_records<Tz: TimeZone>(
        &self,
        records: &[WorkoutRecord],
        now: &DateTime<Tz>,
    ) -> u32 {
        self.current_streak(records.iter().map(|r| &r.created_at), now)
    }
}

/// Current streak with the default 30-day window
pub fn calculate_streak<Tz: TimeZone>(records: &[WorkoutRecord], now: &DateTime<Tz>) -> u32 {
    StreakCalculator::default().streak_for_records(records, now)
}
