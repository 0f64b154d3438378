// ABOUTME: Pure progress aggregation over a user's full workout record set
// ABOUTME: Combines streak, stats, and muscle group aggregation into one snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Progress Aggregation
//!
//! Every function here is synchronous and side-effect free: the same input
//! always yields the same output. Nothing is cached between calls; callers
//! hand in the complete current record set every time.

/// Per-muscle-group volume totals
pub mod muscle_groups;
/// All-time workout statistics
pub mod stats;
/// Current-streak calculation
pub mod streak;

pub use muscle_groups::{aggregate_muscle_groups, MuscleGroupAggregator};
pub use stats::aggregate_stats;
pub use streak::{calculate_streak, StreakCalculator};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::{MuscleGroupEntry, ProgressSnapshot, WorkoutRecord};

/// Runs all three aggregators against one record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressAggregator {
    streak: StreakCalculator,
    muscle_groups: MuscleGroupAggregator,
}

impl ProgressAggregator {
    /// Create an aggregator from its parts
    #[must_use]
    pub const fn new(streak: StreakCalculator, muscle_groups: MuscleGroupAggregator) -> Self {
        Self {
            streak,
            muscle_groups,
        }
    }

    /// Streak calculator in use
    #[must_use]
    pub const fn streak_calculator(&self) -> StreakCalculator {
        self.streak
    }

    /// Compute a snapshot. `generation` and `skipped_rows` are carried through
    /// unchanged so the caller controls refresh bookkeeping.
    pub fn compute<Tz: TimeZone>(
        &self,
        records: &[WorkoutRecord],
        entries: &[MuscleGroupEntry],
        now: &DateTime<Tz>,
        skipped_rows: usize,
        generation: u64,
    ) -> ProgressSnapshot {
        let timezone = now.timezone();
        self.compute_with_calendar(
            records,
            entries,
            &now.with_timezone(&Utc),
            |instant| instant.with_timezone(&timezone).date_naive(),
            skipped_rows,
            generation,
        )
    }

    /// Compute a snapshot where `local_date` maps each instant to the viewer's
    /// calendar day using the offset in effect at that instant.
    pub fn compute_with_calendar<F>(
        &self,
        records: &[WorkoutRecord],
        entries: &[MuscleGroupEntry],
        now: &DateTime<Utc>,
        local_date: F,
        skipped_rows: usize,
        generation: u64,
    ) -> ProgressSnapshot
    where
        F: Fn(&DateTime<Utc>) -> NaiveDate,
    {
        ProgressSnapshot {
            streak_days: self.streak.streak_by_local_date(
                records.iter().map(|record| &record.created_at),
                now,
                local_date,
            ),
            stats: aggregate_stats(records),
            muscle_group_volumes: self.muscle_groups.aggregate(entries),
            skipped_rows,
            computed_at: Some(*now),
            generation,
        }
    }
}
