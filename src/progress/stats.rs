// ABOUTME: All-time workout statistics: count, total volume, and rounded average duration
// ABOUTME: Missing volume or duration counts as zero; empty input yields zeroed stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{AggregateStats, WorkoutRecord};

/// Aggregate all-time statistics over a user's workouts
#[must_use]
pub fn aggregate_stats(records: &[WorkoutRecord]) -> AggregateStats {
    let total_workouts = records.len();
    if total_workouts == 0 {
        return AggregateStats::default();
    }

    let total_volume = records
        .iter()
        .map(|r| r.total_volume.unwrap_or(0.0))
        .sum::<f64>();
    let total_minutes = records
        .iter()
        .map(|r| u64::from(r.duration_minutes.unwrap_or(0)))
        .sum::<u64>();

    // Mean of u32 values always fits back into u32
    let average_duration_minutes = (total_minutes as f64 / total_workouts as f64).round() as u32;

    AggregateStats {
        total_workouts,
        total_volume,
        average_duration_minutes,
    }
}
