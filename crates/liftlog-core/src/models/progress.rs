// ABOUTME: Derived progress views computed from a user's workout records
// ABOUTME: AggregateStats, MuscleGroupVolume, and the snapshot published to presentation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MuscleGroup;

/// All-time totals over a user's workouts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of workout records
    pub total_workouts: usize,
    /// Sum of workout volumes in pounds (missing volumes count as 0)
    pub total_volume: f64,
    /// Rounded mean duration, 0 when there are no workouts
    pub average_duration_minutes: u32,
}

/// Summed weight for one muscle group, in chart order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroupVolume {
    /// Muscle group tag
    pub muscle_group: MuscleGroup,
    /// Sum of entry weights in pounds
    pub total_volume: f64,
}

/// One consistent set of derived views, replaced whole on every refresh
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Consecutive days ending today with at least one workout
    pub streak_days: u32,
    /// All-time totals
    pub stats: AggregateStats,
    /// Per-muscle-group totals in first-seen order
    pub muscle_group_volumes: Vec<MuscleGroupVolume>,
    /// Rows skipped as malformed during the fetch behind this snapshot
    pub skipped_rows: usize,
    /// When the snapshot was computed; `None` before the first successful refresh
    pub computed_at: Option<DateTime<Utc>>,
    /// Monotonic refresh counter, 0 before the first successful refresh
    pub generation: u64,
}

impl ProgressSnapshot {
    /// Whether any refresh has succeeded yet
    #[must_use]
    pub const fn is_computed(&self) -> bool {
        self.computed_at.is_some()
    }

    /// Look up the volume for a muscle group, if any entries were logged for it
    #[must_use]
    pub fn volume_for(&self, muscle_group: MuscleGroup) -> Option<f64> {
        self.muscle_group_volumes
            .iter()
            .find(|v| v.muscle_group == muscle_group)
            .map(|v| v.total_volume)
    }
}
