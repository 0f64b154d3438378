// ABOUTME: Per-muscle-group volume totals for charting
// ABOUTME: Sums entry weights by tag, keeping first-seen order and omitting unseen tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use crate::models::{MuscleGroup, MuscleGroupEntry, MuscleGroupVolume};

/// Sums muscle group entries into chart-ready totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MuscleGroupAggregator {
    skip_zero_weight: bool,
}

impl MuscleGroupAggregator {
    /// Create an aggregator; with `skip_zero_weight` entries weighing 0 are ignored
    #[must_use]
    pub const fn new(skip_zero_weight: bool) -> Self {
        Self { skip_zero_weight }
    }

    /// Sum weights per muscle group in first-seen order
    pub fn aggregate<'a, I>(&self, entries: I) -> Vec<MuscleGroupVolume>
    where
        I: IntoIterator<Item = &'a MuscleGroupEntry>,
    {
        let mut positions: HashMap<MuscleGroup, usize> = HashMap::new();
        let mut volumes: Vec<MuscleGroupVolume> = Vec::new();

        for entry in entries {
            if self.skip_zero_weight && entry.total_weight <= 0.0 {
                continue;
            }
            if let Some(&index) = positions.get(&entry.muscle_group) {
                volumes[index].total_volume += entry.total_weight;
            } else {
                positions.insert(entry.muscle_group, volumes.len());
                volumes.push(MuscleGroupVolume {
                    muscle_group: entry.muscle_group,
                    total_volume: entry.total_weight,
                });
            }
        }

        volumes
    }
}

/// Sum every entry, zero-weight ones included
#[must_use]
pub fn aggregate_muscle_groups(entries: &[MuscleGroupEntry]) -> Vec<MuscleGroupVolume> {
    MuscleGroupAggregator::default().aggregate(entries)
}
