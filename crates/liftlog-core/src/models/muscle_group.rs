// ABOUTME: Muscle group enumeration for logged weight entries
// ABOUTME: Defines the fixed tag set with strict parsing and display implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of muscle group tags a weight entry can carry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    /// Pectorals
    Chest,
    /// Lats, traps, and rhomboids
    Back,
    /// Quads, hamstrings, and calves
    Legs,
    /// Deltoids
    Shoulders,
    /// Biceps
    Biceps,
    /// Triceps
    Triceps,
    /// Abdominals and obliques
    Core,
    /// Glutes
    Glutes,
    /// Compound whole-body work
    FullBody,
}

impl MuscleGroup {
    /// Every supported tag in display order
    pub const ALL: [Self; 9] = [
        Self::Chest,
        Self::Back,
        Self::Legs,
        Self::Shoulders,
        Self::Biceps,
        Self::Triceps,
        Self::Core,
        Self::Glutes,
        Self::FullBody,
    ];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Legs => "legs",
            Self::Shoulders => "shoulders",
            Self::Biceps => "biceps",
            Self::Triceps => "triceps",
            Self::Core => "core",
            Self::Glutes => "glutes",
            Self::FullBody => "full_body",
        }
    }

    /// Parse from database string representation.
    ///
    /// Unknown tags return `None` so callers can classify the row as malformed
    /// instead of silently coercing it into some other group.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "chest" => Some(Self::Chest),
            "back" => Some(Self::Back),
            "legs" => Some(Self::Legs),
            "shoulders" => Some(Self::Shoulders),
            "biceps" => Some(Self::Biceps),
            "triceps" => Some(Self::Triceps),
            "core" | "abs" => Some(Self::Core),
            "glutes" => Some(Self::Glutes),
            "full_body" | "fullbody" => Some(Self::FullBody),
            _ => None,
        }
    }

    /// Human-readable label for charts
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Chest => "Chest",
            Self::Back => "Back",
            Self::Legs => "Legs",
            Self::Shoulders => "Shoulders",
            Self::Biceps => "Biceps",
            Self::Triceps => "Triceps",
            Self::Core => "Core",
            Self::Glutes => "Glutes",
            Self::FullBody => "Full Body",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
