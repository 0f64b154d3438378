// ABOUTME: Core data models for workout logging and derived progress views
// ABOUTME: Re-exports WorkoutRecord, MuscleGroupEntry, MuscleGroup and aggregate types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Persisted models (`WorkoutRecord`, `MuscleGroupEntry`) are validated at the
//! record store boundary: stores read loose `*Row` values and convert them with
//! `TryFrom`, so everything past the store is well-formed. Derived models
//! (`AggregateStats`, `MuscleGroupVolume`, `ProgressSnapshot`) are never persisted.

mod muscle_group;
mod progress;
mod workout;

pub use muscle_group::MuscleGroup;
pub use progress::{AggregateStats, MuscleGroupVolume, ProgressSnapshot};
pub use workout::{
    parse_stored_timestamp, MuscleGroupEntry, MuscleGroupEntryRow, NewMuscleGroupEntry,
    NewWorkout, WorkoutRecord, WorkoutRecordRow,
};
