// ABOUTME: Core types and constants for the Liftlog workout progress engine
// ABOUTME: Foundation crate with error handling, workout models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Liftlog Core
//!
//! Foundation crate providing shared types and constants for the Liftlog
//! progress engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
//! - **constants**: Defaults for streak windows, channel capacities, and environment keys
//! - **models**: Workout records, muscle-group entries, and derived aggregate types

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`WorkoutRecord`, `MuscleGroupEntry`, `ProgressSnapshot`, etc.)
pub mod models;
