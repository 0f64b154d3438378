// ABOUTME: Main library entry point for the liftlog progress engine
// ABOUTME: Streaks, all-time stats, and muscle-group totals kept live over a workout record store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Liftlog
//!
//! Progress aggregation for a strength-training log. Given the workout records
//! of one user, the engine derives:
//!
//! - **Streak**: consecutive calendar days with at least one workout, counted
//!   backward from today in the viewer's timezone
//! - **Stats**: total workouts, total lifted volume, and mean session duration
//! - **Muscle-group volume**: lifted weight per muscle group, in first-seen order
//!
//! A [`refresh::LiveRefreshController`] keeps those aggregates current: it
//! subscribes to the record store's change stream and recomputes everything
//! from the full record set whenever a workout is added, edited, or removed.
//!
//! ## Architecture
//!
//! - **Progress**: pure aggregation functions over in-memory records
//! - **Store**: the `RecordStore` trait plus in-memory and `SQLite` backends
//! - **Refresh**: the live controller, its clock, and its lifecycle
//! - **Notifications**: user-facing warnings when a refresh fails
//! - **Config / Logging**: environment-driven setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use liftlog::errors::AppResult;
//! use liftlog::models::{MuscleGroup, NewWorkout};
//! use liftlog::refresh::LiveRefreshController;
//! use liftlog::store::{InMemoryRecordStore, RecordStore};
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let store = Arc::new(InMemoryRecordStore::new());
//!     let user_id = Uuid::new_v4();
//!     let controller = LiveRefreshController::builder(store.clone(), user_id)
//!         .start()
//!         .await?;
//!
//!     store
//!         .insert_workout(NewWorkout::new(user_id, 4).muscle_group(MuscleGroup::Legs, 1200.0))
//!         .await?;
//!     let snapshot = controller.refresh_now().await?;
//!     println!("streak: {} days", snapshot.streak_days);
//!
//!     controller.shutdown().await;
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;
/// Application constants
pub mod constants;
/// Error types and codes
pub mod errors;
/// Structured logging setup
pub mod logging;
/// Workout and progress data models
pub mod models;
/// User-facing refresh notifications
pub mod notifications;
/// Streak, stats, and muscle-group aggregation
pub mod progress;
/// Live refresh controller
pub mod refresh;
/// Record store abstraction and backends
pub mod store;

/// Test utilities for creating consistent test data
#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
