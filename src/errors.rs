// ABOUTME: Error handling re-exported from liftlog-core
// ABOUTME: Keeps crate::errors paths stable for the store, controller, and CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! All error types live in `liftlog-core` so the models crate can construct
//! them without depending on the engine.

pub use liftlog_core::errors::*;
