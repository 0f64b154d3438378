// ABOUTME: Application constants re-exported from liftlog-core
// ABOUTME: Streak window, validation limits, channel sizes, and environment keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use liftlog_core::constants::*;
