// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Helper modules for liftlog-cli
// ABOUTME: Output formatting and argument parsing utilities

pub mod display;
pub mod parse;
