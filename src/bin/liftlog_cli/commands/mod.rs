// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Command modules for liftlog-cli and the shared store opener
// ABOUTME: Provides access to workout logging and progress reporting commands

pub mod progress;
pub mod workout;

use std::path::Path;
use std::sync::Arc;

use liftlog::{
    config::ProgressConfig,
    errors::{AppError, AppResult},
    store::{RecordStore, SqliteRecordStore},
};
use tracing::debug;

/// Open the configured SQLite store, creating its parent directory if needed
pub async fn open_store(config: &ProgressConfig) -> AppResult<Arc<dyn RecordStore>> {
    ensure_parent_dir(&config.database_url)?;
    let store =
        SqliteRecordStore::connect(&config.database_url, config.change_channel_capacity).await?;
    Ok(Arc::new(store))
}

fn ensure_parent_dir(database_url: &str) -> AppResult<()> {
    let Some(path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let path = path.trim_start_matches("//");
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }
    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!(directory = %parent.display(), "Creating database directory");
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }
    Ok(())
}
