// ABOUTME: Progress commands for liftlog-cli
// ABOUTME: One-shot progress reports and an interactive live watch session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use liftlog::{
    config::ProgressConfig,
    errors::AppResult,
    notifications::NotificationCenter,
    refresh::LiveRefreshController,
    store::RecordStore,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};
use uuid::Uuid;

use super::workout::{self, LogRequest};
use crate::helpers::display::{
    display_notification, display_progress, display_progress_json, display_watch_help,
};
use crate::helpers::parse::parse_muscle_entry;

/// Compute progress once and print it
pub async fn show(
    store: Arc<dyn RecordStore>,
    config: &ProgressConfig,
    user_id: Uuid,
    json: bool,
) -> AppResult<()> {
    let controller = LiveRefreshController::builder(store, user_id)
        .aggregator(config.aggregator())
        .start()
        .await?;

    let mut snapshot = controller.snapshot();
    if !snapshot.is_computed() {
        // First load failed; retry once so the caller sees the actual error
        snapshot = controller.refresh_now().await?;
    }
    controller.shutdown().await;

    if json {
        display_progress_json(&snapshot)
    } else {
        display_progress(&snapshot);
        Ok(())
    }
}

/// Keep progress live, reading workout commands from stdin until Ctrl-C
pub async fn watch(
    store: Arc<dyn RecordStore>,
    config: &ProgressConfig,
    user_id: Uuid,
) -> AppResult<()> {
    let notifications = NotificationCenter::new(config.notification_channel_capacity);
    let mut alerts = notifications.subscribe();
    let controller = LiveRefreshController::builder(Arc::clone(&store), user_id)
        .aggregator(config.aggregator())
        .notifications(notifications)
        .start()
        .await?;
    let mut updates = controller.subscribe();

    display_progress(&controller.snapshot());
    display_watch_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut alerts_open = true;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = Arc::clone(&updates.borrow_and_update());
                display_progress(&snapshot);
            }
            alert = alerts.recv(), if alerts_open => match alert {
                Ok(notification) if notification.user_id == user_id => {
                    display_notification(&notification);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => debug!(missed, "Missed notifications"),
                Err(RecvError::Closed) => alerts_open = false,
            },
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    if !run_watch_command(&store, &controller, user_id, line.trim()).await {
                        break;
                    }
                }
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin, watching without commands");
                    stdin_open = false;
                }
            },
        }
    }

    controller.shutdown().await;
    Ok(())
}

/// Run one interactive command; returns false when the session should end
async fn run_watch_command(
    store: &Arc<dyn RecordStore>,
    controller: &LiveRefreshController,
    user_id: Uuid,
    line: &str,
) -> bool {
    let mut words = line.split_whitespace();
    let result = match words.next() {
        None => Ok(()),
        Some("quit" | "exit") => return false,
        Some("help") => {
            display_watch_help();
            Ok(())
        }
        Some("refresh") => controller.refresh_now().await.map(|_| ()),
        Some("log") => match words.map(parse_muscle_entry).collect::<Result<Vec<_>, _>>() {
            Ok(muscle_groups) => {
                let request = LogRequest {
                    user_id,
                    energy_level: 3,
                    duration_minutes: None,
                    total_volume: None,
                    mood: None,
                    muscle_groups,
                    at: None,
                };
                workout::log(store, request).await.map(|_| ())
            }
            Err(message) => {
                eprintln!("{message}");
                Ok(())
            }
        },
        Some("delete") => match words.next().map(Uuid::parse_str) {
            Some(Ok(record_id)) => workout::delete(store, user_id, record_id).await,
            _ => {
                eprintln!("usage: delete <record-id>");
                Ok(())
            }
        },
        Some(other) => {
            eprintln!("Unknown command '{other}', type 'help' for commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }
    true
}
