// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for liftlog-cli
// ABOUTME: Provides consistent display functions for progress snapshots and workouts

use liftlog::{
    config::ProgressConfig,
    errors::AppResult,
    models::{ProgressSnapshot, WorkoutRecord},
    notifications::{NotificationLevel, ProgressNotification},
};

/// Display a progress snapshot as text
pub fn display_progress(snapshot: &ProgressSnapshot) {
    println!("\nProgress");
    println!("{}", "=".repeat(40));
    if !snapshot.is_computed() {
        println!("   Not loaded yet");
        return;
    }

    let day_label = if snapshot.streak_days == 1 { "day" } else { "days" };
    println!("   Streak: {} {day_label}", snapshot.streak_days);
    println!("   Workouts: {}", snapshot.stats.total_workouts);
    println!("   Total volume: {:.0} lbs", snapshot.stats.total_volume);
    println!(
        "   Average duration: {} min",
        snapshot.stats.average_duration_minutes
    );

    if snapshot.muscle_group_volumes.is_empty() {
        println!("   Muscle groups: none logged");
    } else {
        println!("   Muscle groups:");
        for volume in &snapshot.muscle_group_volumes {
            println!(
                "     {:<10} {:>10.0} lbs",
                volume.muscle_group.display_name(),
                volume.total_volume
            );
        }
    }

    if snapshot.skipped_rows > 0 {
        println!("   Skipped unreadable entries: {}", snapshot.skipped_rows);
    }
}

/// Display a progress snapshot as pretty JSON
pub fn display_progress_json(snapshot: &ProgressSnapshot) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}

/// Display a user-facing notification
pub fn display_notification(notification: &ProgressNotification) {
    let label = match notification.level {
        NotificationLevel::Info => "Info",
        NotificationLevel::Warning => "Warning",
        NotificationLevel::Error => "Error",
    };
    eprintln!("[{label}] {}", notification.message);
}

/// Display a freshly logged workout
pub fn display_logged_workout(record: &WorkoutRecord, entry_count: usize) {
    println!("Logged workout {}", record.id);
    println!("   At: {}", record.created_at.format("%Y-%m-%d %H:%M UTC"));
    if let Some(minutes) = record.duration_minutes {
        println!("   Duration: {minutes} min");
    }
    if let Some(volume) = record.total_volume {
        println!("   Volume: {volume:.0} lbs");
    }
    println!("   Muscle group entries: {entry_count}");
}

/// Display interactive watch commands
pub fn display_watch_help() {
    println!("\nCommands:");
    println!("   log GROUP=WEIGHT [GROUP=WEIGHT ...]   log a workout now");
    println!("   delete <record-id>                    delete a workout");
    println!("   refresh                               recompute progress");
    println!("   quit                                  stop watching (or Ctrl-C)");
}

/// Display effective configuration as pretty JSON
pub fn display_config(config: &ProgressConfig) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
