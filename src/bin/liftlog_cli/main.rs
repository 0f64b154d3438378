// ABOUTME: Liftlog CLI - log workouts and inspect progress from the command line
// ABOUTME: Wraps the SQLite record store and the live refresh controller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Log a workout with two muscle groups
//! liftlog-cli log --user <uuid> --energy 4 --duration 50 --muscle chest=1200 --muscle triceps=400
//!
//! # Remove a workout and its muscle group entries
//! liftlog-cli delete --user <uuid> <record-id>
//!
//! # Print streak, stats, and muscle group totals
//! liftlog-cli progress --user <uuid> --json
//!
//! # Keep progress live; type commands on stdin until Ctrl-C
//! liftlog-cli watch --user <uuid>
//!
//! # Show effective configuration
//! liftlog-cli config
//! ```

mod commands;
mod helpers;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use liftlog::{
    config::ProgressConfig,
    errors::{AppError, AppResult},
    logging::LoggingConfig,
    models::MuscleGroup,
};
use tracing::{debug, info};
use uuid::Uuid;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "liftlog-cli",
    about = "Liftlog workout progress CLI",
    long_about = "Log strength workouts and inspect streaks, all-time stats, and per-muscle-group volume."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Log a workout
    Log {
        /// User the workout belongs to
        #[arg(long)]
        user: Uuid,

        /// Energy level from 1 to 5
        #[arg(long, default_value_t = 3)]
        energy: u8,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<u32>,

        /// Total volume in pounds (defaults to the sum of muscle group weights)
        #[arg(long)]
        volume: Option<f64>,

        /// Short mood note
        #[arg(long)]
        mood: Option<String>,

        /// Muscle group entry as GROUP=WEIGHT, repeatable
        #[arg(long = "muscle", value_parser = helpers::parse::parse_muscle_entry)]
        muscles: Vec<(MuscleGroup, f64)>,

        /// Log time in RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Delete a workout and its muscle group entries
    Delete {
        /// Owner of the workout
        #[arg(long)]
        user: Uuid,

        /// Workout record ID
        record_id: Uuid,
    },

    /// Print current progress
    Progress {
        /// User to report on
        #[arg(long)]
        user: Uuid,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Keep progress live and print every update until Ctrl-C
    Watch {
        /// User to watch
        #[arg(long)]
        user: Uuid,
    },

    /// Print effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose)
        .init()
        .map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

    let mut config = ProgressConfig::from_env();
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }
    config.validate()?;
    debug!(database.url = %config.database_url, "Configuration loaded");

    if matches!(cli.command, Command::Config) {
        return helpers::display::display_config(&config);
    }

    let store = commands::open_store(&config).await?;
    info!("Liftlog CLI connected");

    match cli.command {
        Command::Log {
            user,
            energy,
            duration,
            volume,
            mood,
            muscles,
            at,
        } => {
            let request = commands::workout::LogRequest {
                user_id: user,
                energy_level: energy,
                duration_minutes: duration,
                total_volume: volume,
                mood,
                muscle_groups: muscles,
                at,
            };
            commands::workout::log(&store, request).await?;
        }
        Command::Delete { user, record_id } => {
            commands::workout::delete(&store, user, record_id).await?;
        }
        Command::Progress { user, json } => {
            commands::progress::show(store, &config, user, json).await?;
        }
        Command::Watch { user } => {
            commands::progress::watch(store, &config, user).await?;
        }
        Command::Config => {}
    }

    Ok(())
}
