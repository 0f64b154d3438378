// ABOUTME: Workout commands for liftlog-cli
// ABOUTME: Logs new workouts with muscle group entries and deletes existing ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use liftlog::{
    errors::AppResult,
    models::{MuscleGroup, NewWorkout, WorkoutRecord},
    store::RecordStore,
};
use tracing::info;
use uuid::Uuid;

use crate::helpers::display::display_logged_workout;

/// Parsed `log` arguments
pub struct LogRequest {
    pub user_id: Uuid,
    pub energy_level: u8,
    pub duration_minutes: Option<u32>,
    pub total_volume: Option<f64>,
    pub mood: Option<String>,
    pub muscle_groups: Vec<(MuscleGroup, f64)>,
    pub at: Option<DateTime<Utc>>,
}

impl LogRequest {
    fn into_submission(self) -> NewWorkout {
        let summed: f64 = self.muscle_groups.iter().map(|(_, weight)| weight).sum();
        let mut workout = NewWorkout::new(self.user_id, self.energy_level);
        if let Some(at) = self.at {
            workout = workout.at(at);
        }
        if let Some(minutes) = self.duration_minutes {
            workout = workout.duration_minutes(minutes);
        }
        match self.total_volume {
            Some(volume) => workout = workout.total_volume(volume),
            None if !self.muscle_groups.is_empty() => workout = workout.total_volume(summed),
            None => {}
        }
        if let Some(mood) = self.mood {
            workout = workout.mood(mood);
        }
        self.muscle_groups
            .into_iter()
            .fold(workout, |workout, (group, weight)| {
                workout.muscle_group(group, weight)
            })
    }
}

/// Insert a workout and print what was stored
pub async fn log(store: &Arc<dyn RecordStore>, request: LogRequest) -> AppResult<WorkoutRecord> {
    let submission = request.into_submission();
    let entry_count = submission.muscle_groups.len();
    let record = store.insert_workout(submission).await?;
    info!(
        record.id = %record.id,
        user.id = %record.user_id,
        entries = entry_count,
        "Workout logged"
    );
    display_logged_workout(&record, entry_count);
    Ok(record)
}

/// Delete one of the user's workouts
pub async fn delete(store: &Arc<dyn RecordStore>, user_id: Uuid, record_id: Uuid) -> AppResult<()> {
    store.delete_workout(user_id, record_id).await?;
    info!(record.id = %record_id, user.id = %user_id, "Workout deleted");
    println!("Deleted workout {record_id}");
    Ok(())
}
