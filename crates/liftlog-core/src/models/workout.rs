// ABOUTME: Workout record and muscle group entry models with boundary validation
// ABOUTME: Converts loose stored rows into validated records, classifying failures as malformed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MuscleGroup;
use crate::constants::validation::{MAX_ENERGY_LEVEL, MAX_MOOD_CHARS, MIN_ENERGY_LEVEL};
use crate::errors::RecordError;

/// A logged workout. Immutable once created; only deletion is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// When the workout was logged
    pub created_at: DateTime<Utc>,
    /// Duration in minutes, `None` when the form left it blank
    pub duration_minutes: Option<u32>,
    /// Total weight moved in pounds, `None` when the form left it blank
    pub total_volume: Option<f64>,
    /// Short free-text mood note
    pub mood: Option<String>,
    /// Self-reported energy level (1-5)
    pub energy_level: u8,
}

/// Weight moved for one muscle group within a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroupEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Owning workout record; the entry is deleted with it
    pub workout_record_id: Uuid,
    /// Muscle group tag
    pub muscle_group: MuscleGroup,
    /// Weight moved in pounds
    pub total_weight: f64,
}

/// Workout row exactly as a backend stores it, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecordRow {
    /// Identifier text
    pub id: String,
    /// Owning user identifier text
    pub user_id: String,
    /// RFC 3339 or `YYYY-MM-DD HH:MM:SS` text
    pub created_at: String,
    /// Nullable duration column
    pub duration_minutes: Option<i64>,
    /// Nullable volume column
    pub total_volume: Option<f64>,
    /// Nullable mood column
    pub mood: Option<String>,
    /// Energy level column
    pub energy_level: i64,
}

/// Muscle group row exactly as a backend stores it, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroupEntryRow {
    /// Identifier text
    pub id: String,
    /// Owning workout identifier text
    pub workout_record_id: String,
    /// Raw tag text
    pub muscle_group: String,
    /// Weight column
    pub total_weight: f64,
}

/// Muscle group portion of a workout submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMuscleGroupEntry {
    /// Muscle group tag
    pub muscle_group: MuscleGroup,
    /// Weight moved in pounds
    pub total_weight: f64,
}

/// A workout submission: one record plus its muscle group entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    /// Submitting user
    pub user_id: Uuid,
    /// Explicit log time; `None` means "now"
    pub created_at: Option<DateTime<Utc>>,
    /// Duration in minutes
    pub duration_minutes: Option<u32>,
    /// Total weight moved in pounds
    pub total_volume: Option<f64>,
    /// Short mood note
    pub mood: Option<String>,
    /// Energy level (1-5)
    pub energy_level: u8,
    /// Per-muscle-group weight entries
    pub muscle_groups: Vec<NewMuscleGroupEntry>,
}

/// Parse a stored timestamp in either RFC 3339 or SQLite `DATETIME` text form.
/// Naive SQLite text is read as UTC.
#[must_use]
pub fn parse_stored_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
}

fn parse_uuid(column: &'static str, raw: &str) -> Result<Uuid, RecordError> {
    Uuid::parse_str(raw.trim()).map_err(|_| RecordError::InvalidIdentifier {
        column,
        raw: raw.to_owned(),
    })
}

fn check_non_negative(record_id: &str, field: &'static str, value: f64) -> Result<(), RecordError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RecordError::NegativeValue {
            record_id: record_id.to_owned(),
            field,
            value,
        })
    }
}

fn check_energy(record_id: &str, value: i64) -> Result<u8, RecordError> {
    u8::try_from(value)
        .ok()
        .filter(|level| (MIN_ENERGY_LEVEL..=MAX_ENERGY_LEVEL).contains(level))
        .ok_or_else(|| RecordError::EnergyOutOfRange {
            record_id: record_id.to_owned(),
            value,
        })
}

fn check_mood(record_id: &str, mood: Option<&str>) -> Result<(), RecordError> {
    let length = mood.map_or(0, |m| m.chars().count());
    if length > MAX_MOOD_CHARS {
        return Err(RecordError::MoodTooLong {
            record_id: record_id.to_owned(),
            length,
        });
    }
    Ok(())
}

impl TryFrom<WorkoutRecordRow> for WorkoutRecord {
    type Error = RecordError;

    fn try_from(row: WorkoutRecordRow) -> Result<Self, Self::Error> {
        let id = parse_uuid("workout_records.id", &row.id)?;
        let user_id = parse_uuid("workout_records.user_id", &row.user_id)?;
        let created_at =
            parse_stored_timestamp(&row.created_at).ok_or_else(|| RecordError::InvalidTimestamp {
                record_id: row.id.clone(),
                raw: row.created_at.clone(),
            })?;

        let duration_minutes = match row.duration_minutes {
            Some(minutes) => Some(u32::try_from(minutes).map_err(|_| {
                RecordError::NegativeValue {
                    record_id: row.id.clone(),
                    field: "duration_minutes",
                    value: minutes as f64,
                }
            })?),
            None => None,
        };
        if let Some(volume) = row.total_volume {
            check_non_negative(&row.id, "total_volume", volume)?;
        }
        let energy_level = check_energy(&row.id, row.energy_level)?;
        check_mood(&row.id, row.mood.as_deref())?;

        Ok(Self {
            id,
            user_id,
            created_at,
            duration_minutes,
            total_volume: row.total_volume,
            mood: row.mood,
            energy_level,
        })
    }
}

impl TryFrom<MuscleGroupEntryRow> for MuscleGroupEntry {
    type Error = RecordError;

    fn try_from(row: MuscleGroupEntryRow) -> Result<Self, Self::Error> {
        let id = parse_uuid("muscle_group_entries.id", &row.id)?;
        let workout_record_id =
            parse_uuid("muscle_group_entries.workout_record_id", &row.workout_record_id)?;
        let muscle_group =
            MuscleGroup::parse(&row.muscle_group).ok_or_else(|| RecordError::UnknownMuscleGroup {
                entry_id: row.id.clone(),
                tag: row.muscle_group.clone(),
            })?;
        check_non_negative(&row.id, "total_weight", row.total_weight)?;

        Ok(Self {
            id,
            workout_record_id,
            muscle_group,
            total_weight: row.total_weight,
        })
    }
}

impl From<&WorkoutRecord> for WorkoutRecordRow {
    fn from(record: &WorkoutRecord) -> Self {
        Self {
            id: record.id.to_string(),
            user_id: record.user_id.to_string(),
            created_at: record.created_at.to_rfc3339(),
            duration_minutes: record.duration_minutes.map(i64::from),
            total_volume: record.total_volume,
            mood: record.mood.clone(),
            energy_level: i64::from(record.energy_level),
        }
    }
}

impl From<&MuscleGroupEntry> for MuscleGroupEntryRow {
    fn from(entry: &MuscleGroupEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            workout_record_id: entry.workout_record_id.to_string(),
            muscle_group: entry.muscle_group.as_str().to_owned(),
            total_weight: entry.total_weight,
        }
    }
}

impl NewWorkout {
    /// Start a submission for a user with the given energy level
    #[must_use]
    pub const fn new(user_id: Uuid, energy_level: u8) -> Self {
        Self {
            user_id,
            created_at: None,
            duration_minutes: None,
            total_volume: None,
            mood: None,
            energy_level,
            muscle_groups: Vec::new(),
        }
    }

    /// Set an explicit log time
    #[must_use]
    pub const fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set the duration in minutes
    #[must_use]
    pub const fn duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Set the total volume in pounds
    #[must_use]
    pub const fn total_volume(mut self, volume: f64) -> Self {
        self.total_volume = Some(volume);
        self
    }

    /// Set the mood note
    #[must_use]
    pub fn mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    /// Add a muscle group entry
    #[must_use]
    pub fn muscle_group(mut self, muscle_group: MuscleGroup, total_weight: f64) -> Self {
        self.muscle_groups.push(NewMuscleGroupEntry {
            muscle_group,
            total_weight,
        });
        self
    }

    /// Validate the submission against the same rules applied to stored rows
    ///
    /// # Errors
    ///
    /// Returns the first `RecordError` found.
    pub fn validate(&self) -> Result<(), RecordError> {
        let label = "new workout";
        if let Some(volume) = self.total_volume {
            check_non_negative(label, "total_volume", volume)?;
        }
        check_energy(label, i64::from(self.energy_level))?;
        check_mood(label, self.mood.as_deref())?;
        for entry in &self.muscle_groups {
            check_non_negative(label, "total_weight", entry.total_weight)?;
        }
        Ok(())
    }

    /// Split the submission into the records a store persists
    #[must_use]
    pub fn into_records(
        self,
        record_id: Uuid,
        now: DateTime<Utc>,
    ) -> (WorkoutRecord, Vec<MuscleGroupEntry>) {
        let record = WorkoutRecord {
            id: record_id,
            user_id: self.user_id,
            created_at: self.created_at.unwrap_or(now),
            duration_minutes: self.duration_minutes,
            total_volume: self.total_volume,
            mood: self.mood,
            energy_level: self.energy_level,
        };
        let entries = self
            .muscle_groups
            .into_iter()
            .map(|entry| MuscleGroupEntry {
                id: Uuid::new_v4(),
                workout_record_id: record_id,
                muscle_group: entry.muscle_group,
                total_weight: entry.total_weight,
            })
            .collect();
        (record, entries)
    }
}
