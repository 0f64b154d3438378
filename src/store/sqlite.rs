// ABOUTME: SQLite record store built on sqlx with cascade deletes and change notifications
// ABOUTME: Validates rows at read time and publishes change events after committed writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    ChangeEvent, ChangeKind, ChangeNotifier, ChangeSubscription, ChangeTable, FetchOutcome,
    ProgressData, RecordStore,
};
use crate::errors::{RecordError, StoreError};
use crate::models::{
    MuscleGroupEntry, MuscleGroupEntryRow, NewWorkout, WorkoutRecord, WorkoutRecordRow,
};

/// Record store persisted in a SQLite database
#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
    notifier: ChangeNotifier,
}

impl SqliteRecordStore {
    /// Open (creating if needed) the database at `database_url` and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the database cannot be opened,
    /// or a migration fails.
    pub async fn connect(database_url: &str, change_capacity: usize) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` opens its own database, so keep one
        let max_connections = if database_url.contains(":memory:") {
            1
        } else {
            5
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self {
            pool,
            notifier: ChangeNotifier::new(change_capacity),
        };
        store.migrate().await?;

        info!(database.url = %database_url, "Record store ready");
        Ok(store)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_records (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                duration_minutes INTEGER,
                total_volume REAL,
                mood TEXT,
                energy_level INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS muscle_group_entries (
                id TEXT PRIMARY KEY,
                workout_record_id TEXT NOT NULL REFERENCES workout_records(id) ON DELETE CASCADE,
                muscle_group TEXT NOT NULL,
                total_weight REAL NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_records_user ON workout_records(user_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_muscle_group_entries_record ON muscle_group_entries(workout_record_id)")
            .execute(&self.pool)
            .await?;

        debug!("Record store migrations applied");
        Ok(())
    }

    fn record_row(row: &SqliteRow) -> Result<WorkoutRecordRow, RecordError> {
        let id: String = decode_column(row, UNKNOWN_ROW, "id")?;
        Ok(WorkoutRecordRow {
            user_id: decode_column(row, &id, "user_id")?,
            created_at: decode_column(row, &id, "created_at")?,
            duration_minutes: decode_column(row, &id, "duration_minutes")?,
            total_volume: decode_column(row, &id, "total_volume")?,
            mood: decode_column(row, &id, "mood")?,
            energy_level: decode_column(row, &id, "energy_level")?,
            id,
        })
    }

    fn entry_row(row: &SqliteRow) -> Result<MuscleGroupEntryRow, RecordError> {
        let id: String = decode_column(row, UNKNOWN_ROW, "id")?;
        Ok(MuscleGroupEntryRow {
            workout_record_id: decode_column(row, &id, "workout_record_id")?,
            muscle_group: decode_column(row, &id, "muscle_group")?,
            total_weight: decode_column(row, &id, "total_weight")?,
            id,
        })
    }

    async fn query_records(
        conn: &mut SqliteConnection,
        user_id: Uuid,
    ) -> Result<FetchOutcome<WorkoutRecord>, StoreError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, created_at, duration_minutes, total_volume, mood, energy_level
            FROM workout_records
            WHERE user_id = ?
            ORDER BY created_at, rowid
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(conn)
        .await
        .map_err(|e| StoreError::fetch_failed(user_id, "workout records", e.to_string()))?;

        Ok(FetchOutcome::from_decoded(rows.iter().map(Self::record_row)))
    }

    async fn query_entries(
        conn: &mut SqliteConnection,
        user_id: Uuid,
    ) -> Result<FetchOutcome<MuscleGroupEntry>, StoreError> {
        let rows = sqlx::query(
            r"
            SELECT e.id, e.workout_record_id, e.muscle_group, e.total_weight
            FROM muscle_group_entries e
            JOIN workout_records w ON w.id = e.workout_record_id
            WHERE w.user_id = ?
            ORDER BY e.rowid
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(conn)
        .await
        .map_err(|e| StoreError::fetch_failed(user_id, "muscle group entries", e.to_string()))?;

        Ok(FetchOutcome::from_decoded(rows.iter().map(Self::entry_row)))
    }

    async fn acquire(
        &self,
        user_id: Uuid,
        what: &'static str,
    ) -> Result<sqlx::pool::PoolConnection<Sqlite>, StoreError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| StoreError::fetch_failed(user_id, what, e.to_string()))
    }
}

const UNKNOWN_ROW: &str = "unknown";

/// Read one column, turning a type mismatch into a rejection of that row only
fn decode_column<'r, T>(
    row: &'r SqliteRow,
    row_id: &str,
    column: &'static str,
) -> Result<T, RecordError>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get(column).map_err(|e| RecordError::UndecodableColumn {
        row_id: row_id.to_owned(),
        column,
        reason: e.to_string(),
    })
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn fetch_records_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<FetchOutcome<WorkoutRecord>, StoreError> {
        let mut conn = self.acquire(user_id, "workout records").await?;
        Self::query_records(&mut conn, user_id).await
    }

    async fn fetch_muscle_group_entries_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<FetchOutcome<MuscleGroupEntry>, StoreError> {
        let mut conn = self.acquire(user_id, "muscle group entries").await?;
        Self::query_entries(&mut conn, user_id).await
    }

    async fn fetch_progress_data(&self, user_id: Uuid) -> Result<ProgressData, StoreError> {
        // Both reads share one transaction so they see the same committed state
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::fetch_failed(user_id, "progress data", e.to_string()))?;
        let records = Self::query_records(&mut tx, user_id).await?;
        let entries = Self::query_entries(&mut tx, user_id).await?;
        tx.commit()
            .await
            .map_err(|e| StoreError::fetch_failed(user_id, "progress data", e.to_string()))?;
        Ok(ProgressData::new(records, entries))
    }

    async fn insert_workout(&self, workout: NewWorkout) -> Result<WorkoutRecord, StoreError> {
        workout.validate()?;
        let (record, entries) = workout.into_records(Uuid::new_v4(), Utc::now());
        let row = WorkoutRecordRow::from(&record);

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r"
            INSERT INTO workout_records
                (id, user_id, created_at, duration_minutes, total_volume, mood, energy_level)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.created_at)
        .bind(row.duration_minutes)
        .bind(row.total_volume)
        .bind(&row.mood)
        .bind(row.energy_level)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::write_failed(e.to_string()))?;

        for entry in entries.iter().map(MuscleGroupEntryRow::from) {
            sqlx::query(
                r"
                INSERT INTO muscle_group_entries (id, workout_record_id, muscle_group, total_weight)
                VALUES (?, ?, ?, ?)
                ",
            )
            .bind(&entry.id)
            .bind(&entry.workout_record_id)
            .bind(&entry.muscle_group)
            .bind(entry.total_weight)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::write_failed(e.to_string()))?;
        }
        tx.commit().await?;

        info!(
            user.id = %record.user_id,
            workout.id = %record.id,
            workout.muscle_groups = entries.len(),
            "Workout logged"
        );
        self.notifier.publish(ChangeEvent {
            user_id: record.user_id,
            table: ChangeTable::WorkoutRecords,
            kind: ChangeKind::Inserted,
            record_id: record.id,
        });
        Ok(record)
    }

    async fn delete_workout(&self, user_id: Uuid, record_id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM workout_records WHERE id = ? AND user_id = ?")
            .bind(record_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::write_failed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { record_id });
        }

        info!(user.id = %user_id, workout.id = %record_id, "Workout deleted");
        self.notifier.publish(ChangeEvent {
            user_id,
            table: ChangeTable::WorkoutRecords,
            kind: ChangeKind::Deleted,
            record_id,
        });
        Ok(())
    }

    fn subscribe_to_changes(&self, user_id: Uuid) -> Result<ChangeSubscription, StoreError> {
        if self.pool.is_closed() {
            return Err(StoreError::SubscribeFailed {
                user_id,
                reason: "database pool is closed".to_owned(),
            });
        }
        Ok(self.notifier.subscribe(user_id))
    }

    fn active_subscriptions(&self) -> usize {
        self.notifier.subscriber_count()
    }
}
