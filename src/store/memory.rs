// ABOUTME: In-memory record store holding raw rows behind a tokio RwLock
// ABOUTME: Supports fetch-failure injection and raw row seeding for malformed-data scenarios
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::{
    ChangeEvent, ChangeKind, ChangeNotifier, ChangeSubscription, ChangeTable, FetchOutcome,
    ProgressData, RecordStore,
};
use crate::constants::channels::DEFAULT_CHANGE_CHANNEL_CAPACITY;
use crate::errors::StoreError;
use crate::models::{
    MuscleGroupEntry, MuscleGroupEntryRow, NewWorkout, WorkoutRecord, WorkoutRecordRow,
};

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<WorkoutRecordRow>,
    entries: Vec<MuscleGroupEntryRow>,
}

/// Record store kept entirely in process memory.
///
/// Rows are kept in their raw stored shape so that malformed data can be
/// seeded and exercised through the same validation path as a database.
#[derive(Clone)]
pub struct InMemoryRecordStore {
    state: Arc<RwLock<MemoryState>>,
    notifier: ChangeNotifier,
    fail_fetches: Arc<AtomicBool>,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    /// Create an empty store with the default change channel capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_change_capacity(DEFAULT_CHANGE_CHANNEL_CAPACITY)
    }

    /// Create an empty store buffering `capacity` change events per listener
    #[must_use]
    pub fn with_change_capacity(capacity: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
            notifier: ChangeNotifier::new(capacity),
            fail_fetches: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent fetch fail (or succeed again)
    pub fn set_fetch_failure(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Seed a raw workout row without validation or notification
    pub async fn insert_raw_record(&self, row: WorkoutRecordRow) {
        self.state.write().await.records.push(row);
    }

    /// Seed a raw muscle group row without validation or notification
    pub async fn insert_raw_entry(&self, row: MuscleGroupEntryRow) {
        self.state.write().await.entries.push(row);
    }

    /// Announce a change made through the raw seeding helpers
    pub fn notify(&self, event: ChangeEvent) {
        self.notifier.publish(event);
    }

    fn check_fetch(&self, user_id: Uuid, what: &'static str) -> Result<(), StoreError> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(StoreError::fetch_failed(
                user_id,
                what,
                "in-memory store configured to fail",
            ));
        }
        Ok(())
    }
}

/// Whether a stored identifier names `id`, whatever its textual form
fn is_id(raw: &str, id: Uuid) -> bool {
    Uuid::parse_str(raw).is_ok_and(|parsed| parsed == id)
}

impl MemoryState {
    fn records_for(&self, user_id: Uuid) -> Vec<WorkoutRecordRow> {
        self.records
            .iter()
            .filter(|row| is_id(&row.user_id, user_id))
            .cloned()
            .collect()
    }

    fn entries_for(&self, user_id: Uuid) -> Vec<MuscleGroupEntryRow> {
        let owned_records: HashSet<Uuid> = self
            .records
            .iter()
            .filter(|row| is_id(&row.user_id, user_id))
            .filter_map(|row| Uuid::parse_str(&row.id).ok())
            .collect();
        self.entries
            .iter()
            .filter(|row| {
                Uuid::parse_str(&row.workout_record_id)
                    .is_ok_and(|record_id| owned_records.contains(&record_id))
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch_records_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<FetchOutcome<WorkoutRecord>, StoreError> {
        self.check_fetch(user_id, "workout records")?;
        let rows = self.state.read().await.records_for(user_id);
        Ok(FetchOutcome::from_rows(rows))
    }

    async fn fetch_muscle_group_entries_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<FetchOutcome<MuscleGroupEntry>, StoreError> {
        self.check_fetch(user_id, "muscle group entries")?;
        let rows = self.state.read().await.entries_for(user_id);
        Ok(FetchOutcome::from_rows(rows))
    }

    async fn fetch_progress_data(&self, user_id: Uuid) -> Result<ProgressData, StoreError> {
        self.check_fetch(user_id, "progress data")?;
        let (records, entries) = {
            let state = self.state.read().await;
            (state.records_for(user_id), state.entries_for(user_id))
        };
        Ok(ProgressData::new(
            FetchOutcome::from_rows(records),
            FetchOutcome::from_rows(entries),
        ))
    }

    async fn insert_workout(&self, workout: NewWorkout) -> Result<WorkoutRecord, StoreError> {
        workout.validate()?;
        let (record, entries) = workout.into_records(Uuid::new_v4(), Utc::now());

        {
            let mut state = self.state.write().await;
            state.records.push(WorkoutRecordRow::from(&record));
            state
                .entries
                .extend(entries.iter().map(MuscleGroupEntryRow::from));
        }

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
        {
            let mut state = self.state.write().await;
            let before = state.records.len();
            state
                .records
                .retain(|row| !(is_id(&row.id, record_id) && is_id(&row.user_id, user_id)));
            if state.records.len() == before {
                return Err(StoreError::NotFound { record_id });
            }
            state
                .entries
                .retain(|row| !is_id(&row.workout_record_id, record_id));
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
        Ok(self.notifier.subscribe(user_id))
    }

    fn active_subscriptions(&self) -> usize {
        self.notifier.subscriber_count()
    }
}
