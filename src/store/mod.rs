// ABOUTME: Record store abstraction for workout records and muscle group entries
// ABOUTME: Defines the RecordStore trait, change events, and subscription handles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Record Store
//!
//! The record store owns the persisted workout data. The progress engine only
//! reads from it and listens for change events; it never mutates rows itself.
//!
//! Rows are validated at this boundary: every fetch returns a `FetchOutcome`
//! holding the rows that converted cleanly and the `RecordError`s for the rows
//! that did not. One bad row never fails a whole fetch.
//!
//! The refresh controller reads through `fetch_progress_data`, which returns
//! records and entries from one consistent read so a concurrent write can
//! never be half-observed.

/// In-memory store for tests and demos
pub mod memory;
/// SQLite-backed store
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::InMemoryRecordStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRecordStore;

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::{RecordError, StoreError};
use crate::models::{MuscleGroupEntry, NewWorkout, WorkoutRecord};

/// Table a change event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTable {
    /// `workout_records`
    WorkoutRecords,
    /// `muscle_group_entries`
    MuscleGroupEntries,
}

/// Kind of row change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Rows were inserted
    Inserted,
    /// Rows were updated
    Updated,
    /// Rows were deleted
    Deleted,
}

/// Notification that a user's workout data changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// User whose data changed
    pub user_id: Uuid,
    /// Affected table
    pub table: ChangeTable,
    /// Kind of change
    pub kind: ChangeKind,
    /// Workout record the change belongs to
    pub record_id: Uuid,
}

/// What a subscription observed while waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSignal {
    /// A change for the subscribed user
    Changed(ChangeEvent),
    /// The receiver fell behind and missed this many events; treat as changed
    Lagged(u64),
}

/// Rows that converted cleanly plus the rows rejected as malformed
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome<T> {
    /// Valid items, in store order
    pub items: Vec<T>,
    /// Validation failures for skipped rows
    pub rejected: Vec<RecordError>,
}

impl<T> FetchOutcome<T> {
    /// Validate raw rows, logging and collecting the ones that fail
    pub fn from_rows<R, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        T: TryFrom<R, Error = RecordError>,
    {
        Self::from_decoded(rows.into_iter().map(Ok))
    }

    /// Validate rows whose backend decoding may already have failed.
    ///
    /// Decode failures are rejected the same way as validation failures.
    pub fn from_decoded<R, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Result<R, RecordError>>,
        T: TryFrom<R, Error = RecordError>,
    {
        let mut items = Vec::new();
        let mut rejected = Vec::new();
        for row in rows {
            match row.and_then(T::try_from) {
                Ok(item) => items.push(item),
                Err(error) => {
                    warn!(row.id = %error.row_id(), error = %error, "Skipping malformed row");
                    rejected.push(error);
                }
            }
        }
        Self { items, rejected }
    }
}

/// Records and entries read together for one progress computation
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressData {
    /// Workout records that passed validation
    pub records: FetchOutcome<WorkoutRecord>,
    /// Entries whose own row and owning record both passed validation
    pub entries: FetchOutcome<MuscleGroupEntry>,
    /// Valid entries dropped because their workout record was rejected
    pub orphaned_entries: usize,
}

impl ProgressData {
    /// Pair both outcomes, dropping entries whose workout record did not
    /// survive validation
    #[must_use]
    pub fn new(
        records: FetchOutcome<WorkoutRecord>,
        mut entries: FetchOutcome<MuscleGroupEntry>,
    ) -> Self {
        let valid_ids: HashSet<Uuid> = records.items.iter().map(|record| record.id).collect();
        let before = entries.items.len();
        entries
            .items
            .retain(|entry| valid_ids.contains(&entry.workout_record_id));
        let orphaned_entries = before - entries.items.len();
        if orphaned_entries > 0 {
            warn!(
                records.orphaned_entries = orphaned_entries,
                "Skipping entries of rejected workout records"
            );
        }
        Self {
            records,
            entries,
            orphaned_entries,
        }
    }

    /// Rows left out of the computation for any reason
    #[must_use]
    pub fn skipped_rows(&self) -> usize {
        self.records.rejected.len() + self.entries.rejected.len() + self.orphaned_entries
    }
}

/// Listener registration for one user's changes.
///
/// Dropping the subscription (or calling `unsubscribe`) releases the listener.
#[derive(Debug)]
pub struct ChangeSubscription {
    user_id: Uuid,
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl ChangeSubscription {
    /// User this subscription filters for
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Wait for the next change affecting the subscribed user.
    ///
    /// Returns `None` once the store has shut down.
    pub async fn changed(&mut self) -> Option<ChangeSignal> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.user_id == self.user_id => {
                    return Some(ChangeSignal::Changed(event));
                }
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => {
                    warn!(user.id = %self.user_id, missed, "Change subscription lagged");
                    return Some(ChangeSignal::Lagged(missed));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Consume every change already queued without waiting.
    ///
    /// Returns how many relevant changes (or lag signals) were discarded.
    pub fn drain_pending(&mut self) -> usize {
        let mut drained = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(event) if event.user_id == self.user_id => drained += 1,
                Ok(_) => {}
                Err(TryRecvError::Lagged(_)) => drained += 1,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        drained
    }

    /// Release the listener
    pub fn unsubscribe(self) {
        debug!(user.id = %self.user_id, "Change subscription released");
    }
}

/// Fan-out of change events shared by store implementations
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    /// Create a notifier buffering up to `capacity` events per receiver
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Register a listener for one user
    #[must_use]
    pub fn subscribe(&self, user_id: Uuid) -> ChangeSubscription {
        debug!(user.id = %user_id, "Change subscription registered");
        ChangeSubscription {
            user_id,
            receiver: self.sender.subscribe(),
        }
    }

    /// Publish a change to every listener; no listeners is not an error
    pub fn publish(&self, event: ChangeEvent) {
        match self.sender.send(event) {
            Ok(receivers) => debug!(
                user.id = %event.user_id,
                change.table = ?event.table,
                change.kind = ?event.kind,
                receivers,
                "Published change event"
            ),
            Err(_) => debug!(user.id = %event.user_id, "No listeners for change event"),
        }
    }

    /// Number of live subscriptions
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Persistence collaborator for workout data
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every workout record owned by the user
    async fn fetch_records_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<FetchOutcome<WorkoutRecord>, StoreError>;

    /// Fetch every muscle group entry belonging to the user's workout records
    async fn fetch_muscle_group_entries_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<FetchOutcome<MuscleGroupEntry>, StoreError>;

    /// Fetch the user's records and entries from a single consistent read
    async fn fetch_progress_data(&self, user_id: Uuid) -> Result<ProgressData, StoreError>;

    /// Persist a workout and its muscle group entries as one submission
    async fn insert_workout(&self, workout: NewWorkout) -> Result<WorkoutRecord, StoreError>;

    /// Delete a user's workout record together with its muscle group entries
    async fn delete_workout(&self, user_id: Uuid, record_id: Uuid) -> Result<(), StoreError>;

    /// Register a change listener for the user
    fn subscribe_to_changes(&self, user_id: Uuid) -> Result<ChangeSubscription, StoreError>;

    /// Number of change listeners currently registered
    fn active_subscriptions(&self) -> usize;
}
