// ABOUTME: Live refresh controller keeping progress aggregates current as records change
// ABOUTME: Owns the published snapshot, the change subscription, and a coalescing refresh task
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Live Refresh
//!
//! One `LiveRefreshController` backs one active progress view for one user.
//! It subscribes to the record store, recomputes every aggregate from the full
//! record set whenever something changes, and publishes the result as an
//! immutable `Arc<ProgressSnapshot>` through a `watch` channel.
//!
//! Lifecycle: `Uninitialized -> Subscribed -> (Recomputing <-> Idle) -> TornDown`.
//! There are no timers and no retry loop; only change notifications and
//! explicit refresh requests drive recomputation.

/// Time source abstraction
pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{AppError, AppResult, ErrorCode, StoreError};
use crate::models::{AggregateStats, MuscleGroupVolume, ProgressSnapshot};
use crate::notifications::NotificationCenter;
use crate::progress::ProgressAggregator;
use crate::store::{ChangeSignal, ChangeSubscription, RecordStore};

/// Pending explicit refresh requests before callers start waiting for a slot
const REFRESH_REQUEST_CAPACITY: usize = 16;

/// Message shown to the user when a refresh fails
const REFRESH_FAILED_MESSAGE: &str =
    "Couldn't refresh your progress. Showing your last loaded stats.";

/// Where the controller is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    /// Not yet subscribed to the record store
    Uninitialized,
    /// Listener registered, first computation pending
    Subscribed,
    /// Fetching and aggregating
    Recomputing,
    /// Waiting for the next change
    Idle,
    /// Listener released; no further refreshes
    TornDown,
}

/// Result of a single refresh attempt
#[derive(Debug, Clone)]
enum RefreshOutcome {
    Refreshed(Arc<ProgressSnapshot>),
    Failed { code: ErrorCode, message: String },
}

type RefreshReply = oneshot::Sender<RefreshOutcome>;

/// Builder for `LiveRefreshController`
pub struct LiveRefreshControllerBuilder {
    store: Arc<dyn RecordStore>,
    user_id: Uuid,
    aggregator: ProgressAggregator,
    clock: Arc<dyn Clock>,
    notifications: NotificationCenter,
}

impl LiveRefreshControllerBuilder {
    /// Use a specific aggregator configuration
    #[must_use]
    pub const fn aggregator(mut self, aggregator: ProgressAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Use a specific clock (defaults to the system clock)
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Report failures to this notification hub
    #[must_use]
    pub fn notifications(mut self, notifications: NotificationCenter) -> Self {
        self.notifications = notifications;
        self
    }

    /// Subscribe, compute the first snapshot, and start the refresh task.
    ///
    /// A failed first fetch is reported through the notification hub and
    /// leaves an empty snapshot in place; only a failed subscription is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the change listener cannot be registered.
    pub async fn start(self) -> AppResult<LiveRefreshController> {
        let (state_tx, state_rx) = watch::channel(ControllerState::Uninitialized);
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(ProgressSnapshot::default()));

        let subscription = self
            .store
            .subscribe_to_changes(self.user_id)
            .map_err(AppError::from)?;
        state_tx.send_replace(ControllerState::Subscribed);

        let mut worker = RefreshWorker {
            store: self.store,
            user_id: self.user_id,
            aggregator: self.aggregator,
            clock: self.clock,
            notifications: self.notifications,
            snapshot_tx,
            state_tx,
            generation: 0,
        };
        worker.refresh().await;

        let (refresh_tx, refresh_rx) = mpsc::channel(REFRESH_REQUEST_CAPACITY);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(worker.run(subscription, refresh_rx, shutdown_rx));

        info!(user.id = %self.user_id, "Live progress refresh started");
        Ok(LiveRefreshController {
            user_id: self.user_id,
            snapshot_rx,
            state_rx,
            refresh_tx,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }
}

/// Keeps one user's progress aggregates current and publishes them
pub struct LiveRefreshController {
    user_id: Uuid,
    snapshot_rx: watch::Receiver<Arc<ProgressSnapshot>>,
    state_rx: watch::Receiver<ControllerState>,
    refresh_tx: mpsc::Sender<RefreshReply>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl LiveRefreshController {
    /// Start configuring a controller for `user_id` over `store`
    #[must_use]
    pub fn builder(store: Arc<dyn RecordStore>, user_id: Uuid) -> LiveRefreshControllerBuilder {
        LiveRefreshControllerBuilder {
            store,
            user_id,
            aggregator: ProgressAggregator::default(),
            clock: Arc::new(SystemClock),
            notifications: NotificationCenter::default(),
        }
    }

    /// User this controller serves
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Latest published snapshot
    #[must_use]
    pub fn snapshot(&self) -> Arc<ProgressSnapshot> {
        Arc::clone(&self.snapshot_rx.borrow())
    }

    /// Current streak in days
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.snapshot_rx.borrow().streak_days
    }

    /// All-time statistics
    #[must_use]
    pub fn stats(&self) -> AggregateStats {
        self.snapshot_rx.borrow().stats
    }

    /// Per-muscle-group totals in chart order
    #[must_use]
    pub fn muscle_group_volumes(&self) -> Vec<MuscleGroupVolume> {
        self.snapshot_rx.borrow().muscle_group_volumes.clone()
    }

    /// Receive every newly published snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<ProgressSnapshot>> {
        self.snapshot_rx.clone()
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> ControllerState {
        *self.state_rx.borrow()
    }

    /// Ask for a refresh and wait for its result.
    ///
    /// Requests that arrive while a refresh is running share the next one.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure if the refresh did not complete, or an internal
    /// error if the controller has been torn down.
    pub async fn refresh_now(&self) -> AppResult<Arc<ProgressSnapshot>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.refresh_tx
            .send(reply_tx)
            .await
            .map_err(|_| AppError::internal("progress refresh task is not running"))?;

        match reply_rx.await {
            Ok(RefreshOutcome::Refreshed(snapshot)) => Ok(snapshot),
            Ok(RefreshOutcome::Failed { code, message }) => Err(AppError::new(code, message)),
            Err(_) => Err(AppError::internal("progress refresh task stopped")),
        }
    }

    /// Release the change listener and stop the refresh task
    pub async fn shutdown(mut self) {
        self.signal_shutdown();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(user.id = %self.user_id, error = %e, "Refresh task ended abnormally");
            }
        }
    }

    fn signal_shutdown(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            // The task may already have exited; nothing left to stop then
            let _ = shutdown_tx.send(());
        }
    }
}

impl Drop for LiveRefreshController {
    fn drop(&mut self) {
        self.signal_shutdown();
    }
}

/// Task-side state: the only writer of the published snapshot
struct RefreshWorker {
    store: Arc<dyn RecordStore>,
    user_id: Uuid,
    aggregator: ProgressAggregator,
    clock: Arc<dyn Clock>,
    notifications: NotificationCenter,
    snapshot_tx: watch::Sender<Arc<ProgressSnapshot>>,
    state_tx: watch::Sender<ControllerState>,
    generation: u64,
}

impl RefreshWorker {
    async fn run(
        mut self,
        mut subscription: ChangeSubscription,
        mut refresh_rx: mpsc::Receiver<RefreshReply>,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) {
        let mut waiters: Vec<RefreshReply> = Vec::new();

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown_rx => break,
                signal = subscription.changed() => match signal {
                    Some(ChangeSignal::Changed(event)) => debug!(
                        user.id = %self.user_id,
                        change.table = ?event.table,
                        change.kind = ?event.kind,
                        "Workout data changed"
                    ),
                    Some(ChangeSignal::Lagged(missed)) => debug!(
                        user.id = %self.user_id,
                        missed,
                        "Missed change events, refreshing"
                    ),
                    None => {
                        warn!(user.id = %self.user_id, "Record store closed change stream");
                        break;
                    }
                },
                Some(reply) = refresh_rx.recv() => waiters.push(reply),
            }

            // Everything queued so far is covered by the refresh below
            let coalesced = subscription.drain_pending();
            while let Ok(reply) = refresh_rx.try_recv() {
                waiters.push(reply);
            }
            if coalesced > 0 {
                debug!(user.id = %self.user_id, coalesced, "Coalesced change notifications");
            }

            let outcome = self.refresh().await;
            for waiter in waiters.drain(..) {
                // Caller may have stopped waiting
                let _ = waiter.send(outcome.clone());
            }
        }

        subscription.unsubscribe();
        self.state_tx.send_replace(ControllerState::TornDown);
        info!(user.id = %self.user_id, "Live progress refresh stopped");
    }

    async fn refresh(&mut self) -> RefreshOutcome {
        self.state_tx.send_replace(ControllerState::Recomputing);
        let outcome = match self.fetch_and_compute().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.snapshot_tx.send_replace(Arc::clone(&snapshot));
                info!(
                    user.id = %self.user_id,
                    refresh.generation = snapshot.generation,
                    refresh.outcome = "refreshed",
                    progress.streak_days = snapshot.streak_days,
                    progress.total_workouts = snapshot.stats.total_workouts,
                    records.skipped = snapshot.skipped_rows,
                    "Progress refreshed"
                );
                RefreshOutcome::Refreshed(snapshot)
            }
            Err(error) => {
                let code = error.code();
                warn!(
                    user.id = %self.user_id,
                    refresh.outcome = "failed",
                    error = %error,
                    "Progress refresh failed, keeping last snapshot"
                );
                self.notifications
                    .notify_failure(self.user_id, code, REFRESH_FAILED_MESSAGE);
                RefreshOutcome::Failed {
                    code,
                    message: error.to_string(),
                }
            }
        };
        self.state_tx.send_replace(ControllerState::Idle);
        outcome
    }

    async fn fetch_and_compute(&mut self) -> Result<ProgressSnapshot, StoreError> {
        let data = self.store.fetch_progress_data(self.user_id).await?;

        let skipped_rows = data.skipped_rows();
        if skipped_rows > 0 {
            self.notifications.notify_warning(
                self.user_id,
                format!("{skipped_rows} workout entries could not be read and were skipped."),
            );
        }

        self.generation += 1;
        let clock = &self.clock;
        let now = clock.now();
        Ok(self.aggregator.compute_with_calendar(
            &data.records.items,
            &data.entries.items,
            &now,
            |instant| clock.local_date(instant),
            skipped_rows,
            self.generation,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MuscleGroup;
    use crate::store::InMemoryRecordStore;
    use crate::test_utils::{
        date, fixed_clock, full_workout, local_time, raw_entry, raw_record, workout_at,
    };

    #[tokio::test]
    async fn test_snapshot_reflects_seeded_and_raw_rows() -> AppResult<()> {
        let store = Arc::new(InMemoryRecordStore::new());
        let user_id = Uuid::new_v4();
        let today = date(2025, 6, 15);
        let morning = local_time(today, 8, 0, 2).with_timezone(&chrono::Utc);

        store
            .insert_workout(full_workout(user_id, morning, 50, MuscleGroup::Back, 900.0))
            .await?;
        store.insert_workout(workout_at(user_id, morning)).await?;
        let raw_id = Uuid::new_v4();
        store
            .insert_raw_record(raw_record(raw_id, user_id, "2025-06-14T10:00:00+02:00"))
            .await;
        store
            .insert_raw_entry(raw_entry(raw_id, "not-a-muscle", 10.0))
            .await;

        let controller = LiveRefreshController::builder(store, user_id)
            .clock(fixed_clock(local_time(today, 21, 0, 2)))
            .start()
            .await?;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.streak_days, 2);
        assert_eq!(snapshot.stats.total_workouts, 3);
        assert_eq!(snapshot.skipped_rows, 1);
        assert_eq!(snapshot.muscle_group_volumes.len(), 1);

        controller.shutdown().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_after_teardown_is_an_error() -> AppResult<()> {
        let store = Arc::new(InMemoryRecordStore::new());
        let user_id = Uuid::new_v4();
        let mut controller = LiveRefreshController::builder(store, user_id)
            .start()
            .await?;

        controller.signal_shutdown();
        if let Some(task) = controller.task.take() {
            assert!(task.await.is_ok());
        }

        let error = controller.refresh_now().await.err();
        assert_eq!(error.map(|e| e.code), Some(ErrorCode::InternalError));
        assert_eq!(controller.state(), ControllerState::TornDown);
        Ok(())
    }
}
