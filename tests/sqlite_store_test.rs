// ABOUTME: Integration tests for the SQLite record store
// ABOUTME: Persistence across reconnects, cascade delete, and malformed stored rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![cfg(feature = "sqlite")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use anyhow::Result;
use common::{assert_close, date, init_test_logging, instant, workout};
use liftlog::constants::channels::DEFAULT_CHANGE_CHANNEL_CAPACITY;
use liftlog::errors::{ErrorCode, RecordError, StoreError};
use liftlog::models::MuscleGroup;
use liftlog::store::{ChangeKind, ChangeSignal, RecordStore, SqliteRecordStore};
use tempfile::TempDir;
use uuid::Uuid;

async fn memory_store() -> Result<SqliteRecordStore> {
    init_test_logging();
    Ok(SqliteRecordStore::connect("sqlite::memory:", DEFAULT_CHANGE_CHANNEL_CAPACITY).await?)
}

#[tokio::test]
async fn test_insert_and_fetch_round_trip() -> Result<()> {
    let store = memory_store().await?;
    let user_id = Uuid::new_v4();
    let at = instant(date(2025, 6, 15), 7, 0);

    let record = store
        .insert_workout(
            workout(user_id, at, 55, MuscleGroup::Legs, 2400.0)
                .muscle_group(MuscleGroup::Glutes, 600.0)
                .mood("tired but happy"),
        )
        .await?;

    let records = store.fetch_records_for_user(user_id).await?;
    assert_eq!(records.items, vec![record]);

    let entries = store.fetch_muscle_group_entries_for_user(user_id).await?;
    assert_eq!(entries.items.len(), 2);
    assert_eq!(entries.items[0].muscle_group, MuscleGroup::Legs);
    assert_close(entries.items[1].total_weight, 600.0);
    Ok(())
}

#[tokio::test]
async fn test_data_survives_reconnect() -> Result<()> {
    init_test_logging();
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.path().join("liftlog.db").display());
    let user_id = Uuid::new_v4();

    {
        let store = SqliteRecordStore::connect(&url, DEFAULT_CHANGE_CHANNEL_CAPACITY).await?;
        store
            .insert_workout(workout(
                user_id,
                instant(date(2025, 6, 14), 18, 0),
                30,
                MuscleGroup::Back,
                800.0,
            ))
            .await?;
        store.pool().close().await;
    }

    let reopened = SqliteRecordStore::connect(&url, DEFAULT_CHANGE_CHANNEL_CAPACITY).await?;
    let records = reopened.fetch_records_for_user(user_id).await?;
    assert_eq!(records.items.len(), 1);
    assert_eq!(records.items[0].duration_minutes, Some(30));
    Ok(())
}

#[tokio::test]
async fn test_delete_cascades_and_notifies() -> Result<()> {
    let store = memory_store().await?;
    let user_id = Uuid::new_v4();
    let at = instant(date(2025, 6, 15), 7, 0);
    let record = store
        .insert_workout(
            workout(user_id, at, 40, MuscleGroup::Chest, 900.0)
                .muscle_group(MuscleGroup::Shoulders, 200.0),
        )
        .await?;

    let mut subscription = store.subscribe_to_changes(user_id)?;
    store.delete_workout(user_id, record.id).await?;

    assert!(store
        .fetch_muscle_group_entries_for_user(user_id)
        .await?
        .items
        .is_empty());
    let orphaned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM muscle_group_entries")
        .fetch_one(store.pool())
        .await?;
    assert_eq!(orphaned, 0);

    match subscription.changed().await {
        Some(ChangeSignal::Changed(event)) => assert_eq!(event.kind, ChangeKind::Deleted),
        other => panic!("unexpected signal: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_delete_unknown_or_foreign_workout() -> Result<()> {
    let store = memory_store().await?;
    let owner = Uuid::new_v4();
    let record = store
        .insert_workout(workout(
            owner,
            instant(date(2025, 6, 15), 7, 0),
            20,
            MuscleGroup::Core,
            100.0,
        ))
        .await?;

    let foreign = store.delete_workout(Uuid::new_v4(), record.id).await;
    assert!(matches!(foreign, Err(StoreError::NotFound { .. })));

    let missing = store.delete_workout(owner, Uuid::new_v4()).await;
    assert!(matches!(missing, Err(StoreError::NotFound { .. })));

    assert_eq!(store.fetch_records_for_user(owner).await?.items.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_malformed_stored_rows_are_skipped() -> Result<()> {
    let store = memory_store().await?;
    let user_id = Uuid::new_v4();
    let good = store
        .insert_workout(workout(
            user_id,
            instant(date(2025, 6, 15), 7, 0),
            45,
            MuscleGroup::Biceps,
            150.0,
        ))
        .await?;

    sqlx::query(
        "INSERT INTO workout_records (id, user_id, created_at, energy_level) VALUES (?, ?, ?, ?)",
    )
    .bind("bad-timestamp-row")
    .bind(user_id.to_string())
    .bind("not a date")
    .bind(3_i64)
    .execute(store.pool())
    .await?;
    sqlx::query(
        "INSERT INTO muscle_group_entries (id, workout_record_id, muscle_group, total_weight) VALUES (?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(good.id.to_string())
    .bind("calves")
    .bind(75.0_f64)
    .execute(store.pool())
    .await?;

    let records = store.fetch_records_for_user(user_id).await?;
    assert_eq!(records.items.len(), 1);
    assert_eq!(records.rejected.len(), 1);

    let entries = store.fetch_muscle_group_entries_for_user(user_id).await?;
    assert_eq!(entries.items.len(), 1);
    assert!(matches!(
        entries.rejected.as_slice(),
        [RecordError::UnknownMuscleGroup { .. }]
    ));
    Ok(())
}

#[tokio::test]
async fn test_undecodable_columns_reject_only_that_row() -> Result<()> {
    let store = memory_store().await?;
    let user_id = Uuid::new_v4();
    let good = store
        .insert_workout(workout(
            user_id,
            instant(date(2025, 6, 15), 7, 0),
            30,
            MuscleGroup::Chest,
            400.0,
        ))
        .await?;

    let wordy_id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO workout_records (id, user_id, created_at, duration_minutes, energy_level) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&wordy_id)
    .bind(user_id.to_string())
    .bind("2025-06-14T07:00:00Z")
    .bind("forty")
    .bind("high")
    .execute(store.pool())
    .await?;

    let records = store.fetch_records_for_user(user_id).await?;
    assert_eq!(records.items.len(), 1);
    assert_eq!(records.items[0].id, good.id);
    match records.rejected.as_slice() {
        [RecordError::UndecodableColumn { row_id, column, .. }] => {
            assert_eq!(row_id, &wordy_id);
            assert_eq!(*column, "duration_minutes");
        }
        other => panic!("expected one undecodable row, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_progress_data_skips_entries_of_rejected_records() -> Result<()> {
    let store = memory_store().await?;
    let user_id = Uuid::new_v4();
    store
        .insert_workout(workout(
            user_id,
            instant(date(2025, 6, 15), 7, 0),
            30,
            MuscleGroup::Back,
            300.0,
        ))
        .await?;

    let broken_id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO workout_records (id, user_id, created_at, energy_level) VALUES (?, ?, ?, ?)",
    )
    .bind(&broken_id)
    .bind(user_id.to_string())
    .bind("garbage")
    .bind(3_i64)
    .execute(store.pool())
    .await?;
    sqlx::query(
        "INSERT INTO muscle_group_entries (id, workout_record_id, muscle_group, total_weight) VALUES (?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&broken_id)
    .bind("chest")
    .bind(500.0_f64)
    .execute(store.pool())
    .await?;

    let data = store.fetch_progress_data(user_id).await?;
    assert_eq!(data.records.items.len(), 1);
    assert_eq!(data.records.rejected.len(), 1);
    assert_eq!(data.entries.items.len(), 1);
    assert_eq!(data.entries.items[0].muscle_group, MuscleGroup::Back);
    assert_eq!(data.orphaned_entries, 1);
    assert_eq!(data.skipped_rows(), 2);
    Ok(())
}

#[tokio::test]
async fn test_subscribe_fails_once_pool_is_closed() -> Result<()> {
    let store = memory_store().await?;
    store.pool().close().await;

    let error = store.subscribe_to_changes(Uuid::new_v4()).unwrap_err();
    assert!(matches!(error, StoreError::SubscribeFailed { .. }));
    assert_eq!(error.code(), ErrorCode::SubscriptionFailure);
    assert_eq!(store.active_subscriptions(), 0);
    Ok(())
}

#[tokio::test]
async fn test_sqlite_timestamp_text_is_read_as_utc() -> Result<()> {
    let store = memory_store().await?;
    let user_id = Uuid::new_v4();
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO workout_records (id, user_id, created_at, duration_minutes, energy_level) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(user_id.to_string())
    .bind("2025-06-15 07:00:00")
    .bind(25_i64)
    .bind(2_i64)
    .execute(store.pool())
    .await?;

    let records = store.fetch_records_for_user(user_id).await?;
    assert_eq!(records.items.len(), 1);
    assert_eq!(records.items[0].created_at, instant(date(2025, 6, 15), 7, 0));
    assert_eq!(records.items[0].total_volume, None);
    Ok(())
}
