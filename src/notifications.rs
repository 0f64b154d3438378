// ABOUTME: User-facing notification channel for transient refresh failures and notices
// ABOUTME: Broadcasts toast-style messages to whatever presentation layer is listening
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::constants::channels::DEFAULT_NOTIFICATION_CHANNEL_CAPACITY;
use crate::errors::ErrorCode;

/// Severity shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Informational notice
    Info,
    /// Something went wrong but the view is still usable
    Warning,
    /// An operation failed
    Error,
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressNotification {
    /// User the message is for
    pub user_id: Uuid,
    /// Severity
    pub level: NotificationLevel,
    /// Error code when the notice reports a failure
    pub code: Option<ErrorCode>,
    /// Display text
    pub message: String,
    /// When the notice was raised
    pub created_at: DateTime<Utc>,
}

/// Broadcast hub for user-facing notifications
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    sender: broadcast::Sender<ProgressNotification>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_CHANNEL_CAPACITY)
    }
}

impl NotificationCenter {
    /// Create a hub buffering up to `capacity` notices per listener
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Listen for notices
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressNotification> {
        self.sender.subscribe()
    }

    /// Raise a failure notice for a user
    pub fn notify_failure(&self, user_id: Uuid, code: ErrorCode, message: impl Into<String>) {
        self.send(ProgressNotification {
            user_id,
            level: NotificationLevel::Error,
            code: Some(code),
            message: message.into(),
            created_at: Utc::now(),
        });
    }

    /// Raise a warning notice for a user
    pub fn notify_warning(&self, user_id: Uuid, message: impl Into<String>) {
        self.send(ProgressNotification {
            user_id,
            level: NotificationLevel::Warning,
            code: None,
            message: message.into(),
            created_at: Utc::now(),
        });
    }

    fn send(&self, notification: ProgressNotification) {
        if self.sender.send(notification.clone()).is_err() {
            // Nobody is showing notices right now; the log still has it
            warn!(
                user.id = %notification.user_id,
                notification.message = %notification.message,
                "Notification dropped: no listeners"
            );
        } else {
            debug!(user.id = %notification.user_id, "Notification sent");
        }
    }
}
