// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging task-queue synchronizer.
//!
//! Real task-queue backends live behind the `ReminderSynchronizer` seam and
//! are deployment-specific. This implementation logs the desired task set
//! (idempotency key, fire time, callback payload) instead of pushing it,
//! which is what `nudge serve` wires in out of the box.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use nudge_core::traits::sync::task_id;
use nudge_core::types::{ConversationId, ReminderItem};
use nudge_core::{NudgeError, ReminderSynchronizer};

pub struct LoggingSynchronizer {
    callback_path: String,
}

impl LoggingSynchronizer {
    pub fn new(callback_path: &str) -> Self {
        Self {
            callback_path: callback_path.to_string(),
        }
    }
}

#[async_trait]
impl ReminderSynchronizer for LoggingSynchronizer {
    async fn sync(
        &self,
        conversation_id: &ConversationId,
        items: &[ReminderItem],
        now: DateTime<Utc>,
    ) -> Result<(), NudgeError> {
        for item in items {
            // Items arrive pre-filtered; an exhausted schedule here means
            // it lapsed between filter and sync, so just skip it.
            let Ok(fire_at) = item.scheduler.next(now) else {
                continue;
            };
            let payload = serde_json::json!({ "id": item.id });
            info!(
                task = %task_id(conversation_id, item.id),
                path = %self.callback_path,
                fire_at = %fire_at.to_rfc3339(),
                %payload,
                "would schedule reminder callback"
            );
        }
        Ok(())
    }
}
