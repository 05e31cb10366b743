// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External task-queue synchronization seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::NudgeError;
use crate::types::{ConversationId, ReminderItem};

/// Derives the idempotency key for one reminder's scheduled callback.
///
/// Repeated syncs of the same reminder produce the same task id, so the
/// backend upserts instead of duplicating.
pub fn task_id(conversation_id: &ConversationId, reminder_id: i64) -> String {
    format!("nudge-{}-{}", conversation_id.as_str(), reminder_id)
}

/// Reconciles one conversation's due reminders against an at-least-once
/// task-delivery backend.
///
/// Implementations translate each item into a scheduled callback request
/// (carrying at minimum the reminder id) at `item.scheduler.next(now)`,
/// keyed by [`task_id`]. The engine calls this once per conversation group
/// per run; a failure fails the whole run and the next tick retries
/// wholesale, which is safe because recomputing the same window yields the
/// same desired task set.
#[async_trait]
pub trait ReminderSynchronizer: Send + Sync {
    async fn sync(
        &self,
        conversation_id: &ConversationId,
        items: &[ReminderItem],
        now: DateTime<Utc>,
    ) -> Result<(), NudgeError>;
}
