// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder record persistence.

use async_trait::async_trait;

use crate::error::NudgeError;
use crate::types::{ConversationId, NewReminder, ReminderItem};

/// Persistence for reminder records, partitioned by conversation.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Persists a new reminder and returns the store-assigned id.
    async fn create_reminder(&self, reminder: &NewReminder) -> Result<i64, NudgeError>;

    /// Fetches one reminder by id. Fails with the tagged
    /// [`NudgeError::NotFound`] when absent.
    async fn get_reminder(&self, id: i64) -> Result<ReminderItem, NudgeError>;

    /// Lists one conversation's reminders in creation order.
    async fn list_reminders(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<ReminderItem>, NudgeError>;

    /// Lists every reminder across all conversations, ordered by
    /// conversation id then creation order. The sync engine's grouping step
    /// depends on this ordering.
    async fn list_all_reminders(&self) -> Result<Vec<ReminderItem>, NudgeError>;

    /// Deletes one reminder by id. Fails with [`NudgeError::NotFound`]
    /// when absent.
    async fn delete_reminder(&self, id: i64) -> Result<(), NudgeError>;
}
