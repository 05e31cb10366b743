// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock task-queue synchronizer for deterministic testing.
//!
//! `MockSynchronizer` implements `ReminderSynchronizer`, capturing every
//! sync call for assertion and optionally failing for one conversation to
//! exercise whole-run failure semantics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use nudge_core::traits::sync::task_id;
use nudge_core::types::{ConversationId, ReminderItem};
use nudge_core::{NudgeError, ReminderSynchronizer};

/// One captured synchronization call.
#[derive(Debug, Clone)]
pub struct SyncCall {
    pub conversation_id: ConversationId,
    /// Idempotency keys the backend would have been asked to upsert.
    pub task_ids: Vec<String>,
    pub now: DateTime<Utc>,
}

/// A mock synchronizer that records calls instead of talking to a backend.
#[derive(Default)]
pub struct MockSynchronizer {
    calls: Mutex<Vec<SyncCall>>,
    fail_for: Mutex<Option<ConversationId>>,
}

impl MockSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `sync` fail for the given conversation.
    pub async fn fail_for(&self, conversation_id: ConversationId) {
        *self.fail_for.lock().await = Some(conversation_id);
    }

    /// All captured calls, in order.
    pub async fn calls(&self) -> Vec<SyncCall> {
        self.calls.lock().await.clone()
    }

    /// Count of captured calls.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Clear captured calls.
    pub async fn clear(&self) {
        self.calls.lock().await.clear();
    }
}

#[async_trait]
impl ReminderSynchronizer for MockSynchronizer {
    async fn sync(
        &self,
        conversation_id: &ConversationId,
        items: &[ReminderItem],
        now: DateTime<Utc>,
    ) -> Result<(), NudgeError> {
        if self.fail_for.lock().await.as_ref() == Some(conversation_id) {
            return Err(NudgeError::TaskQueue {
                message: format!("injected failure for {conversation_id}"),
                source: None,
            });
        }
        self.calls.lock().await.push(SyncCall {
            conversation_id: conversation_id.clone(),
            task_ids: items
                .iter()
                .map(|item| task_id(conversation_id, item.id))
                .collect(),
            now,
        });
        Ok(())
    }
}
