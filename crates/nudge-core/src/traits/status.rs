// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation dialogue status persistence.

use async_trait::async_trait;

use crate::error::NudgeError;
use crate::types::{ConversationId, ConversationStatus};

/// Single-slot mutable dialogue state, keyed by conversation.
///
/// Reads that find nothing return `None`; callers treat that as
/// [`StatusKind::Neutral`](crate::types::StatusKind::Neutral). Writes are
/// total overwrites of the one document per key. Two concurrent writers on
/// the same conversation race with last-write-wins; the store does not
/// close that gap.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Returns the persisted status, or `None` when the conversation has
    /// never left the implicit default.
    async fn get_status(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<ConversationStatus>, NudgeError>;

    /// Overwrites the status slot. Implementations must run
    /// [`ConversationStatus::validate`] and refuse invalid values.
    async fn set_status(&self, status: &ConversationStatus) -> Result<(), NudgeError>;
}
