// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shopping-list item persistence.

use async_trait::async_trait;

use crate::error::NudgeError;
use crate::types::{ConversationId, ShoppingItem};

/// Persistence for one conversation's shopping list.
#[async_trait]
pub trait ShoppingStore: Send + Sync {
    /// Lists the conversation's items in insertion order. The 1-based
    /// positions users reference in delete commands index into this order.
    async fn list_items(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<ShoppingItem>, NudgeError>;

    /// Appends one item per name, preserving the given order.
    async fn add_items(
        &self,
        conversation_id: &ConversationId,
        names: &[String],
    ) -> Result<(), NudgeError>;

    /// Deletes the rows with the given ids. Ids that no longer exist are
    /// ignored; the delete flow re-reads the list afterwards anyway.
    async fn delete_items(&self, ids: &[i64]) -> Result<(), NudgeError>;

    /// Deletes every item the conversation owns.
    async fn delete_all_items(&self, conversation_id: &ConversationId) -> Result<(), NudgeError>;
}
