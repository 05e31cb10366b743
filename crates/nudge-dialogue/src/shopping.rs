// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shopping-list domain handler.
//!
//! Owns the `Shopping` and `ShoppingAdd` states: menu display, line-based
//! adds, tokenizer-driven deletes, and the delete-all confirmation flow.

use std::sync::Arc;

use nudge_core::types::{
    ConversationId, ConversationStatus, MenuChoice, ParsedAction, Reply, ShoppingItem, StatusKind,
};
use nudge_core::{NudgeError, ShoppingStore, StatusStore, Tokenizer};
use tracing::debug;

use crate::postback::{Postback, SHOPPING_NS};

/// Handles shopping-list events for one conversation at a time.
pub struct ShoppingHandler {
    shopping: Arc<dyn ShoppingStore>,
    status: Arc<dyn StatusStore>,
    tokenizer: Arc<dyn Tokenizer>,
}

impl ShoppingHandler {
    pub fn new(
        shopping: Arc<dyn ShoppingStore>,
        status: Arc<dyn StatusStore>,
        tokenizer: Arc<dyn Tokenizer>,
    ) -> Self {
        Self {
            shopping,
            status,
            tokenizer,
        }
    }

    /// Trigger-keyword entry point: enter the `Shopping` state and show
    /// the menu.
    pub async fn open_menu(&self, conversation_id: &ConversationId) -> Result<Reply, NudgeError> {
        self.set_status(conversation_id, StatusKind::Shopping).await?;
        self.menu(conversation_id).await
    }

    /// Renders the current list with context-appropriate choices.
    ///
    /// An empty list gets an "add" choice only; a populated list also
    /// offers delete-all and redisplay.
    pub async fn menu(&self, conversation_id: &ConversationId) -> Result<Reply, NudgeError> {
        let items = self.shopping.list_items(conversation_id).await?;
        if items.is_empty() {
            return Ok(Reply::menu(
                "Your shopping list is empty.",
                vec![MenuChoice::new(
                    "Add items",
                    Postback::new(SHOPPING_NS, "add").to_string(),
                )],
            ));
        }
        Ok(Reply::menu(
            format_items(&items),
            vec![
                MenuChoice::new("Add items", Postback::new(SHOPPING_NS, "add").to_string()),
                MenuChoice::new(
                    "Delete all",
                    Postback::new(SHOPPING_NS, "delete").to_string(),
                ),
                MenuChoice::new("Show list", Postback::new(SHOPPING_NS, "view").to_string()),
            ],
        ))
    }

    /// Free text while in `Shopping`: run the tokenizer and apply a delete
    /// command against the currently listed items. Unknown intents are a
    /// no-op with no reply and no state change.
    pub async fn handle_text(
        &self,
        conversation_id: &ConversationId,
        text: &str,
    ) -> Result<Option<Reply>, NudgeError> {
        let command = self.tokenizer.parse(text).await?;
        match command.action {
            ParsedAction::Delete => {
                let items = self.shopping.list_items(conversation_id).await?;
                let ids = resolve_targets(&items, &command.indexes, &command.names);
                debug!(
                    conversation = %conversation_id,
                    matched = ids.len(),
                    "tokenizer delete command"
                );
                self.shopping.delete_items(&ids).await?;
                Ok(Some(self.menu(conversation_id).await?))
            }
            ParsedAction::Unknown => Ok(None),
        }
    }

    /// Free text while in `ShoppingAdd`: each non-empty trimmed line becomes
    /// one item, then the state reverts to `Shopping`.
    pub async fn handle_add_lines(
        &self,
        conversation_id: &ConversationId,
        text: &str,
    ) -> Result<Option<Reply>, NudgeError> {
        let names: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if !names.is_empty() {
            self.shopping.add_items(conversation_id, &names).await?;
        }
        self.set_status(conversation_id, StatusKind::Shopping).await?;
        Ok(Some(self.menu(conversation_id).await?))
    }

    /// Dispatches a `Shopping#...` postback command.
    pub async fn handle_postback(
        &self,
        conversation_id: &ConversationId,
        postback: &Postback,
    ) -> Result<Option<Reply>, NudgeError> {
        match postback.action.as_str() {
            "add" => {
                self.set_status(conversation_id, StatusKind::ShoppingAdd)
                    .await?;
                Ok(Some(Reply::text("Send item names, one per line.")))
            }
            "view" => Ok(Some(self.menu(conversation_id).await?)),
            "delete" => {
                let items = self.shopping.list_items(conversation_id).await?;
                Ok(Some(Reply::menu(
                    format!("Delete all {} items?", items.len()),
                    vec![
                        MenuChoice::new(
                            "Yes",
                            Postback::new(SHOPPING_NS, "deleteConfirm").to_string(),
                        ),
                        MenuChoice::new(
                            "No",
                            Postback::new(SHOPPING_NS, "deleteCancel").to_string(),
                        ),
                    ],
                )))
            }
            "deleteConfirm" => {
                self.shopping.delete_all_items(conversation_id).await?;
                self.set_status(conversation_id, StatusKind::Shopping).await?;
                Ok(Some(self.menu(conversation_id).await?))
            }
            "deleteCancel" => {
                self.set_status(conversation_id, StatusKind::Shopping).await?;
                Ok(Some(self.menu(conversation_id).await?))
            }
            other => Err(NudgeError::Validation(format!(
                "unrecognized shopping action: `{other}`"
            ))),
        }
    }

    async fn set_status(
        &self,
        conversation_id: &ConversationId,
        kind: StatusKind,
    ) -> Result<(), NudgeError> {
        self.status
            .set_status(&ConversationStatus::new(conversation_id.clone(), kind))
            .await
    }
}

/// Formats the list with 1-based positions, matching what delete-by-index
/// commands resolve against.
fn format_items(items: &[ShoppingItem]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolves 1-based indexes and name substrings to row ids, deduplicated,
/// in list order.
fn resolve_targets(items: &[ShoppingItem], indexes: &[usize], names: &[String]) -> Vec<i64> {
    let mut ids = Vec::new();
    for index in indexes {
        if let Some(item) = index.checked_sub(1).and_then(|i| items.get(i)) {
            ids.push(item.id);
        }
    }
    for name in names {
        let needle = name.to_lowercase();
        for item in items {
            if item.name.to_lowercase().contains(&needle) {
                ids.push(item.id);
            }
        }
    }
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nudge_core::types::SourceKind;

    fn item(id: i64, name: &str) -> ShoppingItem {
        ShoppingItem {
            id,
            conversation_id: ConversationId::from_source(SourceKind::User, "U1"),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn format_items_numbers_from_one() {
        let listed = format_items(&[item(10, "apples"), item(11, "bread")]);
        assert_eq!(listed, "1. apples\n2. bread");
    }

    #[test]
    fn resolve_by_index_is_one_based() {
        let items = vec![item(10, "apples"), item(11, "bread"), item(12, "milk")];
        assert_eq!(resolve_targets(&items, &[1, 3], &[]), vec![10, 12]);
    }

    #[test]
    fn resolve_ignores_out_of_range_indexes() {
        let items = vec![item(10, "apples")];
        assert_eq!(resolve_targets(&items, &[2, 99], &[]), Vec::<i64>::new());
    }

    #[test]
    fn resolve_by_name_matches_substrings() {
        let items = vec![item(10, "green apples"), item(11, "bread")];
        assert_eq!(
            resolve_targets(&items, &[], &["apples".to_string()]),
            vec![10]
        );
    }

    #[test]
    fn resolve_deduplicates_overlapping_matches() {
        let items = vec![item(10, "apples"), item(11, "bread")];
        assert_eq!(
            resolve_targets(&items, &[1], &["apples".to_string()]),
            vec![10]
        );
    }
}
