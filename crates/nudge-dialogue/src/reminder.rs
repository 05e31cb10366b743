// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder domain handler.
//!
//! Walks the add flow (choose executor, pick a time, persist) and the
//! delete confirmation flow. The add sub-steps are carried entirely in
//! postback parameters; only the initial `ReminderAdd` mode is persisted,
//! and a completed add reverts the conversation to `Neutral`.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime};
use nudge_core::types::{
    ConversationId, ConversationStatus, ExecutorKind, MenuChoice, NewReminder, Reply, StatusKind,
};
use nudge_core::{NudgeError, ReminderStore, Scheduler, StatusStore};
use tracing::info;

use crate::postback::{Postback, REMINDER_NS};

/// Wall-clock formats accepted from the time picker. Minute precision is
/// what pickers send; the seconds form tolerates hand-typed values.
const PICKED_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Handles reminder menu display and the add/delete postback flows.
pub struct ReminderHandler {
    reminders: Arc<dyn ReminderStore>,
    status: Arc<dyn StatusStore>,
    /// Offset that picked wall-clock times are interpreted in; they carry
    /// no zone of their own.
    presentation_offset: FixedOffset,
}

impl ReminderHandler {
    pub fn new(
        reminders: Arc<dyn ReminderStore>,
        status: Arc<dyn StatusStore>,
        presentation_offset: FixedOffset,
    ) -> Self {
        Self {
            reminders,
            status,
            presentation_offset,
        }
    }

    /// Trigger-keyword entry point: show the reminder menu and reset the
    /// conversation to `Neutral` (the add flow re-enters `ReminderAdd`
    /// through its own postback).
    pub async fn open_menu(&self, conversation_id: &ConversationId) -> Result<Reply, NudgeError> {
        self.set_status(conversation_id, StatusKind::Neutral).await?;
        self.menu(conversation_id).await
    }

    /// Renders the conversation's reminders with add/delete choices.
    pub async fn menu(&self, conversation_id: &ConversationId) -> Result<Reply, NudgeError> {
        let items = self.reminders.list_reminders(conversation_id).await?;
        let mut choices = vec![MenuChoice::new(
            "Add reminder",
            Postback::new(REMINDER_NS, "add").to_string(),
        )];
        if items.is_empty() {
            return Ok(Reply::menu("No reminders yet.", choices));
        }
        let listing = items
            .iter()
            .map(|item| format!("{} {}", item.name, item.scheduler.ui_text()))
            .collect::<Vec<_>>()
            .join("\n");
        for item in &items {
            choices.push(MenuChoice::new(
                format!("Delete {}", item.name),
                Postback::new(REMINDER_NS, "delete")
                    .with_param(item.id.to_string())
                    .to_string(),
            ));
        }
        Ok(Reply::menu(listing, choices))
    }

    /// Dispatches a `Reminder#...` postback command.
    pub async fn handle_postback(
        &self,
        conversation_id: &ConversationId,
        postback: &Postback,
    ) -> Result<Option<Reply>, NudgeError> {
        match (postback.action.as_str(), postback.params.as_slice()) {
            ("add", []) => {
                self.set_status(conversation_id, StatusKind::ReminderAdd)
                    .await?;
                Ok(Some(Reply::menu(
                    "What should this reminder do?",
                    vec![MenuChoice::new(
                        "Shopping list",
                        Postback::new(REMINDER_NS, "add")
                            .with_param(ExecutorKind::ShoppingList.to_string())
                            .to_string(),
                    )],
                )))
            }
            ("add", [executor]) => {
                let executor = parse_executor(executor)?;
                // The transport's datetime picker replaces the trailing
                // segment with the picked wall-clock value.
                Ok(Some(Reply::menu(
                    "When should it fire (every day)?",
                    vec![MenuChoice::new(
                        "Pick a time",
                        Postback::new(REMINDER_NS, "add")
                            .with_param(executor.to_string())
                            .with_param("datetime")
                            .to_string(),
                    )],
                )))
            }
            ("add", [executor, picked]) => {
                let executor = parse_executor(executor)?;
                let at = self.parse_picked_time(picked)?;
                let scheduler = Scheduler::Daily(at);
                let reminder = NewReminder {
                    name: executor_label(executor).to_string(),
                    conversation_id: conversation_id.clone(),
                    scheduler,
                    executor,
                };
                let id = self.reminders.create_reminder(&reminder).await?;
                self.set_status(conversation_id, StatusKind::Neutral).await?;
                info!(
                    conversation = %conversation_id,
                    reminder_id = id,
                    "reminder created"
                );
                Ok(Some(Reply::text(format!(
                    "Reminder set: {} {}",
                    reminder.name,
                    scheduler.ui_text()
                ))))
            }
            ("delete", [id]) => {
                let id = parse_reminder_id(id)?;
                match self.reminders.get_reminder(id).await {
                    Ok(item) => Ok(Some(Reply::menu(
                        format!("Delete reminder {}?", item.name),
                        vec![MenuChoice::new(
                            "Yes, delete",
                            Postback::new(REMINDER_NS, "delete")
                                .with_param("confirm")
                                .with_param(id.to_string())
                                .to_string(),
                        )],
                    ))),
                    Err(err) if err.is_not_found() => {
                        Ok(Some(Reply::text("That reminder is already gone.")))
                    }
                    Err(err) => Err(err),
                }
            }
            ("delete", [confirm, id]) if confirm == "confirm" => {
                let id = parse_reminder_id(id)?;
                match self.reminders.delete_reminder(id).await {
                    Ok(()) => {
                        let mut reply = Reply::text("Deleted.");
                        for message in self.menu(conversation_id).await?.messages {
                            reply = reply.push(message);
                        }
                        Ok(Some(reply))
                    }
                    Err(err) if err.is_not_found() => {
                        Ok(Some(Reply::text("That reminder is already gone.")))
                    }
                    Err(err) => Err(err),
                }
            }
            (action, params) => Err(NudgeError::Validation(format!(
                "unrecognized reminder command: `{action}` with {} params",
                params.len()
            ))),
        }
    }

    /// Interprets a picked wall-clock time in the presentation offset.
    fn parse_picked_time(&self, picked: &str) -> Result<DateTime<FixedOffset>, NudgeError> {
        let naive = PICKED_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(picked, format).ok())
            .ok_or_else(|| {
                NudgeError::Validation(format!("unparsable picked time: `{picked}`"))
            })?;
        let offset = self.presentation_offset;
        let naive_utc = naive - Duration::seconds(i64::from(offset.local_minus_utc()));
        Ok(DateTime::from_naive_utc_and_offset(naive_utc, offset))
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

fn parse_executor(token: &str) -> Result<ExecutorKind, NudgeError> {
    ExecutorKind::from_str(token)
        .map_err(|_| NudgeError::Validation(format!("unrecognized executor token: `{token}`")))
}

fn parse_reminder_id(raw: &str) -> Result<i64, NudgeError> {
    raw.parse()
        .map_err(|_| NudgeError::Validation(format!("malformed reminder id: `{raw}`")))
}

/// Display name a new reminder is stored under.
fn executor_label(executor: ExecutorKind) -> &'static str {
    match executor {
        ExecutorKind::ShoppingList => "shopping list",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler_offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    #[test]
    fn picked_time_is_interpreted_in_presentation_offset() {
        let handler = ReminderHandler {
            reminders: unreachable_store(),
            status: unreachable_status(),
            presentation_offset: handler_offset(9),
        };
        let at = handler.parse_picked_time("2021-07-07T23:59").unwrap();
        assert_eq!(at.to_rfc3339(), "2021-07-07T23:59:00+09:00");
    }

    #[test]
    fn picked_time_with_seconds_also_parses() {
        let handler = ReminderHandler {
            reminders: unreachable_store(),
            status: unreachable_status(),
            presentation_offset: handler_offset(0),
        };
        let at = handler.parse_picked_time("2021-07-07T23:59:30").unwrap();
        assert_eq!(at.to_rfc3339(), "2021-07-07T23:59:30+00:00");
    }

    #[test]
    fn garbage_picked_time_is_a_validation_error() {
        let handler = ReminderHandler {
            reminders: unreachable_store(),
            status: unreachable_status(),
            presentation_offset: handler_offset(9),
        };
        let err = handler.parse_picked_time("datetime").unwrap_err();
        assert!(matches!(err, NudgeError::Validation(_)));
    }

    #[test]
    fn executor_token_round_trip() {
        assert_eq!(
            parse_executor("shoppingList").unwrap(),
            ExecutorKind::ShoppingList
        );
        assert!(parse_executor("nope").is_err());
    }

    #[test]
    fn reminder_id_must_be_numeric() {
        assert_eq!(parse_reminder_id("42").unwrap(), 42);
        assert!(parse_reminder_id("forty-two").is_err());
    }

    // Parse helpers never touch the stores; these panic if they do.
    fn unreachable_store() -> Arc<dyn ReminderStore> {
        use async_trait::async_trait;
        use nudge_core::types::ReminderItem;
        struct Panics;
        #[async_trait]
        impl ReminderStore for Panics {
            async fn create_reminder(&self, _: &NewReminder) -> Result<i64, NudgeError> {
                unreachable!()
            }
            async fn get_reminder(&self, _: i64) -> Result<ReminderItem, NudgeError> {
                unreachable!()
            }
            async fn list_reminders(
                &self,
                _: &ConversationId,
            ) -> Result<Vec<ReminderItem>, NudgeError> {
                unreachable!()
            }
            async fn list_all_reminders(&self) -> Result<Vec<ReminderItem>, NudgeError> {
                unreachable!()
            }
            async fn delete_reminder(&self, _: i64) -> Result<(), NudgeError> {
                unreachable!()
            }
        }
        Arc::new(Panics)
    }

    fn unreachable_status() -> Arc<dyn StatusStore> {
        use async_trait::async_trait;
        struct Panics;
        #[async_trait]
        impl StatusStore for Panics {
            async fn get_status(
                &self,
                _: &ConversationId,
            ) -> Result<Option<ConversationStatus>, NudgeError> {
                unreachable!()
            }
            async fn set_status(&self, _: &ConversationStatus) -> Result<(), NudgeError> {
                unreachable!()
            }
        }
        Arc::new(Panics)
    }
}
