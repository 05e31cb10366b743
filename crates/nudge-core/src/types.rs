// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Nudge bot backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::NudgeError;
use crate::schedule::Scheduler;

/// Namespace of a chat source as delivered by the messaging transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    User,
    Group,
    Room,
}

/// Partition key identifying one chat thread across all state.
///
/// Constructed as `kind ':' provider source id` so ids from different
/// source namespaces never collide. Stable for the lifetime of the
/// underlying chat thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    /// Builds the partition key from a source namespace and raw provider id.
    pub fn from_source(kind: SourceKind, source_id: &str) -> Self {
        ConversationId(format!("{kind}:{source_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The single persisted dialogue mode governing how the next free-text
/// message in a conversation is interpreted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    #[default]
    Neutral,
    Shopping,
    ShoppingAdd,
    ReminderAdd,
}

/// Per-conversation dialogue state. Exactly one value exists per
/// conversation; every write is a total overwrite, never a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationStatus {
    pub conversation_id: ConversationId,
    pub kind: StatusKind,
}

impl ConversationStatus {
    pub fn new(conversation_id: ConversationId, kind: StatusKind) -> Self {
        Self {
            conversation_id,
            kind,
        }
    }

    /// Checks the status invariants before a write. A failed validation is
    /// fatal for the event being processed, never retried.
    pub fn validate(&self) -> Result<(), NudgeError> {
        if self.conversation_id.as_str().trim().is_empty() {
            return Err(NudgeError::Validation(
                "conversation id must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// What action fires when a reminder's schedule triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum ExecutorKind {
    /// Run the shopping-list executor for the owning conversation.
    #[strum(serialize = "shoppingList")]
    ShoppingList,
}

/// A persisted reminder. The id is assigned by the store at creation time
/// and immutable thereafter; the scheduler value is owned exclusively by
/// this record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderItem {
    pub id: i64,
    pub name: String,
    pub conversation_id: ConversationId,
    pub scheduler: Scheduler,
    pub executor: ExecutorKind,
    pub created_at: DateTime<Utc>,
}

/// A reminder as handed to the store for creation, before an id exists.
#[derive(Debug, Clone)]
pub struct NewReminder {
    pub name: String,
    pub conversation_id: ConversationId,
    pub scheduler: Scheduler,
    pub executor: ExecutorKind,
}

/// One row of a conversation's shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItem {
    pub id: i64,
    pub conversation_id: ConversationId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// An inbound event as delivered by the (out-of-scope) messaging transport.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub source_kind: SourceKind,
    pub source_id: String,
    pub payload: EventPayload,
}

impl InboundEvent {
    pub fn text(source_kind: SourceKind, source_id: &str, text: &str) -> Self {
        Self {
            source_kind,
            source_id: source_id.to_string(),
            payload: EventPayload::Text(text.to_string()),
        }
    }

    pub fn postback(source_kind: SourceKind, source_id: &str, data: &str) -> Self {
        Self {
            source_kind,
            source_id: source_id.to_string(),
            payload: EventPayload::Postback(data.to_string()),
        }
    }

    /// The partition key all of this event's state lives under.
    pub fn conversation_id(&self) -> ConversationId {
        ConversationId::from_source(self.source_kind, &self.source_id)
    }
}

/// Payload of an inbound event: free text or a structured postback token.
#[derive(Debug, Clone)]
pub enum EventPayload {
    Text(String),
    Postback(String),
}

/// A single outbound message, channel-agnostic. The transport layer renders
/// these into whatever the provider's reply API expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMessage {
    Text(String),
    /// A titled menu of tappable choices, each emitting a postback token.
    Menu {
        title: String,
        choices: Vec<MenuChoice>,
    },
}

/// One tappable menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuChoice {
    pub label: String,
    pub postback: String,
}

impl MenuChoice {
    pub fn new(label: impl Into<String>, postback: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            postback: postback.into(),
        }
    }
}

/// The reply produced by handling one inbound event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub messages: Vec<ReplyMessage>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            messages: vec![ReplyMessage::Text(text.into())],
        }
    }

    pub fn menu(title: impl Into<String>, choices: Vec<MenuChoice>) -> Self {
        Self {
            messages: vec![ReplyMessage::Menu {
                title: title.into(),
                choices,
            }],
        }
    }

    pub fn push(mut self, message: ReplyMessage) -> Self {
        self.messages.push(message);
        self
    }
}

/// What the tokenizer decided one free-text message means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedAction {
    /// Delete the referenced items.
    Delete,
    /// No recognized intent; handlers treat this as a no-op.
    Unknown,
}

/// Output of the natural-language tokenizer for one message. Transient:
/// produced from one message's text and consumed once.
#[derive(Debug, Clone)]
pub struct ParsedCommand {
    pub action: ParsedAction,
    /// 1-based positions into the currently displayed list.
    pub indexes: Vec<usize>,
    /// Name substrings to match against item names.
    pub names: Vec<String>,
}

impl ParsedCommand {
    pub fn unknown() -> Self {
        Self {
            action: ParsedAction::Unknown,
            indexes: Vec::new(),
            names: Vec::new(),
        }
    }
}

/// A current-conditions report from the weather collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub summary: String,
    pub temperature_c: f64,
}
