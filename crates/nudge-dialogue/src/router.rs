// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-conversation dialogue state machine.
//!
//! Interprets each inbound event against the conversation's persisted
//! status and dispatches to the domain handlers. Routing priority for text
//! events: allow-list filter > trigger keywords (which pre-empt state) >
//! status dispatch. Postbacks are parsed once and dispatched by namespace.
//!
//! All configuration (allow-list, trigger keywords, presentation offset) is
//! passed in at construction time; the router holds no ambient globals.

use std::sync::Arc;

use chrono::FixedOffset;
use nudge_config::model::RouterConfig;
use nudge_core::types::{ConversationId, EventPayload, InboundEvent, Reply, StatusKind};
use nudge_core::{
    NudgeError, ReminderStore, ShoppingStore, StatusStore, Tokenizer, WeatherProvider,
};
use tracing::{debug, warn};

use crate::postback::{Postback, REMINDER_NS, SHOPPING_NS};
use crate::reminder::ReminderHandler;
use crate::shopping::ShoppingHandler;
use crate::weather::WeatherHandler;

/// Routes inbound events to domain handlers based on conversation status.
pub struct DialogueRouter {
    config: RouterConfig,
    status: Arc<dyn StatusStore>,
    shopping: ShoppingHandler,
    reminder: ReminderHandler,
    weather: WeatherHandler,
}

impl DialogueRouter {
    /// Assembles the router from configuration and collaborator seams.
    pub fn new(
        config: RouterConfig,
        status: Arc<dyn StatusStore>,
        reminders: Arc<dyn ReminderStore>,
        shopping: Arc<dyn ShoppingStore>,
        tokenizer: Arc<dyn Tokenizer>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Result<Self, NudgeError> {
        let presentation_offset = FixedOffset::east_opt(config.presentation_offset_hours * 3600)
            .ok_or_else(|| {
                NudgeError::Config(format!(
                    "presentation_offset_hours out of range: {}",
                    config.presentation_offset_hours
                ))
            })?;
        Ok(Self {
            shopping: ShoppingHandler::new(shopping, status.clone(), tokenizer),
            reminder: ReminderHandler::new(reminders, status.clone(), presentation_offset),
            weather: WeatherHandler::new(weather),
            config,
            status,
        })
    }

    /// Handles one webhook delivery: events are processed sequentially and
    /// the first failure fails the whole batch.
    pub async fn handle_events(&self, events: &[InboundEvent]) -> Result<Vec<Reply>, NudgeError> {
        let mut replies = Vec::new();
        for event in events {
            if let Some(reply) = self.handle_event(event).await? {
                replies.push(reply);
            }
        }
        Ok(replies)
    }

    /// Handles a single inbound event. `None` means no reply: the
    /// conversation is not allowed, or the event is a no-op in the current
    /// state.
    pub async fn handle_event(&self, event: &InboundEvent) -> Result<Option<Reply>, NudgeError> {
        let conversation_id = event.conversation_id();
        if !self.is_allowed(&conversation_id) {
            debug!(conversation = %conversation_id, "dropping event from disallowed conversation");
            return Ok(None);
        }

        match &event.payload {
            EventPayload::Text(text) => self.handle_text(&conversation_id, text).await,
            EventPayload::Postback(data) => self.handle_postback(&conversation_id, data).await,
        }
    }

    /// Empty allow-list means all conversations are allowed.
    fn is_allowed(&self, conversation_id: &ConversationId) -> bool {
        self.config.allowed_conversations.is_empty()
            || self
                .config
                .allowed_conversations
                .iter()
                .any(|allowed| allowed == conversation_id.as_str())
    }

    async fn handle_text(
        &self,
        conversation_id: &ConversationId,
        text: &str,
    ) -> Result<Option<Reply>, NudgeError> {
        // Trigger keywords pre-empt whatever state the conversation is in.
        let lower = text.to_lowercase();
        if lower.contains(&self.config.shopping_trigger.to_lowercase()) {
            return Ok(Some(self.shopping.open_menu(conversation_id).await?));
        }
        if lower.contains(&self.config.reminder_trigger.to_lowercase()) {
            return Ok(Some(self.reminder.open_menu(conversation_id).await?));
        }
        if lower.contains(&self.config.weather_trigger.to_lowercase()) {
            return Ok(Some(self.weather.report().await?));
        }

        let status = self.current_status(conversation_id).await?;
        debug!(conversation = %conversation_id, status = %status, "dispatching text on status");
        match status {
            StatusKind::Shopping => self.shopping.handle_text(conversation_id, text).await,
            StatusKind::ShoppingAdd => {
                self.shopping.handle_add_lines(conversation_id, text).await
            }
            // Non-trigger text in any other state is a no-op.
            StatusKind::Neutral | StatusKind::ReminderAdd => Ok(None),
        }
    }

    async fn handle_postback(
        &self,
        conversation_id: &ConversationId,
        data: &str,
    ) -> Result<Option<Reply>, NudgeError> {
        let postback = Postback::parse(data)?;
        match postback.namespace.as_str() {
            SHOPPING_NS => {
                self.shopping
                    .handle_postback(conversation_id, &postback)
                    .await
            }
            REMINDER_NS => {
                self.reminder
                    .handle_postback(conversation_id, &postback)
                    .await
            }
            other => {
                warn!(namespace = other, "postback for unrecognized namespace");
                Err(NudgeError::Validation(format!(
                    "unrecognized postback namespace: `{other}`"
                )))
            }
        }
    }

    /// A conversation that has never written a status reads as `Neutral`.
    async fn current_status(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<StatusKind, NudgeError> {
        Ok(self
            .status
            .get_status(conversation_id)
            .await?
            .map(|status| status.kind)
            .unwrap_or_default())
    }
}
