// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialogue state machine for the Nudge bot.
//!
//! This crate provides:
//! - [`Postback`]: the parsed `Namespace#Action(#Param)*` command grammar
//! - [`DialogueRouter`]: per-conversation event interpretation and dispatch
//! - Domain handlers for the shopping list, reminders, and weather
//! - [`KeywordTokenizer`]: the default heuristic tokenizer implementation
//!
//! The router intercepts each inbound event, resolves the conversation's
//! persisted status, and decides what the event means in that state.

pub mod postback;
pub mod reminder;
pub mod router;
pub mod shopping;
pub mod tokenizer;
pub mod weather;

pub use postback::{Postback, REMINDER_NS, SHOPPING_NS};
pub use reminder::ReminderHandler;
pub use router::DialogueRouter;
pub use shopping::ShoppingHandler;
pub use tokenizer::KeywordTokenizer;
pub use weather::WeatherHandler;
