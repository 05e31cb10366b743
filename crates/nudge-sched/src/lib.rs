// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder synchronization engine for the Nudge bot.
//!
//! This crate provides:
//! - [`filter_next_schedule`]: the lookahead-window filter over reminders
//! - [`group_by_conversation`]: contiguous-run grouping by conversation
//! - [`SyncEngine`]: the periodic job that reconciles due reminders
//!   against the external task backend, one call per conversation group
//!
//! The engine runs as a separate, non-concurrent periodic task; inbound
//! event handling never calls into it.

pub mod engine;
pub mod filter;

pub use engine::{SyncEngine, SyncReport};
pub use filter::{filter_next_schedule, group_by_conversation, ReminderGroup};
