// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Nudge bot backend.
//!
//! This crate provides the error type, domain types, the schedule value,
//! and the collaborator traits used throughout the Nudge workspace. The
//! dialogue router and the reminder sync engine are written entirely
//! against the seams defined here.

pub mod error;
pub mod schedule;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::NudgeError;
pub use schedule::{ScheduleError, Scheduler};
pub use types::{ConversationId, ConversationStatus, ReminderItem, StatusKind};

// Re-export all collaborator traits at crate root.
pub use traits::{
    ReminderStore, ReminderSynchronizer, ShoppingStore, StatusStore, Tokenizer, WeatherProvider,
};
