// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions for the Nudge bot backend.
//!
//! The dialogue router and sync engine only ever see these seams; concrete
//! backends (SQLite, task-queue clients, tokenizers) live in leaf crates
//! and are injected at construction time. All traits use `#[async_trait]`
//! for dynamic dispatch compatibility.

pub mod reminder;
pub mod shopping;
pub mod status;
pub mod sync;
pub mod tokenizer;
pub mod weather;

pub use reminder::ReminderStore;
pub use shopping::ShoppingStore;
pub use status::StatusStore;
pub use sync::ReminderSynchronizer;
pub use tokenizer::Tokenizer;
pub use weather::WeatherProvider;
