// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Nudge integration tests.
//!
//! Provides mock collaborators and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`TestHarness`] - Full bot stack over a temp SQLite database
//! - [`MockSynchronizer`] - Captures task-queue sync calls
//! - [`MockTokenizer`] - Scripted NL-parse responses
//! - [`MockWeather`] - Fixed weather conditions

pub mod harness;
pub mod mock_sync;
pub mod mock_tokenizer;
pub mod mock_weather;

pub use harness::TestHarness;
pub use mock_sync::{MockSynchronizer, SyncCall};
pub use mock_tokenizer::MockTokenizer;
pub use mock_weather::MockWeather;
