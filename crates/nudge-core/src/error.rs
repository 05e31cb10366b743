// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Nudge bot backend.

use thiserror::Error;

use crate::schedule::ScheduleError;

/// The primary error type used across all Nudge adapter traits and core operations.
#[derive(Debug, Error)]
pub enum NudgeError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A record or event failed a domain invariant (empty conversation id,
    /// unrecognized status text, malformed postback). Fatal for the single
    /// event being processed, never retried.
    #[error("validation error: {0}")]
    Validation(String),

    /// A requested record was absent. Tagged so callers can apply fallback
    /// behavior (missing status reads as `Neutral`).
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Schedule computation or wire-format errors.
    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Task-queue synchronization errors (backend unavailable, rejected request).
    #[error("task queue error: {message}")]
    TaskQueue {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Text tokenizer collaborator errors.
    #[error("tokenizer error: {message}")]
    Tokenizer { message: String },

    /// Weather provider collaborator errors.
    #[error("weather error: {message}")]
    Weather { message: String },

    /// The surrounding execution context was cancelled mid-operation.
    #[error("operation cancelled")]
    Cancelled,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl NudgeError {
    /// True when the error is the tagged not-found case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NudgeError::NotFound { .. })
    }
}
