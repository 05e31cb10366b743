// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Natural-language tokenizer seam.

use async_trait::async_trait;

use crate::error::NudgeError;
use crate::types::ParsedCommand;

/// Turns one free-text message into a structured command.
///
/// Treated as a black box: input string in, `{action, indexes, names}` out.
/// Unrecognized text must come back as
/// [`ParsedAction::Unknown`](crate::types::ParsedAction::Unknown), not as an
/// error; errors are for collaborator failure (service down, malformed
/// response).
#[async_trait]
pub trait Tokenizer: Send + Sync {
    async fn parse(&self, text: &str) -> Result<ParsedCommand, NudgeError>;
}
