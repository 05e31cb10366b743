// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock tokenizer with scripted responses.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use nudge_core::types::ParsedCommand;
use nudge_core::{NudgeError, Tokenizer};

/// Returns pre-scripted parses in order; once exhausted, every text parses
/// as `Unknown`.
#[derive(Default)]
pub struct MockTokenizer {
    responses: Mutex<VecDeque<ParsedCommand>>,
}

impl MockTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: Vec<ParsedCommand>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }

    /// Queue one more scripted parse.
    pub async fn push_response(&self, command: ParsedCommand) {
        self.responses.lock().await.push_back(command);
    }
}

#[async_trait]
impl Tokenizer for MockTokenizer {
    async fn parse(&self, _text: &str) -> Result<ParsedCommand, NudgeError> {
        Ok(self
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(ParsedCommand::unknown))
    }
}
