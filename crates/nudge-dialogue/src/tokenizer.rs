// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic keyword tokenizer.
//!
//! Default implementation of the [`Tokenizer`] seam: zero-cost keyword
//! rules, no network, no latency. A deployment can swap in a real NLP
//! service behind the same trait.

use async_trait::async_trait;

use nudge_core::types::{ParsedAction, ParsedCommand};
use nudge_core::{NudgeError, Tokenizer};

/// Verbs that signal a delete intent (contains, case-insensitive).
const DELETE_VERBS: &[&str] = &["delete", "remove", "drop", "erase", "scratch"];

/// Words skipped when collecting item-name operands.
const FILLER_WORDS: &[&str] = &[
    "the", "a", "an", "and", "from", "list", "my", "please", "item", "items", "number",
];

/// Keyword-rule tokenizer.
#[derive(Debug, Default, Clone)]
pub struct KeywordTokenizer;

impl KeywordTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn parse_text(text: &str) -> ParsedCommand {
        let lower = text.to_lowercase();
        if !DELETE_VERBS.iter().any(|verb| lower.contains(verb)) {
            return ParsedCommand::unknown();
        }

        let mut indexes = Vec::new();
        let mut names = Vec::new();
        for token in lower.split(|c: char| c.is_whitespace() || c == ',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if let Ok(index) = token.parse::<usize>() {
                if index > 0 {
                    indexes.push(index);
                }
                continue;
            }
            if DELETE_VERBS.contains(&token) || FILLER_WORDS.contains(&token) {
                continue;
            }
            names.push(token.to_string());
        }

        ParsedCommand {
            action: ParsedAction::Delete,
            indexes,
            names,
        }
    }
}

#[async_trait]
impl Tokenizer for KeywordTokenizer {
    async fn parse(&self, text: &str) -> Result<ParsedCommand, NudgeError> {
        Ok(Self::parse_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_delete_verb_is_unknown() {
        let cmd = KeywordTokenizer::parse_text("apples and bread");
        assert_eq!(cmd.action, ParsedAction::Unknown);
    }

    #[test]
    fn delete_with_indexes() {
        let cmd = KeywordTokenizer::parse_text("delete 1, 3");
        assert_eq!(cmd.action, ParsedAction::Delete);
        assert_eq!(cmd.indexes, vec![1, 3]);
        assert!(cmd.names.is_empty());
    }

    #[test]
    fn delete_with_names() {
        let cmd = KeywordTokenizer::parse_text("remove apples from the list");
        assert_eq!(cmd.action, ParsedAction::Delete);
        assert!(cmd.indexes.is_empty());
        assert_eq!(cmd.names, vec!["apples"]);
    }

    #[test]
    fn zero_index_is_ignored() {
        let cmd = KeywordTokenizer::parse_text("delete 0");
        assert_eq!(cmd.action, ParsedAction::Delete);
        assert!(cmd.indexes.is_empty());
    }

    #[tokio::test]
    async fn trait_impl_delegates_to_rules() {
        let tokenizer = KeywordTokenizer::new();
        let cmd = tokenizer.parse("drop 2").await.unwrap();
        assert_eq!(cmd.action, ParsedAction::Delete);
        assert_eq!(cmd.indexes, vec![2]);
    }
}
