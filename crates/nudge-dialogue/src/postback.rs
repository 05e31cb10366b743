// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Postback command grammar.
//!
//! Postbacks arrive as delimited strings with grammar
//! `Namespace '#' Action ('#' Param)*`. They are parsed once into a
//! [`Postback`] value at the router boundary; handlers match on the typed
//! command instead of prefix-matching raw strings.

use std::fmt;

use nudge_core::NudgeError;

/// Namespace for shopping-list commands.
pub const SHOPPING_NS: &str = "Shopping";
/// Namespace for reminder commands.
pub const REMINDER_NS: &str = "Reminder";

/// A parsed postback command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postback {
    pub namespace: String,
    pub action: String,
    pub params: Vec<String>,
}

impl Postback {
    /// Builds a command for embedding in an outbound menu choice.
    pub fn new(namespace: &str, action: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            action: action.to_string(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter segment.
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Parses a raw postback data string.
    ///
    /// Malformed payloads (missing action, empty segments) are a validation
    /// failure: the whole event fails, nothing is retried.
    pub fn parse(data: &str) -> Result<Self, NudgeError> {
        let mut segments = data.split('#');
        let namespace = segments.next().unwrap_or_default();
        let action = segments.next().unwrap_or_default();
        if namespace.is_empty() || action.is_empty() {
            return Err(NudgeError::Validation(format!(
                "malformed postback payload: `{data}`"
            )));
        }
        let params: Vec<String> = segments.map(str::to_string).collect();
        if params.iter().any(String::is_empty) {
            return Err(NudgeError::Validation(format!(
                "malformed postback payload: `{data}`"
            )));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            action: action.to_string(),
            params,
        })
    }
}

impl fmt::Display for Postback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.namespace, self.action)?;
        for param in &self.params {
            write!(f, "#{param}")?;
        }
        Ok(())
    }
}
