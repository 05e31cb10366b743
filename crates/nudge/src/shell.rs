// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `nudge shell` command implementation.
//!
//! Launches an interactive REPL that feeds lines through the dialogue
//! router as a local conversation. Plain lines are text messages; lines
//! starting with `/` are raw postback data (e.g. `/Shopping#add`), standing
//! in for menu taps. Replies render to stdout with menu choices listed so
//! their postbacks can be copied back in.

use std::sync::Arc;

use async_trait::async_trait;
use colored::Colorize;
use nudge_config::model::NudgeConfig;
use nudge_core::types::{InboundEvent, Reply, ReplyMessage, SourceKind, WeatherReport};
use nudge_core::{NudgeError, WeatherProvider};
use nudge_dialogue::{DialogueRouter, KeywordTokenizer};
use nudge_storage::SqliteStore;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

/// Conversation source id used for the local REPL session.
const SHELL_SOURCE_ID: &str = "local";

/// Weather collaborator stand-in for offline shell use. Real providers are
/// deployment-specific HTTP clients behind the same trait.
struct OfflineWeather {
    location: String,
}

#[async_trait]
impl WeatherProvider for OfflineWeather {
    async fn current(&self) -> Result<WeatherReport, NudgeError> {
        Ok(WeatherReport {
            location: self.location.clone(),
            summary: "no forecast data (offline)".to_string(),
            temperature_c: 0.0,
        })
    }
}

/// Runs the `nudge shell` interactive REPL.
pub async fn run_shell(config: NudgeConfig) -> Result<(), NudgeError> {
    let store = Arc::new(SqliteStore::new(config.storage.clone()));
    store.initialize().await?;

    let weather = Arc::new(OfflineWeather {
        location: config.weather.location.clone(),
    });
    let router = DialogueRouter::new(
        config.router.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(KeywordTokenizer::new()),
        weather,
    )?;

    println!(
        "{} type a message, {} for a postback, Ctrl+D to exit",
        "nudge shell:".bold(),
        "/Namespace#action".cyan()
    );

    let mut editor = DefaultEditor::new()
        .map_err(|e| NudgeError::Internal(format!("readline init failed: {e}")))?;

    loop {
        match editor.readline(&"you> ".green().to_string()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                let event = if let Some(data) = line.strip_prefix('/') {
                    InboundEvent::postback(SourceKind::User, SHELL_SOURCE_ID, data)
                } else {
                    InboundEvent::text(SourceKind::User, SHELL_SOURCE_ID, line)
                };

                match router.handle_event(&event).await {
                    Ok(Some(reply)) => render_reply(&reply),
                    Ok(None) => debug!("no reply for event"),
                    Err(err) => eprintln!("{} {err}", "error:".red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("bye");
                break;
            }
            Err(err) => {
                return Err(NudgeError::Internal(format!("readline failed: {err}")));
            }
        }
    }

    store.close().await?;
    Ok(())
}

fn render_reply(reply: &Reply) {
    for message in &reply.messages {
        match message {
            ReplyMessage::Text(text) => println!("{} {text}", "bot>".blue()),
            ReplyMessage::Menu { title, choices } => {
                println!("{} {title}", "bot>".blue());
                for choice in choices {
                    println!(
                        "     [{}] {}",
                        choice.label.bold(),
                        format!("/{}", choice.postback).cyan()
                    );
                }
            }
        }
    }
}
