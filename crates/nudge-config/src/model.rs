// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Nudge bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Nudge configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NudgeConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Dialogue router settings.
    #[serde(default)]
    pub router: RouterConfig,

    /// Reminder synchronization engine settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Weather collaborator settings.
    #[serde(default)]
    pub weather: WeatherConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "nudge".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "nudge.db".to_string()
}

/// Dialogue router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Conversation ids allowed to talk to the bot. Empty means all
    /// conversations are allowed.
    #[serde(default)]
    pub allowed_conversations: Vec<String>,

    /// Substring of a text message that pre-empts state and opens the
    /// shopping menu.
    #[serde(default = "default_shopping_trigger")]
    pub shopping_trigger: String,

    /// Substring that pre-empts state and opens the reminder menu.
    #[serde(default = "default_reminder_trigger")]
    pub reminder_trigger: String,

    /// Substring that pre-empts state and replies with the weather report.
    #[serde(default = "default_weather_trigger")]
    pub weather_trigger: String,

    /// Fixed zone offset, in hours east of UTC, that time-picker postbacks
    /// are interpreted in. Picked wall-clock times carry no zone of their
    /// own.
    #[serde(default = "default_presentation_offset_hours")]
    pub presentation_offset_hours: i32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            allowed_conversations: Vec::new(),
            shopping_trigger: default_shopping_trigger(),
            reminder_trigger: default_reminder_trigger(),
            weather_trigger: default_weather_trigger(),
            presentation_offset_hours: default_presentation_offset_hours(),
        }
    }
}

fn default_shopping_trigger() -> String {
    "shopping".to_string()
}

fn default_reminder_trigger() -> String {
    "reminder".to_string()
}

fn default_weather_trigger() -> String {
    "weather".to_string()
}

fn default_presentation_offset_hours() -> i32 {
    9
}

/// Reminder synchronization engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Forward horizon within which reminders are materialized as external
    /// callbacks. Bounds how far in advance tasks are created, trading off
    /// sync frequency against punctuality.
    #[serde(default = "default_lookahead_minutes")]
    pub lookahead_minutes: u64,

    /// How often the engine reconciles against the task backend.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,

    /// HTTP path the task backend POSTs fire callbacks to.
    #[serde(default = "default_callback_path")]
    pub callback_path: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            lookahead_minutes: default_lookahead_minutes(),
            interval_minutes: default_interval_minutes(),
            callback_path: default_callback_path(),
        }
    }
}

fn default_lookahead_minutes() -> u64 {
    120
}

fn default_interval_minutes() -> u64 {
    10
}

fn default_callback_path() -> String {
    "/callback/reminder".to_string()
}

/// Weather collaborator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherConfig {
    /// Location queried for current conditions.
    #[serde(default = "default_weather_location")]
    pub location: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            location: default_weather_location(),
        }
    }
}

fn default_weather_location() -> String {
    "Tokyo".to_string()
}
