// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and sane time windows.

use crate::diagnostic::ConfigError;
use crate::model::NudgeConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &NudgeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.sync.lookahead_minutes == 0 {
        errors.push(ConfigError::Validation {
            message: "sync.lookahead_minutes must be positive".to_string(),
        });
    }

    if config.sync.interval_minutes == 0 {
        errors.push(ConfigError::Validation {
            message: "sync.interval_minutes must be positive".to_string(),
        });
    }

    if !config.sync.callback_path.starts_with('/') {
        errors.push(ConfigError::Validation {
            message: format!(
                "sync.callback_path must start with `/`, got `{}`",
                config.sync.callback_path
            ),
        });
    }

    // UTC offsets in the wild span -12..+14.
    if !(-12..=14).contains(&config.router.presentation_offset_hours) {
        errors.push(ConfigError::Validation {
            message: format!(
                "router.presentation_offset_hours must be between -12 and 14, got {}",
                config.router.presentation_offset_hours
            ),
        });
    }

    for trigger in [
        ("router.shopping_trigger", &config.router.shopping_trigger),
        ("router.reminder_trigger", &config.router.reminder_trigger),
        ("router.weather_trigger", &config.router.weather_trigger),
    ] {
        if trigger.1.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{} must not be empty", trigger.0),
            });
        }
    }

    for (i, conversation) in config.router.allowed_conversations.iter().enumerate() {
        if conversation.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("router.allowed_conversations[{i}] must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
