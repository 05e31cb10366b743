// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weather collaborator seam.

use async_trait::async_trait;

use crate::error::NudgeError;
use crate::types::WeatherReport;

/// Fetches current conditions for the configured location.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self) -> Result<WeatherReport, NudgeError>;
}
