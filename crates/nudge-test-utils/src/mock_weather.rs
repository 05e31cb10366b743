// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock weather provider with a fixed report.

use async_trait::async_trait;

use nudge_core::types::WeatherReport;
use nudge_core::{NudgeError, WeatherProvider};

/// Always returns the same conditions.
pub struct MockWeather {
    report: WeatherReport,
}

impl MockWeather {
    pub fn new() -> Self {
        Self {
            report: WeatherReport {
                location: "Testville".to_string(),
                summary: "clear".to_string(),
                temperature_c: 21.5,
            },
        }
    }

    pub fn with_report(report: WeatherReport) -> Self {
        Self { report }
    }
}

impl Default for MockWeather {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for MockWeather {
    async fn current(&self) -> Result<WeatherReport, NudgeError> {
        Ok(self.report.clone())
    }
}
