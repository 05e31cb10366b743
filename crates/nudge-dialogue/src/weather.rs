// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weather domain handler. Stateless: a trigger keyword fetches current
//! conditions from the collaborator and formats a one-line reply.

use std::sync::Arc;

use nudge_core::types::Reply;
use nudge_core::{NudgeError, WeatherProvider};

pub struct WeatherHandler {
    weather: Arc<dyn WeatherProvider>,
}

impl WeatherHandler {
    pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
        Self { weather }
    }

    pub async fn report(&self) -> Result<Reply, NudgeError> {
        let report = self.weather.current().await?;
        Ok(Reply::text(format!(
            "{}: {}, {:.1}\u{b0}C",
            report.location, report.summary, report.temperature_c
        )))
    }
}
