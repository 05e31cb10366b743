// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row-mapping helpers for storage entities.
//!
//! The canonical domain types live in `nudge-core`; this module re-exports
//! them for convenience within the storage crate and provides the text ->
//! typed-column conversions used by the query modules. Conversion failures
//! surface as `FromSqlConversionFailure` so they carry the offending column
//! index through the rusqlite error path.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;

pub use nudge_core::types::{
    ConversationId, ConversationStatus, NewReminder, ReminderItem, ShoppingItem, StatusKind,
};
pub use nudge_core::Scheduler;

/// Parses a `strftime('%Y-%m-%dT%H:%M:%fZ')` column into a UTC timestamp.
pub(crate) fn timestamp_column(idx: usize, raw: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parses a serialized scheduler column (`tag#RFC3339`).
pub(crate) fn scheduler_column(idx: usize, raw: &str) -> Result<Scheduler, rusqlite::Error> {
    raw.parse()
        .map_err(|e: nudge_core::ScheduleError| {
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
        })
}

/// Parses an enum-as-text column via its `FromStr` impl.
pub(crate) fn enum_column<T>(idx: usize, raw: &str) -> Result<T, rusqlite::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
