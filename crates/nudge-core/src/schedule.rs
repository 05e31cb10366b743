// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recurrence descriptors for reminders.
//!
//! A [`Scheduler`] is a value owned by the reminder that embeds it, not an
//! entity of its own. It computes the next fire time relative to a given
//! instant and round-trips through a stable `tag#RFC3339` wire form so it
//! can be persisted as a single text column.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use thiserror::Error;

/// Wire tag for a one-shot schedule.
const ONESHOT_TAG: &str = "o";
/// Wire tag for a daily schedule.
const DAILY_TAG: &str = "d";

/// Errors produced by schedule computation and wire-format parsing.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The schedule will never fire again. Expected terminal condition for
    /// one-shot schedules whose time has passed; callers filter it silently
    /// rather than reporting it.
    #[error("schedule has no future occurrences")]
    EndOfSchedule,

    /// The wire form carried an unrecognized type tag.
    #[error("invalid scheduler type tag: {0}")]
    InvalidSchedulerType(String),

    /// The timestamp segment of the wire form was malformed.
    #[error("invalid scheduler timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// When a reminder should next fire.
///
/// The embedded time keeps its original zone offset; daily recurrence is
/// computed against the wall clock of that offset, so a reminder created
/// for 18:15 in UTC+9 fires at 18:15 UTC+9 regardless of the server zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduler {
    /// Fires once at the stored instant, then is permanently exhausted.
    Oneshot(DateTime<FixedOffset>),
    /// Fires every day at the stored wall-clock time-of-day.
    Daily(DateTime<FixedOffset>),
}

impl Scheduler {
    /// Computes the next fire time strictly after `now`.
    ///
    /// One-shot: returns the stored instant while `now` is strictly before
    /// it, [`ScheduleError::EndOfSchedule`] once `now` has reached it.
    /// Daily: returns today's occurrence of the stored time-of-day (in the
    /// stored offset) if `now` is strictly before it, otherwise the same
    /// wall-clock time tomorrow. Equality rolls over; a schedule never
    /// fires "now".
    pub fn next(&self, now: DateTime<Utc>) -> Result<DateTime<FixedOffset>, ScheduleError> {
        match self {
            Scheduler::Oneshot(at) => {
                if now < *at {
                    Ok(*at)
                } else {
                    Err(ScheduleError::EndOfSchedule)
                }
            }
            Scheduler::Daily(at) => {
                let offset = *at.offset();
                let local_now = now.with_timezone(&offset);
                let candidate = local_now.date_naive().and_time(at.time());
                // FixedOffset has no DST gaps, so local -> absolute is a
                // plain subtraction of the offset.
                let naive_utc =
                    candidate - Duration::seconds(i64::from(offset.local_minus_utc()));
                let occurrence = DateTime::<FixedOffset>::from_naive_utc_and_offset(
                    naive_utc, offset,
                );
                if now < occurrence {
                    Ok(occurrence)
                } else {
                    Ok(occurrence + Duration::days(1))
                }
            }
        }
    }

    /// Human-readable rendering for menus. Presentation only, never compared.
    pub fn ui_text(&self) -> String {
        match self {
            Scheduler::Oneshot(at) => format!("at {}", at.format("%Y-%m-%d %H:%M")),
            Scheduler::Daily(at) => format!("at {} every day", at.format("%H:%M")),
        }
    }
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheduler::Oneshot(at) => write!(f, "{ONESHOT_TAG}#{}", at.to_rfc3339()),
            Scheduler::Daily(at) => write!(f, "{DAILY_TAG}#{}", at.to_rfc3339()),
        }
    }
}

impl FromStr for Scheduler {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, timestamp) = s
            .split_once('#')
            .ok_or_else(|| ScheduleError::InvalidSchedulerType(s.to_string()))?;
        let at = DateTime::parse_from_rfc3339(timestamp)?;
        match tag {
            ONESHOT_TAG => Ok(Scheduler::Oneshot(at)),
            DAILY_TAG => Ok(Scheduler::Daily(at)),
            other => Err(ScheduleError::InvalidSchedulerType(other.to_string())),
        }
    }
}
