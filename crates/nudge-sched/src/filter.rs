// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Windowed filtering and per-conversation grouping of reminders.

use chrono::{DateTime, Duration, Utc};
use nudge_core::types::{ConversationId, ReminderItem};
use nudge_core::ScheduleError;

/// One conversation's reminders due within the current window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderGroup {
    pub conversation_id: ConversationId,
    pub items: Vec<ReminderItem>,
}

/// Keeps the items whose next fire time falls within `[now, now + window)`,
/// preserving input order.
///
/// Exhausted schedules ([`ScheduleError::EndOfSchedule`]) are dropped
/// silently; they will never fire again and are never synced again.
pub fn filter_next_schedule(
    items: Vec<ReminderItem>,
    now: DateTime<Utc>,
    window: Duration,
) -> Vec<ReminderItem> {
    let horizon = now + window;
    items
        .into_iter()
        .filter(|item| match item.scheduler.next(now) {
            Ok(fire_at) => fire_at >= now && fire_at < horizon,
            Err(ScheduleError::EndOfSchedule) => false,
            // next() only fails with EndOfSchedule today; any future error
            // kind should also exclude the item rather than abort the run.
            Err(_) => false,
        })
        .collect()
}

/// Partitions items into contiguous runs sharing a conversation id.
///
/// The single linear pass is only correct over input sorted by conversation
/// id. The loader contract provides that ordering, but it spans a crate
/// boundary, so a stable re-sort makes the precondition local; intra-
/// conversation order is preserved.
pub fn group_by_conversation(mut items: Vec<ReminderItem>) -> Vec<ReminderGroup> {
    items.sort_by(|a, b| a.conversation_id.cmp(&b.conversation_id));

    let mut groups: Vec<ReminderGroup> = Vec::new();
    for item in items {
        match groups.last_mut() {
            Some(group) if group.conversation_id == item.conversation_id => {
                group.items.push(item);
            }
            _ => groups.push(ReminderGroup {
                conversation_id: item.conversation_id.clone(),
                items: vec![item],
            }),
        }
    }
    groups
}
