// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder record CRUD operations.

use nudge_core::NudgeError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{self, ConversationId, NewReminder, ReminderItem};

const SELECT_COLUMNS: &str =
    "SELECT id, conversation_id, name, scheduler, executor, created_at FROM reminders";

fn row_to_reminder(row: &rusqlite::Row<'_>) -> Result<ReminderItem, rusqlite::Error> {
    let conversation_id: String = row.get(1)?;
    let scheduler: String = row.get(3)?;
    let executor: String = row.get(4)?;
    let created_at: String = row.get(5)?;
    Ok(ReminderItem {
        id: row.get(0)?,
        conversation_id: ConversationId(conversation_id),
        name: row.get(2)?,
        scheduler: models::scheduler_column(3, &scheduler)?,
        executor: models::enum_column(4, &executor)?,
        created_at: models::timestamp_column(5, &created_at)?,
    })
}

/// Insert a new reminder. Returns the store-assigned id.
pub async fn create_reminder(db: &Database, reminder: &NewReminder) -> Result<i64, NudgeError> {
    let conversation_id = reminder.conversation_id.as_str().to_string();
    let name = reminder.name.clone();
    let scheduler = reminder.scheduler.to_string();
    let executor = reminder.executor.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO reminders (conversation_id, name, scheduler, executor)
                 VALUES (?1, ?2, ?3, ?4)",
                params![conversation_id, name, scheduler, executor],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get one reminder by id.
pub async fn get_reminder(db: &Database, id: i64) -> Result<Option<ReminderItem>, NudgeError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
            let result = stmt.query_row(params![id], row_to_reminder);
            match result {
                Ok(reminder) => Ok(Some(reminder)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List one conversation's reminders in creation order.
pub async fn list_for_conversation(
    db: &Database,
    conversation_id: &ConversationId,
) -> Result<Vec<ReminderItem>, NudgeError> {
    let key = conversation_id.as_str().to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_COLUMNS} WHERE conversation_id = ?1 ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map(params![key], row_to_reminder)?;
            let mut reminders = Vec::new();
            for row in rows {
                reminders.push(row?);
            }
            Ok(reminders)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List every reminder across all conversations.
///
/// Ordered by conversation id then creation order; the sync engine's
/// contiguous-run grouping depends on this ordering.
pub async fn list_all(db: &Database) -> Result<Vec<ReminderItem>, NudgeError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_COLUMNS} ORDER BY conversation_id ASC, id ASC"
            ))?;
            let rows = stmt.query_map([], row_to_reminder)?;
            let mut reminders = Vec::new();
            for row in rows {
                reminders.push(row?);
            }
            Ok(reminders)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete one reminder by id. Returns whether a row was actually removed.
pub async fn delete_reminder(db: &Database, id: i64) -> Result<bool, NudgeError> {
    db.connection()
        .call(move |conn| {
            let affected = conn.execute("DELETE FROM reminders WHERE id = ?1", params![id])?;
            Ok(affected > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
