// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation status slot operations.

use nudge_core::NudgeError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{self, ConversationId, ConversationStatus};

/// Get the persisted status for a conversation, if any.
pub async fn get_status(
    db: &Database,
    conversation_id: &ConversationId,
) -> Result<Option<ConversationStatus>, NudgeError> {
    let key = conversation_id.as_str().to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT conversation_id, status FROM conversation_status
                 WHERE conversation_id = ?1",
            )?;
            let result = stmt.query_row(params![key], |row| {
                let id: String = row.get(0)?;
                let status: String = row.get(1)?;
                Ok(ConversationStatus {
                    conversation_id: ConversationId(id),
                    kind: models::enum_column(1, &status)?,
                })
            });
            match result {
                Ok(status) => Ok(Some(status)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Overwrite the status slot for a conversation (upsert).
pub async fn set_status(db: &Database, status: &ConversationStatus) -> Result<(), NudgeError> {
    let key = status.conversation_id.as_str().to_string();
    let kind = status.kind.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversation_status (conversation_id, status)
                 VALUES (?1, ?2)
                 ON CONFLICT(conversation_id) DO UPDATE SET
                   status = excluded.status,
                   updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![key, kind],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nudge_core::types::{SourceKind, StatusKind};
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn conv(id: &str) -> ConversationId {
        ConversationId::from_source(SourceKind::User, id)
    }

    #[tokio::test]
    async fn missing_status_reads_as_none() {
        let (db, _dir) = setup_db().await;
        let result = get_status(&db, &conv("U-none")).await.unwrap();
        assert!(result.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let (db, _dir) = setup_db().await;
        let status = ConversationStatus::new(conv("U1"), StatusKind::Shopping);
        set_status(&db, &status).await.unwrap();

        let loaded = get_status(&db, &conv("U1")).await.unwrap().unwrap();
        assert_eq!(loaded, status);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn second_write_overwrites_not_appends() {
        let (db, _dir) = setup_db().await;
        set_status(&db, &ConversationStatus::new(conv("U1"), StatusKind::Shopping))
            .await
            .unwrap();
        set_status(
            &db,
            &ConversationStatus::new(conv("U1"), StatusKind::ShoppingAdd),
        )
        .await
        .unwrap();

        let loaded = get_status(&db, &conv("U1")).await.unwrap().unwrap();
        assert_eq!(loaded.kind, StatusKind::ShoppingAdd);

        let count: i64 = db
            .connection()
            .call(|conn| {
                let n = conn.query_row("SELECT COUNT(*) FROM conversation_status", [], |row| {
                    row.get(0)
                })?;
                Ok(n)
            })
            .await
            .unwrap();
        assert_eq!(count, 1, "status is a single slot, not a history");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn statuses_are_partitioned_by_conversation() {
        let (db, _dir) = setup_db().await;
        set_status(&db, &ConversationStatus::new(conv("U1"), StatusKind::Shopping))
            .await
            .unwrap();
        set_status(
            &db,
            &ConversationStatus::new(conv("U2"), StatusKind::ReminderAdd),
        )
        .await
        .unwrap();

        assert_eq!(
            get_status(&db, &conv("U1")).await.unwrap().unwrap().kind,
            StatusKind::Shopping
        );
        assert_eq!(
            get_status(&db, &conv("U2")).await.unwrap().unwrap().kind,
            StatusKind::ReminderAdd
        );
        db.close().await.unwrap();
    }
}
