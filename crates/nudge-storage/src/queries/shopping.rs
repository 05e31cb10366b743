// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shopping-list item operations.

use nudge_core::NudgeError;
use rusqlite::{params, params_from_iter};

use crate::database::Database;
use crate::models::{self, ConversationId, ShoppingItem};

fn row_to_item(row: &rusqlite::Row<'_>) -> Result<ShoppingItem, rusqlite::Error> {
    let conversation_id: String = row.get(1)?;
    let created_at: String = row.get(3)?;
    Ok(ShoppingItem {
        id: row.get(0)?,
        conversation_id: ConversationId(conversation_id),
        name: row.get(2)?,
        created_at: models::timestamp_column(3, &created_at)?,
    })
}

/// List a conversation's items in insertion order.
pub async fn list_items(
    db: &Database,
    conversation_id: &ConversationId,
) -> Result<Vec<ShoppingItem>, NudgeError> {
    let key = conversation_id.as_str().to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, conversation_id, name, created_at FROM shopping_items
                 WHERE conversation_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![key], row_to_item)?;
            let mut items = Vec::new();
            for row in rows {
                items.push(row?);
            }
            Ok(items)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Append one item per name, preserving the given order.
///
/// Runs in a single transaction so a partial insert never becomes visible.
pub async fn add_items(
    db: &Database,
    conversation_id: &ConversationId,
    names: &[String],
) -> Result<(), NudgeError> {
    let key = conversation_id.as_str().to_string();
    let names = names.to_vec();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO shopping_items (conversation_id, name) VALUES (?1, ?2)",
                )?;
                for name in &names {
                    stmt.execute(params![key, name])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete the rows with the given ids. Missing ids are ignored.
pub async fn delete_items(db: &Database, ids: &[i64]) -> Result<(), NudgeError> {
    if ids.is_empty() {
        return Ok(());
    }
    let ids = ids.to_vec();
    db.connection()
        .call(move |conn| {
            let placeholders = vec!["?"; ids.len()].join(", ");
            let sql = format!("DELETE FROM shopping_items WHERE id IN ({placeholders})");
            conn.execute(&sql, params_from_iter(ids.iter()))?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete every item a conversation owns.
pub async fn delete_all(db: &Database, conversation_id: &ConversationId) -> Result<(), NudgeError> {
    let key = conversation_id.as_str().to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM shopping_items WHERE conversation_id = ?1",
                params![key],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nudge_core::types::SourceKind;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn conv(id: &str) -> ConversationId {
        ConversationId::from_source(SourceKind::Group, id)
    }

    #[tokio::test]
    async fn add_preserves_line_order() {
        let (db, _dir) = setup_db().await;
        let names = vec!["apples".to_string(), "bread".to_string(), "milk".to_string()];
        add_items(&db, &conv("G1"), &names).await.unwrap();

        let items = list_items(&db, &conv("G1")).await.unwrap();
        let listed: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(listed, vec!["apples", "bread", "milk"]);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_by_ids_removes_only_those_rows() {
        let (db, _dir) = setup_db().await;
        add_items(
            &db,
            &conv("G1"),
            &["a".to_string(), "b".to_string(), "c".to_string()],
        )
        .await
        .unwrap();

        let items = list_items(&db, &conv("G1")).await.unwrap();
        delete_items(&db, &[items[0].id, items[2].id]).await.unwrap();

        let remaining = list_items(&db, &conv("G1")).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "b");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_with_empty_ids_is_a_noop() {
        let (db, _dir) = setup_db().await;
        add_items(&db, &conv("G1"), &["a".to_string()]).await.unwrap();
        delete_items(&db, &[]).await.unwrap();
        assert_eq!(list_items(&db, &conv("G1")).await.unwrap().len(), 1);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_all_is_scoped_to_conversation() {
        let (db, _dir) = setup_db().await;
        add_items(&db, &conv("G1"), &["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        add_items(&db, &conv("G2"), &["x".to_string()]).await.unwrap();

        delete_all(&db, &conv("G1")).await.unwrap();

        assert!(list_items(&db, &conv("G1")).await.unwrap().is_empty());
        assert_eq!(list_items(&db, &conv("G2")).await.unwrap().len(), 1);
        db.close().await.unwrap();
    }
}
