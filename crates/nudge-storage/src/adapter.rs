// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the core store traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use nudge_config::model::StorageConfig;
use nudge_core::traits::{ReminderStore, ShoppingStore, StatusStore};
use nudge_core::types::{
    ConversationId, ConversationStatus, NewReminder, ReminderItem, ShoppingItem,
};
use nudge_core::NudgeError;

use crate::database::Database;
use crate::queries;

/// SQLite-backed store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily opened on the first call to
/// [`initialize`](SqliteStore::initialize); one `SqliteStore` serves the
/// status, reminder, and shopping traits at once.
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new store with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database and run migrations.
    pub async fn initialize(&self) -> Result<(), NudgeError> {
        let db = Database::open(&self.config.database_path).await?;
        self.db.set(db).map_err(|_| NudgeError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    /// Checkpoint the WAL ahead of shutdown.
    pub async fn close(&self) -> Result<(), NudgeError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    fn db(&self) -> Result<&Database, NudgeError> {
        self.db.get().ok_or_else(|| NudgeError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl StatusStore for SqliteStore {
    async fn get_status(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<ConversationStatus>, NudgeError> {
        queries::status::get_status(self.db()?, conversation_id).await
    }

    async fn set_status(&self, status: &ConversationStatus) -> Result<(), NudgeError> {
        status.validate()?;
        queries::status::set_status(self.db()?, status).await
    }
}

#[async_trait]
impl ReminderStore for SqliteStore {
    async fn create_reminder(&self, reminder: &NewReminder) -> Result<i64, NudgeError> {
        queries::reminders::create_reminder(self.db()?, reminder).await
    }

    async fn get_reminder(&self, id: i64) -> Result<ReminderItem, NudgeError> {
        queries::reminders::get_reminder(self.db()?, id)
            .await?
            .ok_or(NudgeError::NotFound {
                kind: "reminder",
                id: id.to_string(),
            })
    }

    async fn list_reminders(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<ReminderItem>, NudgeError> {
        queries::reminders::list_for_conversation(self.db()?, conversation_id).await
    }

    async fn list_all_reminders(&self) -> Result<Vec<ReminderItem>, NudgeError> {
        queries::reminders::list_all(self.db()?).await
    }

    async fn delete_reminder(&self, id: i64) -> Result<(), NudgeError> {
        if queries::reminders::delete_reminder(self.db()?, id).await? {
            Ok(())
        } else {
            Err(NudgeError::NotFound {
                kind: "reminder",
                id: id.to_string(),
            })
        }
    }
}

#[async_trait]
impl ShoppingStore for SqliteStore {
    async fn list_items(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<ShoppingItem>, NudgeError> {
        queries::shopping::list_items(self.db()?, conversation_id).await
    }

    async fn add_items(
        &self,
        conversation_id: &ConversationId,
        names: &[String],
    ) -> Result<(), NudgeError> {
        queries::shopping::add_items(self.db()?, conversation_id, names).await
    }

    async fn delete_items(&self, ids: &[i64]) -> Result<(), NudgeError> {
        queries::shopping::delete_items(self.db()?, ids).await
    }

    async fn delete_all_items(&self, conversation_id: &ConversationId) -> Result<(), NudgeError> {
        queries::shopping::delete_all(self.db()?, conversation_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nudge_core::types::{ExecutorKind, SourceKind, StatusKind};
    use nudge_core::Scheduler;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
        }
    }

    async fn setup_store() -> (SqliteStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("adapter.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn operations_before_initialize_fail() {
        let store = SqliteStore::new(make_config("/tmp/never-opened.db"));
        let conv = ConversationId::from_source(SourceKind::User, "U1");
        let result = StatusStore::get_status(&store, &conv).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let (store, _dir) = setup_store().await;
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn set_status_validates_before_writing() {
        let (store, _dir) = setup_store().await;
        let invalid = ConversationStatus::new(ConversationId(String::new()), StatusKind::Neutral);
        let err = store.set_status(&invalid).await.unwrap_err();
        assert!(matches!(err, NudgeError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_reminder_maps_to_tagged_not_found() {
        let (store, _dir) = setup_store().await;
        let err = store.get_reminder(999).await.unwrap_err();
        assert!(err.is_not_found());

        let err = store.delete_reminder(999).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn full_reminder_lifecycle_through_adapter() {
        let (store, _dir) = setup_store().await;
        let conv = ConversationId::from_source(SourceKind::User, "U1");

        let id = store
            .create_reminder(&NewReminder {
                name: "groceries".to_string(),
                conversation_id: conv.clone(),
                scheduler: Scheduler::Daily(
                    chrono::DateTime::parse_from_rfc3339("2021-01-01T19:00:00+09:00").unwrap(),
                ),
                executor: ExecutorKind::ShoppingList,
            })
            .await
            .unwrap();

        let loaded = store.get_reminder(id).await.unwrap();
        assert_eq!(loaded.name, "groceries");

        assert_eq!(store.list_reminders(&conv).await.unwrap().len(), 1);
        store.delete_reminder(id).await.unwrap();
        assert!(store.list_reminders(&conv).await.unwrap().is_empty());
    }
}
