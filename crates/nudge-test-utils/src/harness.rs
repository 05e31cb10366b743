// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full bot stack -- temp SQLite storage, the
//! dialogue router, the sync engine, and mock collaborators -- and provides
//! `send_text()` / `send_postback()` to drive the pipeline in tests.

use std::sync::Arc;

use nudge_config::model::{NudgeConfig, RouterConfig, StorageConfig, SyncConfig};
use nudge_core::types::{InboundEvent, Reply, SourceKind};
use nudge_core::{NudgeError, ReminderStore, ShoppingStore, StatusStore, Tokenizer};
use nudge_dialogue::{DialogueRouter, KeywordTokenizer};
use nudge_sched::SyncEngine;
use nudge_storage::SqliteStore;

use crate::mock_sync::MockSynchronizer;
use crate::mock_weather::MockWeather;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    router_config: RouterConfig,
    sync_config: SyncConfig,
    tokenizer: Option<Arc<dyn Tokenizer>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            router_config: RouterConfig {
                // Tests run against UTC wall clocks unless overridden.
                presentation_offset_hours: 0,
                ..RouterConfig::default()
            },
            sync_config: SyncConfig::default(),
            tokenizer: None,
        }
    }

    /// Restrict the allow-list (default: empty, everything allowed).
    pub fn with_allowed_conversations(mut self, allowed: Vec<String>) -> Self {
        self.router_config.allowed_conversations = allowed;
        self
    }

    /// Set the presentation offset for picked times.
    pub fn with_presentation_offset_hours(mut self, hours: i32) -> Self {
        self.router_config.presentation_offset_hours = hours;
        self
    }

    /// Set the sync engine's lookahead window.
    pub fn with_lookahead_minutes(mut self, minutes: u64) -> Self {
        self.sync_config.lookahead_minutes = minutes;
        self
    }

    /// Swap the default keyword tokenizer for a scripted mock.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, NudgeError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| NudgeError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage_config = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
        };
        let store = Arc::new(SqliteStore::new(storage_config.clone()));
        store.initialize().await?;

        let tokenizer = self
            .tokenizer
            .unwrap_or_else(|| Arc::new(KeywordTokenizer::new()));
        let weather = Arc::new(MockWeather::new());
        let synchronizer = Arc::new(MockSynchronizer::new());

        let router = DialogueRouter::new(
            self.router_config.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            tokenizer,
            weather.clone(),
        )?;

        let engine = SyncEngine::new(&self.sync_config, store.clone(), synchronizer.clone());

        let config = NudgeConfig {
            storage: storage_config,
            router: self.router_config,
            sync: self.sync_config,
            ..NudgeConfig::default()
        };

        Ok(TestHarness {
            router,
            engine,
            store,
            synchronizer,
            weather,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with temp storage and mock collaborators.
pub struct TestHarness {
    /// The dialogue router under test.
    pub router: DialogueRouter,
    /// The sync engine wired to the mock synchronizer.
    pub engine: SyncEngine,
    /// Concrete store handle (temp DB, cleaned up on drop); implements all
    /// three store traits for direct assertions.
    pub store: Arc<SqliteStore>,
    /// Captured task-queue calls.
    pub synchronizer: Arc<MockSynchronizer>,
    /// Fixed-conditions weather mock.
    pub weather: Arc<MockWeather>,
    /// The assembled configuration.
    pub config: NudgeConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Drive a text message from a user-sourced conversation.
    pub async fn send_text(
        &self,
        source_id: &str,
        text: &str,
    ) -> Result<Option<Reply>, NudgeError> {
        self.router
            .handle_event(&InboundEvent::text(SourceKind::User, source_id, text))
            .await
    }

    /// Drive a postback from a user-sourced conversation.
    pub async fn send_postback(
        &self,
        source_id: &str,
        data: &str,
    ) -> Result<Option<Reply>, NudgeError> {
        self.router
            .handle_event(&InboundEvent::postback(SourceKind::User, source_id, data))
            .await
    }

    /// Store handle as the status trait object.
    pub fn status_store(&self) -> Arc<dyn StatusStore> {
        self.store.clone()
    }

    /// Store handle as the reminder trait object.
    pub fn reminder_store(&self) -> Arc<dyn ReminderStore> {
        self.store.clone()
    }

    /// Store handle as the shopping trait object.
    pub fn shopping_store(&self) -> Arc<dyn ShoppingStore> {
        self.store.clone()
    }
}
