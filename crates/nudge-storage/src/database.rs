// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use nudge_core::NudgeError;
use tracing::debug;

use crate::migrations;

/// PRAGMAs applied to every connection. WAL for concurrent readers,
/// busy_timeout so short write contention blocks instead of erroring.
const CONNECTION_PRAGMAS: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 5000;
";

/// Handle to the single SQLite connection.
///
/// Query modules accept `&Database` and go through
/// [`connection()`](Database::connection)`.call(..)`; tokio-rusqlite
/// serializes all closures on one background thread.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path`, applies PRAGMAs,
    /// and runs any pending migrations before handing out the handle.
    pub async fn open(path: &str) -> Result<Self, NudgeError> {
        // Migrations run on a throwaway blocking connection so the
        // long-lived async connection never observes a half-migrated schema.
        let migrate_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), NudgeError> {
            let mut conn = rusqlite::Connection::open(&migrate_path).map_err(map_err)?;
            conn.execute_batch(CONNECTION_PRAGMAS).map_err(map_err)?;
            migrations::run_migrations(&mut conn)
        })
        .await
        .map_err(|e| NudgeError::Internal(format!("migration task panicked: {e}")))??;

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_tr_err)?;
        conn.call(|conn| {
            conn.execute_batch(CONNECTION_PRAGMAS)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection, for `call()` access.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoints the WAL and closes the connection.
    pub async fn close(self) -> Result<(), NudgeError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(map_tr_err)?;
        debug!("database closed");
        Ok(())
    }
}

/// Maps any backend error into the central storage error variant.
pub fn map_tr_err<E>(err: E) -> NudgeError
where
    E: std::error::Error + Send + Sync + 'static,
{
    NudgeError::Storage {
        source: Box::new(err),
    }
}

fn map_err(err: rusqlite::Error) -> NudgeError {
    NudgeError::Storage {
        source: Box::new(err),
    }
}
