// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `nudge serve` and `nudge sync` command implementations.
//!
//! `serve` runs the reminder sync engine on its configured interval until
//! SIGINT/SIGTERM. `sync` performs a single pass and exits; use it when an
//! external single-instance cron owns the cadence. The messaging transport
//! that feeds the dialogue router is deployment-specific and not started
//! here; `nudge shell` drives the router locally.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use nudge_config::model::NudgeConfig;
use nudge_core::NudgeError;
use nudge_sched::SyncEngine;
use nudge_storage::SqliteStore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::task_log::LoggingSynchronizer;

/// Installs signal handlers for SIGTERM and SIGINT.
///
/// Returns a [`CancellationToken`] that is cancelled when either signal is
/// received.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

            tokio::select! {
                _ = ctrl_c => {
                    info!("received SIGINT (Ctrl+C), initiating shutdown");
                }
                _ = sigterm.recv() => {
                    info!("received SIGTERM, initiating shutdown");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, initiating shutdown");
        }

        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

async fn open_engine(config: &NudgeConfig) -> Result<(Arc<SqliteStore>, SyncEngine), NudgeError> {
    let store = Arc::new(SqliteStore::new(config.storage.clone()));
    store.initialize().await?;

    let synchronizer = Arc::new(LoggingSynchronizer::new(&config.sync.callback_path));
    let engine = SyncEngine::new(&config.sync, store.clone(), synchronizer);
    Ok((store, engine))
}

/// Runs the `nudge serve` command.
pub async fn run_serve(config: NudgeConfig) -> Result<(), NudgeError> {
    info!("starting nudge serve");
    let (store, engine) = open_engine(&config).await?;

    let cancel = install_signal_handler();
    let interval = Duration::from_secs(config.sync.interval_minutes * 60);
    engine.run(interval, cancel).await;

    store.close().await?;
    info!("nudge serve stopped");
    Ok(())
}

/// Runs the `nudge sync` command: one reconciliation pass.
pub async fn run_sync_once(config: NudgeConfig) -> Result<(), NudgeError> {
    let (store, engine) = open_engine(&config).await?;
    let report = engine.run_once(Utc::now()).await?;
    println!(
        "sync complete: {} loaded, {} due, {} conversation groups",
        report.loaded, report.due, report.groups
    );
    store.close().await?;
    Ok(())
}
