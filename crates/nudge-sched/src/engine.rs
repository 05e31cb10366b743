// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The periodic reminder synchronization engine.
//!
//! Each run performs a full scan: load every reminder, keep those due
//! within the lookahead window, group per conversation, and hand each
//! group to the external synchronizer. No incremental diffing -- the task
//! backend upserts idempotently, so recomputing the same window yields the
//! same desired task set and a failed run is simply retried wholesale on
//! the next tick.
//!
//! One run at a time; overlapping runs are prevented by the trigger, not
//! here.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use nudge_config::model::SyncConfig;
use nudge_core::{NudgeError, ReminderStore, ReminderSynchronizer};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::filter::{filter_next_schedule, group_by_conversation};

/// Outcome counters for one engine pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Reminders loaded by the full scan.
    pub loaded: usize,
    /// Reminders due within the lookahead window.
    pub due: usize,
    /// Conversation groups handed to the synchronizer.
    pub groups: usize,
}

/// Reconciles the authoritative reminder set against the task backend.
pub struct SyncEngine {
    reminders: Arc<dyn ReminderStore>,
    synchronizer: Arc<dyn ReminderSynchronizer>,
    lookahead: Duration,
}

impl SyncEngine {
    pub fn new(
        config: &SyncConfig,
        reminders: Arc<dyn ReminderStore>,
        synchronizer: Arc<dyn ReminderSynchronizer>,
    ) -> Self {
        Self {
            reminders,
            synchronizer,
            lookahead: Duration::minutes(config.lookahead_minutes as i64),
        }
    }

    /// Performs one reconciliation pass at `now`.
    ///
    /// A failure in any conversation group fails the whole run; partial
    /// progress is not tracked because the algorithm is idempotent by
    /// construction.
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<SyncReport, NudgeError> {
        let all = self.reminders.list_all_reminders().await?;
        let loaded = all.len();

        let due = filter_next_schedule(all, now, self.lookahead);
        let due_count = due.len();

        let groups = group_by_conversation(due);
        let group_count = groups.len();

        for group in &groups {
            debug!(
                conversation = %group.conversation_id,
                items = group.items.len(),
                "synchronizing conversation group"
            );
            self.synchronizer
                .sync(&group.conversation_id, &group.items, now)
                .await?;
        }

        info!(
            loaded,
            due = due_count,
            groups = group_count,
            "reminder sync pass complete"
        );
        Ok(SyncReport {
            loaded,
            due: due_count,
            groups: group_count,
        })
    }

    /// Runs reconciliation on a fixed interval until cancelled.
    ///
    /// A failed pass is logged and retried on the next tick; only
    /// cancellation ends the loop.
    pub async fn run(&self, interval: std::time::Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("sync engine cancelled, shutting down");
                    return;
                }
                _ = ticker.tick() => {
                    if let Err(err) = self.run_once(Utc::now()).await {
                        error!(error = %err, "reminder sync pass failed, will retry on next tick");
                    }
                }
            }
        }
    }
}
