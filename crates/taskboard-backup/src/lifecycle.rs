//! Per-session backup orchestration.
//!
//! Two independent sub-processes over one `RemoteBackupStore`:
//! - a restore that runs at most once per session, replacing local state
//!   with the latest remote snapshot when one exists;
//! - an auto-backup task that watches store changes, debounces them, and
//!   sends only the newest pending snapshot, with at most one request in
//!   flight at a time.
//!
//! Remote failures are logged here and never reach the caller; local
//! editing keeps working regardless of backup health.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration, Instant};

use taskboard_domain::{BoardActions, BoardState};
use taskboard_store::{BoardStore, StoreChange};

use crate::remote::RemoteBackupStore;

/// Debounce interval between the last qualifying change and the flush.
pub const AUTO_BACKUP_DELAY: Duration = Duration::from_secs(90);

pub struct BackupLifecycle<R> {
    remote: Arc<R>,
    delay: Duration,
    restore_attempted: bool,
    auto_backup: Option<JoinHandle<()>>,
}

impl<R: RemoteBackupStore + 'static> BackupLifecycle<R> {
    pub fn new(remote: Arc<R>) -> Self {
        Self::with_delay(remote, AUTO_BACKUP_DELAY)
    }

    /// Construct with a custom debounce interval. Production uses
    /// `AUTO_BACKUP_DELAY`; tests use short intervals.
    pub fn with_delay(remote: Arc<R>, delay: Duration) -> Self {
        Self {
            remote,
            delay,
            restore_attempted: false,
            auto_backup: None,
        }
    }

    /// Attempt the initial restore, at most once per session.
    ///
    /// On a successful fetch with a payload, local state is replaced
    /// wholesale. A missing backup or a failed request leaves local state
    /// untouched; failures are only logged.
    pub async fn restore_once(&mut self, store: &mut BoardStore) {
        if self.restore_attempted {
            return;
        }
        if !self.remote.is_configured() {
            tracing::debug!("backup not configured, skipping restore");
            return;
        }
        // Marked before the request begins so a re-activation never
        // issues a second fetch.
        self.restore_attempted = true;

        match self.remote.fetch_latest_backup().await {
            Ok(Some(state)) => {
                store.replace_board_state(state);
                tracing::info!("restored board state from remote backup");
            }
            Ok(None) => tracing::debug!("no remote backup exists yet"),
            Err(e) => tracing::error!("initial restore failed: {e}"),
        }
    }

    /// Start the auto-backup task over a store change subscription.
    /// Does nothing when the backup feature is not configured.
    pub fn spawn_auto_backup(&mut self, changes: broadcast::Receiver<StoreChange>) {
        if !self.remote.is_configured() {
            tracing::debug!("backup not configured, auto backup disabled");
            return;
        }
        let remote = Arc::clone(&self.remote);
        let delay = self.delay;
        self.auto_backup = Some(tokio::spawn(auto_backup_loop(remote, changes, delay)));
    }

    /// Tear down: cancel the pending debounce timer and stop flushing.
    /// An already in-flight request finishes but its result is discarded.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.auto_backup.take() {
            task.abort();
            tracing::debug!("auto backup task stopped");
        }
    }
}

impl<R> Drop for BackupLifecycle<R> {
    fn drop(&mut self) {
        if let Some(task) = self.auto_backup.take() {
            task.abort();
        }
    }
}

async fn auto_backup_loop<R: RemoteBackupStore + 'static>(
    remote: Arc<R>,
    mut changes: broadcast::Receiver<StoreChange>,
    delay: Duration,
) {
    let mut pending: Option<BoardState> = None;
    let mut last_revision: u64 = 0;
    let mut inflight: Option<JoinHandle<()>> = None;

    let sleeper = sleep(delay);
    tokio::pin!(sleeper);
    let mut armed = false;

    loop {
        tokio::select! {
            changed = changes.recv() => match changed {
                Ok(change) => {
                    if change.revision <= last_revision {
                        continue;
                    }
                    last_revision = change.revision;
                    // Newest snapshot supersedes any prior pending one.
                    pending = Some(change.current);
                    sleeper.as_mut().reset(Instant::now() + delay);
                    armed = true;
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("auto backup lagged behind {skipped} store changes");
                }
                Err(RecvError::Closed) => break,
            },
            () = sleeper.as_mut(), if armed => {
                armed = false;
                let busy = inflight.as_ref().is_some_and(|task| !task.is_finished());
                if busy {
                    // Pending stays put; only a later change reschedules it.
                    tracing::debug!("backup already in flight, dropping this flush");
                } else if let Some(snapshot) = pending.take() {
                    let remote = Arc::clone(&remote);
                    inflight = Some(tokio::spawn(async move {
                        match remote.create_backup(&snapshot).await {
                            Ok(record) => {
                                tracing::debug!(record_id = %record.id, "auto backup sent");
                            }
                            Err(e) => tracing::error!("auto backup failed: {e}"),
                        }
                    }));
                }
            }
        }
    }
}
