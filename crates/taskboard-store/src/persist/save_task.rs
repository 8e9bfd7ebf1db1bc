use taskboard_domain::BoardState;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::persist::json_file_store::JsonFileStore;

/// Spawn the background save loop draining a store's save channel.
///
/// Queued snapshots are coalesced to the newest before writing, so a
/// burst of mutations costs one disk write. Save failures are logged and
/// never propagate back into mutations; the next change tries again.
/// The task ends when the store (and its sender) is dropped.
pub fn spawn_save_task(
    mut rx: mpsc::UnboundedReceiver<BoardState>,
    file: JsonFileStore,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(mut state) = rx.recv().await {
            while let Ok(newer) = rx.try_recv() {
                state = newer;
            }
            if let Err(e) = file.save(&state).await {
                tracing::error!("failed to persist board state: {e}");
            }
        }
        tracing::debug!("save channel closed, stopping save task");
    })
}
