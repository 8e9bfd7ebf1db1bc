use async_trait::async_trait;
use taskboard_domain::BoardState;

use crate::client::BackupRecord;
use crate::error::BackupError;

/// Abstract remote backup endpoint.
///
/// `BackupClient` is the HTTP implementation; the lifecycle controller is
/// written against this trait so tests can substitute an in-memory remote.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteBackupStore: Send + Sync {
    /// Whether the credential needed for remote calls is present. When
    /// false, callers skip every other operation.
    fn is_configured(&self) -> bool;

    /// Send a full board snapshot; returns the stored record.
    async fn create_backup(&self, state: &BoardState) -> Result<BackupRecord, BackupError>;

    /// Fetch the most recent snapshot for the profile. `Ok(None)` means no
    /// backup exists yet, which is a normal empty-state case.
    async fn fetch_latest_backup(&self) -> Result<Option<BoardState>, BackupError>;
}
