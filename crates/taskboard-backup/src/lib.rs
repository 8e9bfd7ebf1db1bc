pub mod client;
pub mod error;
pub mod lifecycle;
pub mod remote;

pub use client::{BackupClient, BackupRecord};
pub use error::BackupError;
pub use lifecycle::{BackupLifecycle, AUTO_BACKUP_DELAY};
pub use remote::RemoteBackupStore;
