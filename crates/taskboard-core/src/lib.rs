pub mod config;
pub mod error;
pub mod id;
pub mod result;

pub use config::{BackupConfig, BACKUP_PROFILE, BACKUP_USER_ID};
pub use error::BoardError;
pub use id::uid;
pub use result::BoardResult;
