use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    /// Missing credential. The backup feature is disabled, not broken;
    /// callers check configuration before issuing requests.
    #[error("Backup API key is missing. Set TASKBOARD_BACKUP_API_KEY.")]
    Configuration,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backup service error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response payload: {0}")]
    Payload(#[from] serde_json::Error),
}
