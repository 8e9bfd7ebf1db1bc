use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskboard_core::{BoardError, BoardResult};
use taskboard_domain::BoardState;

use crate::persist::atomic_writer::AtomicWriter;

/// Fixed name of the single durable-storage record holding the board.
pub const STORAGE_NAME: &str = "taskboard-state.json";

const FORMAT_VERSION: u32 = 1;

/// JSON file holding the full serialized board, overwritten on every
/// mutation and loaded once at startup.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

/// On-disk envelope wrapping the board state.
#[derive(Debug, Serialize, Deserialize)]
struct JsonEnvelope {
    version: u32,
    saved_at: DateTime<Utc>,
    state: BoardState,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store under the fixed storage name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(STORAGE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    pub async fn save(&self, state: &BoardState) -> BoardResult<()> {
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            state: state.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        AtomicWriter::write_atomic(&self.path, &bytes).await?;
        tracing::debug!("saved {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    pub async fn load(&self) -> BoardResult<BoardState> {
        let bytes = AtomicWriter::read_all(&self.path).await?;
        let envelope: JsonEnvelope = serde_json::from_slice(&bytes)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        if envelope.version != FORMAT_VERSION {
            return Err(BoardError::Serialization(format!(
                "unsupported state file version: {}",
                envelope.version
            )));
        }
        tracing::info!("loaded board state from {}", self.path.display());
        Ok(envelope.state)
    }
}
