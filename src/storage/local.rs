//! Local filesystem state store.
//!
//! The state is a single pretty-printed JSON file. Writes go to a sibling
//! `.tmp` file first and are renamed into place, so a crash mid-write leaves
//! the previous record intact.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::State;
use crate::storage::StateStore;

/// JSON file backed state store.
#[derive(Debug, Clone)]
pub struct LocalStateStore {
    path: PathBuf,
}

impl LocalStateStore {
    /// Create a store for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read bytes, returning None if the file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl StateStore for LocalStateStore {
    async fn load(&self) -> State {
        let bytes = match self.read_bytes().await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                log::debug!("No state file at {}, starting fresh", self.path.display());
                return State::default();
            }
            Err(e) => {
                log::warn!(
                    "Could not read state from {}: {}. Starting fresh.",
                    self.path.display(),
                    e
                );
                return State::default();
            }
        };

        match serde_json::from_slice::<State>(&bytes) {
            Ok(state) => state,
            Err(e) => {
                log::warn!(
                    "Corrupt state file {}: {}. Starting fresh.",
                    self.path.display(),
                    e
                );
                State::default()
            }
        }
    }

    async fn save(&self, state: &State) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(state)?;
        self.write_bytes(&bytes).await?;
        log::debug!(
            "State saved to {} ({})",
            self.path.display(),
            state.status.as_str()
        );
        Ok(())
    }
}
