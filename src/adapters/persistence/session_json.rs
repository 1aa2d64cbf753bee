//! Implements SessionStore using a JSON file.
//!
//! Holds the "remember me" session between runs.

use crate::domain::{DomainError, Session};
use crate::ports::SessionStore;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// JSON file-based session storage.
pub struct SessionJson {
    path: PathBuf,
}

impl SessionJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl SessionStore for SessionJson {
    /// A missing file means no session. A corrupt one is discarded with a warning.
    async fn load(&self) -> Result<Option<Session>, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::Session(format!("read session: {e}"))),
        };
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if session.is_authenticated() => Ok(Some(session)),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding unreadable session file");
                Ok(None)
            }
        }
    }

    /// Write-replace: temp file, fsync, rename. A crash mid-write leaves the old file intact.
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| DomainError::Session(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Session(format!("create session dir: {e}")))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Session(format!("create temp file: {e}")))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Session(format!("write temp file: {e}")))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Session(format!("sync temp file: {e}")))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Session(format!("atomic rename failed: {e}")))?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Session(format!("remove session: {e}"))),
        }
    }
}
