use crate::domain::ports::SessionStore;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Token persistence for the CLI host, one JSON file per session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let record: SessionRecord = serde_json::from_str(&content).ok()?;
        Some(record.token)
    }

    fn store(&self, token: &str) -> Result<()> {
        let record = SessionRecord {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&record)?)?;
        tracing::debug!("session token stored at {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
