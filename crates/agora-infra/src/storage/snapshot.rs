//! Whole-timeline snapshot persisted as pretty-printed JSON.
//!
//! The snapshot is the restore source on startup. It is rewritten in full
//! on every commit; the timeline is bounded by `max_length`, so the file
//! stays small.

use std::path::{Path, PathBuf};

use tracing::warn;

use agora_core::conversation::SnapshotStore;
use agora_types::error::StorageError;
use agora_types::post::{ConversationSnapshot, Post};

/// JSON-file implementation of [`SnapshotStore`].
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Store writing to `{data_dir}/conversation.json`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("conversation.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    async fn save(&self, posts: &[Post]) -> Result<(), StorageError> {
        let snapshot = ConversationSnapshot {
            messages: posts.to_vec(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn load(&self) -> Result<Option<ConversationSnapshot>, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&content) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                // A corrupt snapshot must not block startup.
                warn!(
                    "malformed snapshot at {}: {err}, starting empty",
                    self.path.display()
                );
                Ok(None)
            }
        }
    }
}
