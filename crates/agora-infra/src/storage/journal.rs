//! Append-only JSONL journal of committed posts.
//!
//! One JSON object per line, appended on every commit. The journal is an
//! audit trail: the engine restores from the snapshot store, never from
//! here, so the file only ever grows and is safe to rotate externally.

use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use agora_core::conversation::PostJournal;
use agora_types::error::StorageError;
use agora_types::post::Post;

/// JSONL-file implementation of [`PostJournal`].
#[derive(Debug, Clone)]
pub struct JsonlJournal {
    path: PathBuf,
}

impl JsonlJournal {
    /// Journal writing to `{data_dir}/conversation.jsonl`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("conversation.jsonl"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PostJournal for JsonlJournal {
    async fn append(&self, post: &Post) -> Result<(), StorageError> {
        let mut line = serde_json::to_string(post)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
