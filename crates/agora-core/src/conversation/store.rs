//! In-memory conversation log with a monotonic sequence counter.
//!
//! All mutation (append, trim, clear) is serialized through one
//! `tokio::sync::RwLock`; a write holds the lock across sequence
//! assignment, the collection update, and persistence, so two writers can
//! never interleave and sequence numbers strictly reflect commit order.
//! Readers proceed concurrently.

use std::collections::HashSet;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::warn;

use agora_types::error::{StorageError, ValidationError};
use agora_types::post::Post;

use super::journal::{PostJournal, SnapshotStore};

struct LogInner {
    posts: Vec<Post>,
    next_seq: u64,
}

/// Owner of the ordered message log and the sequence counter.
///
/// Persists through the two storage ports on every committed mutation.
/// Storage failures are logged and swallowed: the in-memory timeline is
/// authoritative and the process keeps running, accepting potential data
/// loss on restart.
pub struct ConversationStore<J, S> {
    inner: RwLock<LogInner>,
    journal: J,
    snapshots: S,
}

impl<J: PostJournal, S: SnapshotStore> ConversationStore<J, S> {
    /// Create an empty store. The first append gets sequence number 1.
    pub fn new(journal: J, snapshots: S) -> Self {
        Self {
            inner: RwLock::new(LogInner {
                posts: Vec::new(),
                next_seq: 1,
            }),
            journal,
            snapshots,
        }
    }

    /// Restore the store from the last saved snapshot.
    ///
    /// The sequence counter resumes at `last.seq + 1`, or 1 when the
    /// snapshot is missing or empty.
    pub async fn restore(journal: J, snapshots: S) -> Result<Self, StorageError> {
        let posts = snapshots
            .load()
            .await?
            .map(|snapshot| snapshot.messages)
            .unwrap_or_default();
        let next_seq = posts.last().map(|p| p.seq + 1).unwrap_or(1);
        Ok(Self {
            inner: RwLock::new(LogInner { posts, next_seq }),
            journal,
            snapshots,
        })
    }

    /// Append a post: assign the next sequence number, timestamp it, push,
    /// persist, and return the committed record.
    pub async fn append(
        &self,
        author: &str,
        text: &str,
        reply_to: Option<String>,
    ) -> Result<Post, ValidationError> {
        let mut inner = self.inner.write().await;
        let post = Post::new(inner.next_seq, author, reply_to, text, Utc::now())?;
        inner.posts.push(post.clone());
        inner.next_seq += 1;

        if let Err(err) = self.journal.append(&post).await {
            warn!(seq = post.seq, "journal append failed: {err}, continuing in memory");
        }
        if let Err(err) = self.snapshots.save(&inner.posts).await {
            warn!(seq = post.seq, "snapshot save failed: {err}, continuing in memory");
        }
        Ok(post)
    }

    /// Retain only the newest `max_len` posts. Sequence numbers of the
    /// survivors are unchanged. Returns whether anything was dropped.
    pub async fn trim(&self, max_len: usize) -> bool {
        let mut inner = self.inner.write().await;
        if inner.posts.len() <= max_len {
            return false;
        }
        let excess = inner.posts.len() - max_len;
        inner.posts.drain(..excess);
        if let Err(err) = self.snapshots.save(&inner.posts).await {
            warn!("snapshot save failed after trim: {err}, continuing in memory");
        }
        true
    }

    /// Empty the log and reset the sequence counter to 1.
    ///
    /// Post-clear sequence numbers legitimately restart at 1; persisting
    /// the cleared state is the caller's responsibility (see
    /// [`persist_snapshot`](Self::persist_snapshot)).
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.posts.clear();
        inner.next_seq = 1;
    }

    /// Write the current timeline to the snapshot store.
    pub async fn persist_snapshot(&self) -> Result<(), StorageError> {
        let inner = self.inner.read().await;
        self.snapshots.save(&inner.posts).await
    }

    /// The last `n` posts in chronological order (oldest first).
    pub async fn recent(&self, n: usize) -> Vec<Post> {
        let inner = self.inner.read().await;
        let start = inner.posts.len().saturating_sub(n);
        inner.posts[start..].to_vec()
    }

    /// The last `n` posts in reverse-chronological order, for presentation.
    pub async fn display(&self, n: usize) -> Vec<Post> {
        let mut posts = self.recent(n).await;
        posts.reverse();
        posts
    }

    /// The full retained timeline, oldest first.
    pub async fn all(&self) -> Vec<Post> {
        self.inner.read().await.posts.clone()
    }

    /// Number of retained posts.
    pub async fn len(&self) -> usize {
        self.inner.read().await.posts.len()
    }

    /// Whether the timeline is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.posts.is_empty()
    }

    /// Every distinct author seen in the retained timeline.
    pub async fn authors(&self) -> HashSet<String> {
        let inner = self.inner.read().await;
        inner.posts.iter().map(|p| p.author.clone()).collect()
    }
}
