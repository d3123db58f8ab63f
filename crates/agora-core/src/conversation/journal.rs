//! Durable-storage ports for the conversation timeline.
//!
//! Two collaborators back the in-memory log: an append-only journal (one
//! JSON post per line) and a full-snapshot store. Implementations live in
//! agora-infra; byte-level formats are theirs to own.

use agora_types::error::StorageError;
use agora_types::post::{ConversationSnapshot, Post};

/// Append-only log of committed posts.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait PostJournal: Send + Sync {
    /// Append one post to the log.
    fn append(
        &self,
        post: &Post,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}

/// Full-snapshot store for the retained timeline.
pub trait SnapshotStore: Send + Sync {
    /// Overwrite the snapshot with the given posts.
    fn save(
        &self,
        posts: &[Post],
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// Load the last saved snapshot, or `None` if none exists yet.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<ConversationSnapshot>, StorageError>> + Send;
}
