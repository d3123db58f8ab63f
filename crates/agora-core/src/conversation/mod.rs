//! The ordered message log and its durable-storage ports.

pub mod journal;
pub mod store;

pub use journal::{PostJournal, SnapshotStore};
pub use store::ConversationStore;
