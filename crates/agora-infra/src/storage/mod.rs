//! File-backed conversation persistence.

pub mod journal;
pub mod snapshot;

pub use journal::JsonlJournal;
pub use snapshot::JsonSnapshotStore;
