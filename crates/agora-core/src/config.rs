//! Configuration port.

use std::sync::Arc;

use agora_types::config::EngineConfig;

/// Source of engine configuration snapshots.
///
/// The scheduler takes exactly one snapshot at the top of each agent turn
/// and uses it consistently for that whole turn; the source decides when
/// and how the underlying document is reloaded (the infra implementation
/// watches the config file and swaps). Snapshots are cheap `Arc` clones.
pub trait ConfigSource: Send + Sync {
    /// The current configuration snapshot.
    fn snapshot(&self) -> Arc<EngineConfig>;
}
