//! Engine configuration: TOML loader, swappable store, file watcher.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`EngineConfig`]. Falls back to defaults when the file is missing or
//! malformed, so a fresh data directory always starts. [`ConfigStore`]
//! holds the current snapshot behind a cheap swap and implements the
//! engine's `ConfigSource` port; [`watch_config`] keeps it fresh with a
//! debounced filesystem watcher.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};

use agora_core::config::ConfigSource;
use agora_types::config::EngineConfig;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load engine configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`EngineConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns
///   the default.
/// - If the file exists and parses successfully, returns the parsed
///   config (per-field defaults fill any gaps).
pub async fn load_engine_config(data_dir: &Path) -> EngineConfig {
    let config_path = data_dir.join(CONFIG_FILE_NAME);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "no {CONFIG_FILE_NAME} found at {}, using defaults",
                config_path.display()
            );
            return EngineConfig::default();
        }
        Err(err) => {
            tracing::warn!("failed to read {}: {err}, using defaults", config_path.display());
            return EngineConfig::default();
        }
    };

    parse_or_default(&content, &config_path)
}

fn parse_or_default(content: &str, config_path: &Path) -> EngineConfig {
    match toml::from_str::<EngineConfig>(content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            EngineConfig::default()
        }
    }
}

/// Holder of the current [`EngineConfig`] snapshot.
///
/// Readers get an `Arc` clone; a reload swaps the whole snapshot, so a
/// scheduler turn that took its snapshot before the swap keeps a
/// consistent view for the rest of the turn.
pub struct ConfigStore {
    config_path: PathBuf,
    current: RwLock<Arc<EngineConfig>>,
}

impl ConfigStore {
    /// Load the initial snapshot from `{data_dir}/config.toml`.
    pub async fn load(data_dir: &Path) -> Arc<Self> {
        let config = load_engine_config(data_dir).await;
        Arc::new(Self {
            config_path: data_dir.join(CONFIG_FILE_NAME),
            current: RwLock::new(Arc::new(config)),
        })
    }

    /// Re-read the config file and swap the snapshot.
    ///
    /// Synchronous on purpose: the watcher callback runs on the notify
    /// thread, not inside the tokio runtime. A file that disappeared or
    /// no longer parses swaps in the defaults, same as initial load.
    pub fn reload(&self) {
        let config = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => parse_or_default(&content, &self.config_path),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "{} removed, reverting to defaults",
                    self.config_path.display()
                );
                EngineConfig::default()
            }
            Err(err) => {
                tracing::warn!(
                    "failed to re-read {}: {err}, keeping current config",
                    self.config_path.display()
                );
                return;
            }
        };
        tracing::info!("configuration reloaded from {}", self.config_path.display());
        *self.current.write().unwrap() = Arc::new(config);
    }
}

impl ConfigSource for ConfigStore {
    fn snapshot(&self) -> Arc<EngineConfig> {
        Arc::clone(&self.current.read().unwrap())
    }
}

/// Errors from starting the configuration watcher.
#[derive(Debug, thiserror::Error)]
pub enum ConfigWatchError {
    #[error("watcher creation failed: {0}")]
    WatcherCreation(String),

    #[error("failed to watch '{path}': {reason}")]
    WatchPath { path: String, reason: String },
}

/// RAII handle that keeps the configuration watcher alive.
pub struct ConfigWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
}

/// Watch the data directory and reload the store when `config.toml`
/// changes.
///
/// The directory is watched rather than the file itself so atomic
/// replace-by-rename edits (and a file created after startup) are picked
/// up. Events for other files in the directory are ignored.
pub fn watch_config(
    store: Arc<ConfigStore>,
    data_dir: &Path,
    debounce: Duration,
) -> Result<ConfigWatcher, ConfigWatchError> {
    let mut debouncer = new_debouncer(debounce, move |result: DebounceEventResult| match result {
        Ok(events) => {
            let config_changed = events.iter().any(|event| {
                event
                    .path
                    .file_name()
                    .is_some_and(|name| name == CONFIG_FILE_NAME)
            });
            if config_changed {
                store.reload();
            }
        }
        Err(err) => {
            tracing::warn!("config watcher error: {err}");
        }
    })
    .map_err(|e| ConfigWatchError::WatcherCreation(e.to_string()))?;

    debouncer
        .watcher()
        .watch(data_dir, RecursiveMode::NonRecursive)
        .map_err(|e| ConfigWatchError::WatchPath {
            path: data_dir.display().to_string(),
            reason: e.to_string(),
        })?;

    tracing::info!("config watcher started on {}", data_dir.display());
    Ok(ConfigWatcher {
        _debouncer: debouncer,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_engine_config(tmp.path()).await;
        assert_eq!(config, EngineConfig::default());
    }

    #[tokio::test]
    async fn valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"
[chat]
model = "qwen3"

[conversation]
summary_interval = 5
"#,
        )
        .await
        .unwrap();

        let config = load_engine_config(tmp.path()).await;
        assert_eq!(config.chat.model, "qwen3");
        assert_eq!(config.conversation.summary_interval, 5);
        // Per-field defaults still apply
        assert_eq!(config.conversation.max_length, 100);
    }

    #[tokio::test]
    async fn invalid_toml_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join(CONFIG_FILE_NAME), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_engine_config(tmp.path()).await;
        assert_eq!(config, EngineConfig::default());
    }

    #[tokio::test]
    async fn reload_swaps_the_snapshot() {
        let tmp = TempDir::new().unwrap();
        let store = ConfigStore::load(tmp.path()).await;
        assert_eq!(store.snapshot().chat.model, "gemma2");

        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[chat]\nmodel = \"qwen3\"\n",
        )
        .unwrap();
        store.reload();
        assert_eq!(store.snapshot().chat.model, "qwen3");
    }

    #[tokio::test]
    async fn snapshot_taken_before_reload_is_unaffected() {
        let tmp = TempDir::new().unwrap();
        let store = ConfigStore::load(tmp.path()).await;
        let before = store.snapshot();

        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[chat]\nmodel = \"qwen3\"\n",
        )
        .unwrap();
        store.reload();

        assert_eq!(before.chat.model, "gemma2");
        assert_eq!(store.snapshot().chat.model, "qwen3");
    }

    #[tokio::test]
    async fn watcher_reloads_on_file_change() {
        let tmp = TempDir::new().unwrap();
        let store = ConfigStore::load(tmp.path()).await;
        let watcher = watch_config(
            Arc::clone(&store),
            tmp.path(),
            Duration::from_millis(100),
        )
        .unwrap();

        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[chat]\nmodel = \"qwen3\"\n",
        )
        .unwrap();

        // File events can be slow or unreliable on some platforms; poll
        // with a generous deadline and tolerate a miss.
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while std::time::Instant::now() < deadline {
            if store.snapshot().chat.model == "qwen3" {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        drop(watcher);
    }

    #[test]
    fn watcher_on_missing_directory_fails() {
        let store = Arc::new(ConfigStore {
            config_path: PathBuf::from("/nonexistent/config.toml"),
            current: RwLock::new(Arc::new(EngineConfig::default())),
        });
        let result = watch_config(
            store,
            Path::new("/nonexistent/path/that/does/not/exist"),
            Duration::from_millis(100),
        );
        assert!(result.is_err());
    }
}
