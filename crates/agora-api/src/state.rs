//! Application state wiring the engine to concrete infrastructure.
//!
//! The engine and scheduler are generic over storage and config ports;
//! AppState pins them to the file-backed infra implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use agora_core::agent::TurnScheduler;
use agora_core::config::ConfigSource;
use agora_core::engine::ConversationEngine;
use agora_core::conversation::ConversationStore;
use agora_core::llm::BoxChatClient;
use agora_infra::config::ConfigStore;
use agora_infra::llm::OpenAiCompatibleClient;
use agora_infra::storage::{JsonSnapshotStore, JsonlJournal};

/// Concrete type aliases pinning the generics to infra implementations.
pub type ConcreteEngine = ConversationEngine<JsonlJournal, JsonSnapshotStore>;
pub type ConcreteScheduler = TurnScheduler<JsonlJournal, JsonSnapshotStore, ConfigStore>;

/// Shared application state for the REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConcreteEngine>,
    pub config: Arc<ConfigStore>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, restore the
    /// conversation from the last snapshot, wire the engine.
    ///
    /// The LLM endpoint (base URL, API key) is fixed at startup from the
    /// initial config; the model name and conversation limits follow hot
    /// reloads. Changing the endpoint requires a restart.
    pub async fn init(data_dir: &Path) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let config = ConfigStore::load(data_dir).await;
        let client = OpenAiCompatibleClient::from_chat_config(&config.snapshot().chat);

        let store =
            ConversationStore::restore(JsonlJournal::new(data_dir), JsonSnapshotStore::new(data_dir))
                .await?;
        let engine = ConversationEngine::new(store, BoxChatClient::new(client));

        Ok(Self {
            engine: Arc::new(engine),
            config,
            data_dir: data_dir.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn init_on_fresh_directory_starts_empty() {
        let tmp = TempDir::new().unwrap();
        let state = AppState::init(tmp.path()).await.unwrap();
        assert!(state.engine.recent_posts(10).await.is_empty());
        assert_eq!(state.config.snapshot().chat.model, "gemma2");
    }

    #[tokio::test]
    async fn conversation_survives_a_restart() {
        let tmp = TempDir::new().unwrap();
        {
            let state = AppState::init(tmp.path()).await.unwrap();
            let config = state.config.snapshot();
            state
                .engine
                .post_user_message("bob", "persisted", &config)
                .await
                .unwrap();
        }
        let state = AppState::init(tmp.path()).await.unwrap();
        let posts = state.engine.recent_posts(10).await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].text, "persisted");

        // Numbering resumes after the restored tail
        let config = state.config.snapshot();
        let post = state
            .engine
            .post_user_message("bob", "next", &config)
            .await
            .unwrap();
        assert_eq!(post.seq, 2);
    }
}
