//! In-memory test doubles for the storage, LLM, and config ports.

use std::sync::{Arc, Mutex};

use agora_types::config::EngineConfig;
use agora_types::error::{LlmError, StorageError};
use agora_types::llm::ChatRequest;
use agora_types::post::{ConversationSnapshot, Post};

use crate::config::ConfigSource;
use crate::conversation::{PostJournal, SnapshotStore};
use crate::llm::ChatClient;

/// Journal that records appended posts in memory.
#[derive(Default, Clone)]
pub struct MemJournal {
    pub lines: Arc<Mutex<Vec<Post>>>,
}

impl PostJournal for MemJournal {
    async fn append(&self, post: &Post) -> Result<(), StorageError> {
        self.lines.lock().unwrap().push(post.clone());
        Ok(())
    }
}

/// Snapshot store backed by a shared in-memory cell.
#[derive(Default, Clone)]
pub struct MemSnapshots {
    pub saved: Arc<Mutex<Option<Vec<Post>>>>,
}

impl SnapshotStore for MemSnapshots {
    async fn save(&self, posts: &[Post]) -> Result<(), StorageError> {
        *self.saved.lock().unwrap() = Some(posts.to_vec());
        Ok(())
    }

    async fn load(&self) -> Result<Option<ConversationSnapshot>, StorageError> {
        Ok(self
            .saved
            .lock()
            .unwrap()
            .clone()
            .map(|messages| ConversationSnapshot { messages }))
    }
}

/// Chat client that replays scripted responses and records every request.
///
/// Responses are consumed in order; once the script is exhausted the
/// fallback response is returned forever. `Err` entries simulate provider
/// failures.
pub struct StubChat {
    script: Mutex<Vec<Result<String, LlmError>>>,
    fallback: String,
    pub requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl StubChat {
    pub fn scripted(script: Vec<Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script),
            fallback: "stub reply".to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn always(text: &str) -> Self {
        Self {
            script: Mutex::new(Vec::new()),
            fallback: text.to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl ChatClient for StubChat {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            Ok(self.fallback.clone())
        } else {
            script.remove(0)
        }
    }
}

/// Config source returning a fixed snapshot.
pub struct StaticConfig(pub Arc<EngineConfig>);

impl StaticConfig {
    pub fn of(config: EngineConfig) -> Self {
        Self(Arc::new(config))
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self::of(EngineConfig::default())
    }
}

impl ConfigSource for StaticConfig {
    fn snapshot(&self) -> Arc<EngineConfig> {
        Arc::clone(&self.0)
    }
}
