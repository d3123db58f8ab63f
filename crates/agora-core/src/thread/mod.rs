//! Thread registry: the owner of session-level mutable state.
//!
//! Title, agent roster, running summary, and the agent-id counter live
//! behind one `tokio::sync::RwLock`. All mutation goes through this type;
//! no other component holds a reference into the roster.

use tokio::sync::RwLock;

use agora_types::agent::AgentPersona;
use agora_types::error::ValidationError;
use agora_types::thread::{DEFAULT_TITLE, ThreadSnapshot};

struct ThreadInner {
    title: String,
    agents: Vec<AgentPersona>,
    summary: String,
    next_agent_id: u64,
}

/// Owner of title, roster, and summary.
pub struct ThreadRegistry {
    inner: RwLock<ThreadInner>,
}

impl Default for ThreadRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadRegistry {
    /// Create a registry with the default (unset) title and no agents.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ThreadInner {
                title: DEFAULT_TITLE.to_string(),
                agents: Vec::new(),
                summary: String::new(),
                next_agent_id: 1,
            }),
        }
    }

    /// Register a new agent persona and return it.
    pub async fn register_agent(
        &self,
        name: &str,
        personality: &str,
    ) -> Result<AgentPersona, ValidationError> {
        let mut inner = self.inner.write().await;
        let agent = AgentPersona::new(inner.next_agent_id, name.trim(), personality.trim())?;
        inner.next_agent_id += 1;
        inner.agents.push(agent.clone());
        Ok(agent)
    }

    /// Remove an agent by id. Returns whether one was removed.
    pub async fn deregister_agent(&self, id: u64) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.agents.len();
        inner.agents.retain(|a| a.id != id);
        inner.agents.len() != before
    }

    /// The roster in registration order.
    pub async fn roster(&self) -> Vec<AgentPersona> {
        self.inner.read().await.agents.clone()
    }

    /// Set the thread title. Blank input resets to the unset default.
    pub async fn set_title(&self, title: &str) {
        let title = title.trim();
        let mut inner = self.inner.write().await;
        inner.title = if title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title.to_string()
        };
    }

    /// Current thread title.
    pub async fn title(&self) -> String {
        self.inner.read().await.title.clone()
    }

    /// Current running summary (possibly empty).
    pub async fn summary(&self) -> String {
        self.inner.read().await.summary.clone()
    }

    /// Replace the running summary.
    pub async fn set_summary(&self, summary: String) {
        self.inner.write().await.summary = summary;
    }

    /// Snapshot the full session state for export.
    pub async fn export(&self) -> ThreadSnapshot {
        let inner = self.inner.read().await;
        ThreadSnapshot {
            title: inner.title.clone(),
            agents: inner.agents.clone(),
            summary: inner.summary.clone(),
        }
    }

    /// Replace the full session state from an imported snapshot.
    ///
    /// The agent-id counter is recomputed as `max(ids) + 1` (or 1 when the
    /// imported roster is empty).
    pub async fn import(&self, snapshot: ThreadSnapshot) {
        let mut inner = self.inner.write().await;
        inner.next_agent_id = snapshot.agents.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        inner.title = if snapshot.title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            snapshot.title
        };
        inner.agents = snapshot.agents;
        inner.summary = snapshot.summary;
    }
}
