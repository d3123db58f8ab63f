//! Engine facade: the operations the presentation layer calls.
//!
//! `ConversationEngine` wires the conversation store, the thread registry,
//! the LLM client, and the summary trigger behind one API. It is generic
//! over the storage ports (agora-core never depends on agora-infra); the
//! binary pins it to concrete infra implementations.

use std::collections::HashSet;

use tracing::{debug, warn};

use agora_types::agent::AgentPersona;
use agora_types::config::EngineConfig;
use agora_types::error::{EngineError, LlmError, ValidationError};
use agora_types::post::Post;
use agora_types::thread::ThreadSnapshot;

use crate::agent::summarizer::{Summarizer, SummaryTrigger};
use crate::conversation::{ConversationStore, PostJournal, SnapshotStore};
use crate::llm::BoxChatClient;
use crate::thread::ThreadRegistry;

/// The conversation orchestration engine.
///
/// Mutation of the timeline and of the thread state is serialized inside
/// the owning components ([`ConversationStore`], [`ThreadRegistry`]); the
/// engine never issues an LLM call while holding either lock.
pub struct ConversationEngine<J, S> {
    store: ConversationStore<J, S>,
    thread: ThreadRegistry,
    client: BoxChatClient,
    summary_trigger: SummaryTrigger,
}

impl<J: PostJournal, S: SnapshotStore> ConversationEngine<J, S> {
    /// Wire an engine from a (possibly restored) store and an LLM client.
    pub fn new(store: ConversationStore<J, S>, client: BoxChatClient) -> Self {
        Self {
            store,
            thread: ThreadRegistry::new(),
            client,
            summary_trigger: SummaryTrigger::new(),
        }
    }

    /// The thread registry (title, roster, summary).
    pub fn thread(&self) -> &ThreadRegistry {
        &self.thread
    }

    /// The LLM client used for agent turns and summarization.
    pub fn client(&self) -> &BoxChatClient {
        &self.client
    }

    // --- Posting ---

    /// Append a user-authored post.
    ///
    /// Validates non-empty author and text at the boundary (the operation
    /// is a no-op on failure). Counts toward the summary interval and may
    /// therefore run a summarization LLM call synchronously in the posting
    /// path, outside all locks, before trimming.
    pub async fn post_user_message(
        &self,
        author: &str,
        text: &str,
        config: &EngineConfig,
    ) -> Result<Post, EngineError> {
        self.commit_post(author.trim(), text.trim(), None, config)
            .await
    }

    /// Append an agent-authored post with an optional reply target.
    /// Used by the turn scheduler after mention extraction.
    pub async fn append_agent_post(
        &self,
        author: &str,
        text: &str,
        reply_to: Option<String>,
        config: &EngineConfig,
    ) -> Result<Post, EngineError> {
        self.commit_post(author, text, reply_to, config).await
    }

    async fn commit_post(
        &self,
        author: &str,
        text: &str,
        reply_to: Option<String>,
        config: &EngineConfig,
    ) -> Result<Post, EngineError> {
        let post = self.store.append(author, text, reply_to).await?;

        let limits = config.conversation.clone().normalized();
        if self.summary_trigger.on_post_committed(limits.summary_interval) {
            if let Err(err) = self.regenerate_summary(config).await {
                warn!("automatic summarization failed: {err}, will retry next interval");
            }
        }
        self.store.trim(limits.max_length).await;
        Ok(post)
    }

    // --- Reads ---

    /// The last `n` posts, oldest first.
    pub async fn recent_posts(&self, n: usize) -> Vec<Post> {
        self.store.recent(n).await
    }

    /// The last `n` posts, newest first, for presentation.
    pub async fn display_posts(&self, n: usize) -> Vec<Post> {
        self.store.display(n).await
    }

    /// Names a mention may legitimately target: the current roster plus
    /// every distinct author seen in the retained timeline.
    pub async fn valid_names(&self) -> HashSet<String> {
        let mut names = self.store.authors().await;
        for agent in self.thread.roster().await {
            names.insert(agent.name);
        }
        names
    }

    // --- Administration ---

    /// Register an agent persona.
    pub async fn register_agent(
        &self,
        name: &str,
        personality: &str,
    ) -> Result<AgentPersona, EngineError> {
        Ok(self.thread.register_agent(name, personality).await?)
    }

    /// Deregister an agent by id. Returns whether one was removed.
    pub async fn deregister_agent(&self, id: u64) -> bool {
        self.thread.deregister_agent(id).await
    }

    /// Set the thread title (blank resets to the unset default).
    pub async fn set_title(&self, title: &str) {
        self.thread.set_title(title).await;
    }

    /// Empty the timeline and restart sequence numbering at 1.
    ///
    /// Irreversible. A failure to persist the cleared state is logged and
    /// tolerated, matching the storage policy everywhere else.
    pub async fn clear_conversation(&self) {
        self.store.clear().await;
        if let Err(err) = self.store.persist_snapshot().await {
            warn!("failed to persist cleared conversation: {err}");
        }
    }

    /// Export the session state (title, roster, summary).
    pub async fn export_thread(&self) -> ThreadSnapshot {
        self.thread.export().await
    }

    /// Fully replace the session state from an imported snapshot.
    ///
    /// Each imported persona is re-validated; a snapshot carrying invalid
    /// or duplicate agent ids is rejected and nothing changes.
    pub async fn import_thread(&self, snapshot: ThreadSnapshot) -> Result<(), EngineError> {
        let mut seen = HashSet::new();
        for agent in &snapshot.agents {
            AgentPersona::new(agent.id, &agent.name, &agent.personality)?;
            if !seen.insert(agent.id) {
                return Err(ValidationError::MalformedImport(format!(
                    "duplicate agent id {}",
                    agent.id
                ))
                .into());
            }
        }
        self.thread.import(snapshot).await;
        Ok(())
    }

    // --- Summarization ---

    /// Regenerate the summary on demand, with the same merge algorithm as
    /// the automatic trigger but independent of the interval counter.
    pub async fn regenerate_summary_now(
        &self,
        config: &EngineConfig,
    ) -> Result<String, EngineError> {
        Ok(self.regenerate_summary(config).await?)
    }

    async fn regenerate_summary(&self, config: &EngineConfig) -> Result<String, LlmError> {
        let limits = config.conversation.clone().normalized();
        let recent = self.store.recent(limits.summary_interval as usize).await;
        let title = self.thread.title().await;
        let current = self.thread.summary().await;

        let merged = Summarizer::regenerate(
            &self.client,
            &config.chat.model,
            &title,
            &current,
            &recent,
        )
        .await?;
        debug!(chars = merged.len(), "summary regenerated");
        self.thread.set_summary(merged.clone()).await;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::ConversationStore;
    use crate::test_support::{MemJournal, MemSnapshots, StubChat};
    use agora_types::config::ConversationLimits;

    fn engine_with(client: StubChat) -> ConversationEngine<MemJournal, MemSnapshots> {
        ConversationEngine::new(
            ConversationStore::new(MemJournal::default(), MemSnapshots::default()),
            BoxChatClient::new(client),
        )
    }

    fn config(summary_interval: u32, max_length: usize) -> EngineConfig {
        EngineConfig {
            conversation: ConversationLimits {
                summary_interval,
                max_length,
                ..ConversationLimits::default()
            },
            ..EngineConfig::default()
        }
    }

    #[tokio::test]
    async fn user_post_is_validated_at_the_boundary() {
        let engine = engine_with(StubChat::always("digest"));
        let config = config(10, 100);

        assert!(engine.post_user_message(" ", "hi", &config).await.is_err());
        assert!(engine.post_user_message("bob", "", &config).await.is_err());
        assert!(engine.recent_posts(10).await.is_empty());

        let post = engine.post_user_message("bob", "hi", &config).await.unwrap();
        assert_eq!(post.seq, 1);
        assert!(post.reply_to.is_none());
    }

    #[tokio::test]
    async fn summary_fires_exactly_on_interval() {
        let client = StubChat::always("digest");
        let requests = std::sync::Arc::clone(&client.requests);
        let engine = engine_with(client);
        let config = config(3, 100);

        engine.post_user_message("bob", "one", &config).await.unwrap();
        engine.post_user_message("bob", "two", &config).await.unwrap();
        assert_eq!(requests.lock().unwrap().len(), 0);

        engine.post_user_message("bob", "three", &config).await.unwrap();
        assert_eq!(requests.lock().unwrap().len(), 1);
        assert_eq!(engine.thread().summary().await, "digest");

        engine.post_user_message("bob", "four", &config).await.unwrap();
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn manual_regeneration_does_not_reset_the_counter() {
        let client = StubChat::always("digest");
        let requests = std::sync::Arc::clone(&client.requests);
        let engine = engine_with(client);
        let config = config(3, 100);

        engine.post_user_message("bob", "one", &config).await.unwrap();
        engine.post_user_message("bob", "two", &config).await.unwrap();

        engine.regenerate_summary_now(&config).await.unwrap();
        assert_eq!(requests.lock().unwrap().len(), 1);

        // Third post still lands on the untouched interval counter
        engine.post_user_message("bob", "three", &config).await.unwrap();
        assert_eq!(requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn posts_are_trimmed_to_max_length() {
        let engine = engine_with(StubChat::always("digest"));
        let config = config(100, 3);

        for i in 0..5 {
            engine
                .post_user_message("bob", &format!("post {i}"), &config)
                .await
                .unwrap();
        }
        let recent = engine.recent_posts(100).await;
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].seq, 3);
    }

    #[tokio::test]
    async fn valid_names_union_roster_and_past_authors() {
        let engine = engine_with(StubChat::always("digest"));
        let config = config(100, 100);

        engine.post_user_message("visitor", "hi", &config).await.unwrap();
        let luna = engine.register_agent("Luna", "upbeat").await.unwrap();
        engine.register_agent("Rex", "grumpy").await.unwrap();
        engine.deregister_agent(luna.id).await;

        let names = engine.valid_names().await;
        assert!(names.contains("visitor"));
        assert!(names.contains("Rex"));
        // Luna never posted and is off the roster
        assert!(!names.contains("Luna"));
    }

    #[tokio::test]
    async fn import_export_round_trip_is_a_no_op() {
        let engine = engine_with(StubChat::always("digest"));
        engine.set_title("rust vs go").await;
        engine.register_agent("Luna", "upbeat").await.unwrap();
        engine.register_agent("Rex", "grumpy").await.unwrap();
        engine.thread().set_summary("so far".to_string()).await;

        let exported = engine.export_thread().await;
        engine.import_thread(exported.clone()).await.unwrap();
        assert_eq!(engine.export_thread().await, exported);

        // Id counter recomputed from the imported roster
        let next = engine.register_agent("Nova", "new").await.unwrap();
        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn malformed_import_is_rejected_and_state_unchanged() {
        let engine = engine_with(StubChat::always("digest"));
        engine.register_agent("Luna", "upbeat").await.unwrap();
        let before = engine.export_thread().await;

        let mut snapshot = before.clone();
        snapshot.agents.push(snapshot.agents[0].clone());
        assert!(engine.import_thread(snapshot).await.is_err());
        assert_eq!(engine.export_thread().await, before);
    }

    #[tokio::test]
    async fn clear_restarts_numbering_at_one() {
        let engine = engine_with(StubChat::always("digest"));
        let config = config(100, 100);
        engine.post_user_message("bob", "one", &config).await.unwrap();
        engine.clear_conversation().await;
        let post = engine.post_user_message("bob", "fresh", &config).await.unwrap();
        assert_eq!(post.seq, 1);
    }
}
