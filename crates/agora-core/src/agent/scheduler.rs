//! Background turn scheduler.
//!
//! Runs agents round-robin in a single loop: each pass re-reads the roster
//! every turn and serves the first agent not yet served this pass, so
//! registrations and deregistrations take effect mid-pass without skipping
//! anyone still registered. One configuration snapshot is taken at the top
//! of each turn and used consistently through prompt assembly, the LLM
//! call, and the commit.
//!
//! A failed turn never stops the loop: the error is recorded in the
//! timeline as an `[error]`-marked post by the same agent and the loop
//! moves on.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use agora_types::agent::AgentPersona;
use agora_types::config::EngineConfig;
use agora_types::error::LlmError;
use agora_types::llm::ChatRequest;

use crate::config::ConfigSource;
use crate::conversation::{PostJournal, SnapshotStore};
use crate::engine::ConversationEngine;

use super::{mentions, prompt};

/// Delays between scheduler steps. Tests zero these out and drive the loop
/// with a paused clock.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// Poll interval while the roster is empty.
    pub idle_poll: Duration,
    /// Pause between consecutive agent turns within a pass.
    pub turn_delay: Duration,
    /// Pause after a full pass over the roster.
    pub pass_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            idle_poll: Duration::from_secs(2),
            turn_delay: Duration::from_secs(1),
            pass_delay: Duration::from_secs(5),
        }
    }
}

/// Drives agent turns until cancelled.
pub struct TurnScheduler<J, S, C> {
    engine: Arc<ConversationEngine<J, S>>,
    config: Arc<C>,
    cancel: CancellationToken,
    pacing: Pacing,
}

impl<J, S, C> TurnScheduler<J, S, C>
where
    J: PostJournal,
    S: SnapshotStore,
    C: ConfigSource,
{
    pub fn new(
        engine: Arc<ConversationEngine<J, S>>,
        config: Arc<C>,
        cancel: CancellationToken,
        pacing: Pacing,
    ) -> Self {
        Self {
            engine,
            config,
            cancel,
            pacing,
        }
    }

    /// Run the scheduling loop until the cancellation token fires.
    ///
    /// Cancellation is observed between turns and while waiting; a turn
    /// already in flight completes (bounded by the per-call LLM timeout)
    /// before the loop exits.
    pub async fn run(self) {
        info!("turn scheduler started");
        loop {
            if self.cancel.is_cancelled() {
                break;
            }
            let roster = self.engine.thread().roster().await;
            if roster.is_empty() {
                if !self.wait(self.pacing.idle_poll).await {
                    break;
                }
                continue;
            }

            let mut served: Vec<u64> = Vec::new();
            loop {
                if self.cancel.is_cancelled() {
                    break;
                }
                // Re-read the roster so mid-pass membership changes apply;
                // tracking served ids keeps a deregistration earlier in the
                // roster from shifting the next agent out of the walk.
                let roster = self.engine.thread().roster().await;
                let Some(agent) = roster
                    .iter()
                    .find(|a| !served.contains(&a.id))
                    .cloned()
                else {
                    break;
                };
                served.push(agent.id);

                self.take_turn(&agent).await;
                if !self.wait(self.pacing.turn_delay).await {
                    break;
                }
            }
            if self.cancel.is_cancelled() {
                break;
            }
            if !self.wait(self.pacing.pass_delay).await {
                break;
            }
        }
        info!("turn scheduler stopped");
    }

    /// Execute one agent turn: prompt, LLM call, mention extraction,
    /// commit. Errors become `[error]` marker posts.
    #[tracing::instrument(skip(self, agent), fields(agent = %agent.name))]
    async fn take_turn(&self, agent: &AgentPersona) {
        let config = self.config.snapshot();

        match self.generate_reply(agent, &config).await {
            Ok(Some((text, reply_to))) => {
                if let Err(err) = self
                    .engine
                    .append_agent_post(&agent.name, &text, reply_to, &config)
                    .await
                {
                    warn!("discarding agent reply: {err}");
                }
            }
            Ok(None) => {
                debug!("agent produced no usable text, skipping turn");
            }
            Err(err) => {
                warn!("agent turn failed: {err}");
                let marker = format!("[error] {err}");
                if let Err(err) = self
                    .engine
                    .append_agent_post(&agent.name, &marker, None, &config)
                    .await
                {
                    warn!("failed to record error marker: {err}");
                }
            }
        }
    }

    /// Produce the cleaned reply text and extracted reply target for one
    /// turn, or `None` when the cleaned text ends up empty.
    async fn generate_reply(
        &self,
        agent: &AgentPersona,
        config: &EngineConfig,
    ) -> Result<Option<(String, Option<String>)>, LlmError> {
        let limits = config.conversation.clone().normalized();
        let recent = self.engine.recent_posts(limits.context_window).await;
        let title = self.engine.thread().title().await;
        let summary = self.engine.thread().summary().await;

        let user_prompt =
            prompt::build_turn_prompt(&title, &summary, &recent, agent, &config.prompt_instructions);
        let request =
            ChatRequest::with_system(&config.chat.model, &config.chat.system_prompt, user_prompt);

        let call = self.engine.client().complete(&request);
        let response = match timeout(Duration::from_secs(config.chat.timeout_secs), call).await {
            Ok(result) => result?,
            Err(_) => return Err(LlmError::Timeout(config.chat.timeout_secs)),
        };

        let valid_names = self.engine.valid_names().await;
        let (cleaned, reply_to) = mentions::extract(response.trim(), &valid_names);
        if cleaned.is_empty() {
            return Ok(None);
        }
        Ok(Some((cleaned, reply_to)))
    }

    /// Sleep unless cancelled first. Returns `false` on cancellation.
    async fn wait(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = sleep(duration) => true,
        }
    }
}
