//! Running-summary regeneration and its post-count trigger.
//!
//! Every `summary_interval` committed posts (user- and agent-authored
//! alike), the newest posts are merged into the existing summary by a
//! dedicated LLM call with a fixed summarizer persona. Manual regeneration
//! runs the same merge but never touches the interval counter.

use std::sync::Mutex;

use agora_types::error::LlmError;
use agora_types::llm::ChatRequest;
use agora_types::post::Post;

use crate::llm::BoxChatClient;

use super::prompt::render_post_line;

/// System prompt for the summary-merge LLM call.
pub const SUMMARIZER_SYSTEM_PROMPT: &str = "You are an excellent discussion summarizer.";

/// Stateless utility for merging recent posts into the running summary.
pub struct Summarizer;

impl Summarizer {
    /// Build the merge prompt from the current summary, the thread title,
    /// and the newest posts (rendered in the same numbered form as turn
    /// prompts).
    pub fn build_merge_prompt(current_summary: &str, title: &str, recent: &[Post]) -> String {
        let mut conversation_text = String::new();
        for post in recent {
            conversation_text.push_str(&render_post_line(post));
            conversation_text.push('\n');
        }
        format!(
            "Here is the summary of the conversation so far.\n{current_summary}\n\
             Below are the most recent posts. Merge them into the summary, \
             organizing the key points and conclusions.\n\n{conversation_text}\
             Here is the thread title. Organize the summary around it: {title}\n\
             [summary]:"
        )
    }

    /// Regenerate the summary: one LLM call, trimmed result.
    #[tracing::instrument(
        name = "regenerate_summary",
        skip(client, current_summary, recent),
        fields(model = %model, post_count = recent.len())
    )]
    pub async fn regenerate(
        client: &BoxChatClient,
        model: &str,
        title: &str,
        current_summary: &str,
        recent: &[Post],
    ) -> Result<String, LlmError> {
        let request = ChatRequest::with_system(
            model,
            SUMMARIZER_SYSTEM_PROMPT,
            Self::build_merge_prompt(current_summary, title, recent),
        );
        let response = client.complete(&request).await?;
        Ok(response.trim().to_string())
    }
}

/// Counts committed posts since the last automatic summarization.
#[derive(Default)]
pub struct SummaryTrigger {
    count: Mutex<u32>,
}

impl SummaryTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one committed post. Returns `true` when the interval has been
    /// reached, resetting the counter; the caller then regenerates.
    pub fn on_post_committed(&self, interval: u32) -> bool {
        let mut count = self.count.lock().unwrap();
        *count += 1;
        if *count >= interval.max(1) {
            *count = 0;
            true
        } else {
            false
        }
    }

    /// Posts counted since the last automatic summarization.
    pub fn pending(&self) -> u32 {
        *self.count.lock().unwrap()
    }
}
