//! ChatClient trait definition.
//!
//! This is the single capability the engine needs from a language model:
//! complete a (system prompt, user prompt) pair into text. Implementations
//! live in agora-infra (e.g. `OpenAiCompatibleClient`).

use agora_types::error::LlmError;
use agora_types::llm::ChatRequest;

/// Trait for LLM completion backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The caller
/// is responsible for applying a timeout around `complete` -- a turn that
/// exceeds its deadline is treated as a failed turn, never retried
/// in-place.
pub trait ChatClient: Send + Sync {
    /// Human-readable backend name (e.g. "openai_compatible").
    fn name(&self) -> &str;

    /// Send a completion request and return the response text.
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
