//! Error taxonomies shared across the Agora crates.

use thiserror::Error;

/// Boundary validation failures. The offending operation is a no-op.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("sequence number must be >= 1")]
    InvalidSequence,

    #[error("author must not be empty")]
    EmptyAuthor,

    #[error("text must not be empty")]
    EmptyText,

    #[error("agent id must be >= 1")]
    InvalidAgentId,

    #[error("agent name must not be empty")]
    EmptyAgentName,

    #[error("agent personality must not be empty")]
    EmptyPersonality,

    #[error("malformed import payload: {0}")]
    MalformedImport(String),
}

/// Errors from LLM completion calls.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider error: {0}")]
    Provider(String),

    #[error("completion timed out after {0}s")]
    Timeout(u64),

    #[error("malformed response: {0}")]
    InvalidResponse(String),

    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Errors from the durable-storage collaborators (journal and snapshot).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Engine-level error exposed to the presentation layer.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),
}
