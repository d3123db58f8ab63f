//! LLM request types for Agora.
//!
//! The engine needs exactly one capability from a language model: a blocking
//! completion of a system prompt plus one user prompt. Streaming, tool use
//! and token accounting are out of scope.

use serde::{Deserialize, Serialize};

/// A single completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier (e.g. "gemma2", "gpt-4o-mini").
    pub model: String,
    /// Optional system prompt; omitted entirely when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// The user-role prompt carrying the assembled turn context.
    pub user: String,
}

impl ChatRequest {
    /// Build a request with a system prompt.
    pub fn with_system(
        model: impl Into<String>,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system: Some(system.into()),
            user: user.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_omitted_when_none() {
        let req = ChatRequest {
            model: "gemma2".to_string(),
            system: None,
            user: "hello".to_string(),
        };
        let json_str = serde_json::to_string(&req).unwrap();
        assert!(!json_str.contains("system"));
    }

    #[test]
    fn test_with_system() {
        let req = ChatRequest::with_system("gemma2", "be brief", "hello");
        assert_eq!(req.system.as_deref(), Some("be brief"));
        assert_eq!(req.user, "hello");
    }
}
