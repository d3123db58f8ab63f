//! Engine configuration loaded from `config.toml`.
//!
//! Every field has a serde default so a partial file works, and unknown
//! fields are ignored so newer configs load on older builds. The engine
//! reads one immutable snapshot of this per scheduling turn; hot reload is
//! the config store's concern.

use serde::{Deserialize, Serialize};

/// Posting rules appended verbatim to every turn prompt. This is where the
/// output-formatting constraints live (no leading post numbers, no `name:`
/// prefixes); the engine does not enforce them beyond mention extraction.
pub const DEFAULT_PROMPT_INSTRUCTIONS: &str = "Follow these rules when posting:\n\
- Keep it short and conversational, like a chat room.\n\
- To reply to someone, write @their-name in the body (one reply target only).\n\
- Do not start a line with a post number or a \"name:\" prefix.\n\
- Do not write lines that begin with digits or colons.\n\
The system adds post numbers.";

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// LLM endpoint settings.
    #[serde(default)]
    pub chat: ChatConfig,
    /// Timeline sizing and summarization cadence.
    #[serde(default)]
    pub conversation: ConversationLimits,
    /// Global posting rules appended to every turn prompt.
    #[serde(default = "default_prompt_instructions")]
    pub prompt_instructions: String,
}

/// LLM endpoint settings. Defaults target a local Ollama instance through
/// its OpenAI-compatible API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Model identifier sent with every completion request.
    #[serde(default = "default_model")]
    pub model: String,
    /// System prompt for agent turns.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Base URL of the OpenAI-compatible endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key; local endpoints accept a placeholder.
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Per-call timeout in seconds. A timed-out call is a failed turn.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Timeline sizing and summarization cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationLimits {
    /// How many recent posts go into each turn prompt.
    #[serde(default = "default_context_window")]
    pub context_window: usize,
    /// Maximum retained timeline length; older posts are trimmed.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Maximum posts returned by the display view.
    #[serde(default = "default_max_display")]
    pub max_display: usize,
    /// Posts between automatic summary regenerations.
    #[serde(default = "default_summary_interval")]
    pub summary_interval: u32,
}

fn default_model() -> String {
    "gemma2".to_string()
}

fn default_system_prompt() -> String {
    "You are a conversation agent.".to_string()
}

fn default_base_url() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_api_key() -> String {
    "ollama".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_context_window() -> usize {
    10
}

fn default_max_length() -> usize {
    100
}

fn default_max_display() -> usize {
    50
}

fn default_summary_interval() -> u32 {
    10
}

fn default_prompt_instructions() -> String {
    DEFAULT_PROMPT_INSTRUCTIONS.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chat: ChatConfig::default(),
            conversation: ConversationLimits::default(),
            prompt_instructions: default_prompt_instructions(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            system_prompt: default_system_prompt(),
            base_url: default_base_url(),
            api_key: default_api_key(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ConversationLimits {
    fn default() -> Self {
        Self {
            context_window: default_context_window(),
            max_length: default_max_length(),
            max_display: default_max_display(),
            summary_interval: default_summary_interval(),
        }
    }
}

impl ConversationLimits {
    /// Clamp limits to their documented floors (`max_length`, `max_display`
    /// and `summary_interval` are all >= 1). A zero `context_window` is
    /// legal and means "no history in the prompt".
    pub fn normalized(mut self) -> Self {
        self.max_length = self.max_length.max(1);
        self.max_display = self.max_display.max(1);
        self.summary_interval = self.summary_interval.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.chat.model, "gemma2");
        assert_eq!(config.chat.base_url, "http://localhost:11434/v1");
        assert_eq!(config.chat.timeout_secs, 60);
        assert_eq!(config.conversation.context_window, 10);
        assert_eq!(config.conversation.max_length, 100);
        assert_eq!(config.conversation.max_display, 50);
        assert_eq!(config.conversation.summary_interval, 10);
        assert_eq!(config.prompt_instructions, DEFAULT_PROMPT_INSTRUCTIONS);
    }

    #[test]
    fn test_empty_toml_matches_compiled_in_defaults() {
        // The fallback-on-missing-file path uses Default, the
        // fallback-on-empty-file path uses serde defaults; they must agree.
        let parsed: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, EngineConfig::default());
        assert!(!parsed.prompt_instructions.is_empty());
    }

    #[test]
    fn test_partial_toml_falls_back_per_field() {
        let config: EngineConfig = toml::from_str(
            r#"
[chat]
model = "qwen3"

[conversation]
max_length = 200
"#,
        )
        .unwrap();
        assert_eq!(config.chat.model, "qwen3");
        // Untouched fields keep their defaults
        assert_eq!(config.chat.api_key, "ollama");
        assert_eq!(config.conversation.max_length, 200);
        assert_eq!(config.conversation.summary_interval, 10);
    }

    #[test]
    fn test_unknown_fields_tolerated() {
        let config: EngineConfig = toml::from_str(
            r#"
future_knob = true

[chat]
model = "gemma2"
organization = "acme"
"#,
        )
        .unwrap();
        assert_eq!(config.chat.model, "gemma2");
    }

    #[test]
    fn test_normalized_enforces_floors() {
        let limits = ConversationLimits {
            context_window: 0,
            max_length: 0,
            max_display: 0,
            summary_interval: 0,
        }
        .normalized();
        assert_eq!(limits.context_window, 0);
        assert_eq!(limits.max_length, 1);
        assert_eq!(limits.max_display, 1);
        assert_eq!(limits.summary_interval, 1);
    }
}
