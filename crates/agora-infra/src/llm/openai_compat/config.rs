//! Configuration and per-endpoint defaults for the OpenAI-compatible
//! client.
//!
//! Any endpoint that speaks the OpenAI chat completions protocol works;
//! the factories below carry the base URLs for the two common cases.

/// Configuration for an [`super::OpenAiCompatibleClient`].
pub struct OpenAiCompatConfig {
    /// Human-readable endpoint name (e.g. "ollama", "openai").
    pub endpoint_name: String,
    /// Base URL for the API (e.g. "http://localhost:11434/v1").
    pub base_url: String,
    /// API key; local endpoints accept any placeholder.
    pub api_key: String,
}

/// Local Ollama defaults.
///
/// Base URL: `http://localhost:11434/v1`. Ollama ignores the API key but
/// the protocol requires one, so "ollama" is sent as a placeholder.
pub fn ollama_defaults() -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        endpoint_name: "ollama".into(),
        base_url: "http://localhost:11434/v1".into(),
        api_key: "ollama".into(),
    }
}

/// OpenAI defaults.
///
/// Base URL: `https://api.openai.com/v1`.
pub fn openai_defaults(api_key: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        endpoint_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key: api_key.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_defaults() {
        let config = ollama_defaults();
        assert_eq!(config.endpoint_name, "ollama");
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.api_key, "ollama");
    }

    #[test]
    fn test_openai_defaults() {
        let config = openai_defaults("sk-test");
        assert_eq!(config.endpoint_name, "openai");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.api_key, "sk-test");
    }
}
