//! OpenAI-compatible LLM client.
//!
//! One client serves OpenAI, Ollama and any other endpoint speaking the
//! OpenAI chat completions protocol, via configurable base URLs. Uses
//! [`async_openai`] for type-safe request/response handling.

pub mod config;
pub mod sanitize;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};

use agora_core::llm::ChatClient;
use agora_types::config::ChatConfig;
use agora_types::error::LlmError;
use agora_types::llm::ChatRequest;

use self::config::OpenAiCompatConfig;
use self::sanitize::strip_markup_blocks;

/// Client for any OpenAI-compatible chat completions endpoint.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatibleClient {
    client: Client<OpenAIConfig>,
    endpoint_name: String,
}

impl OpenAiCompatibleClient {
    /// Create a client from an endpoint configuration.
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            endpoint_name: config.endpoint_name,
        }
    }

    /// Create a client for a local Ollama instance.
    pub fn ollama() -> Self {
        Self::new(config::ollama_defaults())
    }

    /// Create an OpenAI client.
    pub fn openai(api_key: &str) -> Self {
        Self::new(config::openai_defaults(api_key))
    }

    /// Create a client straight from the engine's `[chat]` configuration.
    pub fn from_chat_config(chat: &ChatConfig) -> Self {
        Self::new(OpenAiCompatConfig {
            endpoint_name: "chat".into(),
            base_url: chat.base_url.clone(),
            api_key: chat.api_key.clone(),
        })
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic
    /// [`ChatRequest`].
    fn build_request(&self, request: &ChatRequest) -> CreateChatCompletionRequest {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(ref system) = request.system {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(system.clone()),
                    name: None,
                },
            ));
        }
        messages.push(ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(request.user.clone()),
                name: None,
            },
        ));

        CreateChatCompletionRequest {
            model: request.model.clone(),
            messages,
            ..Default::default()
        }
    }
}

impl ChatClient for OpenAiCompatibleClient {
    fn name(&self) -> &str {
        &self.endpoint_name
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| LlmError::InvalidResponse("response carried no choices".to_string()))?;

        Ok(strip_markup_blocks(&content))
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                LlmError::AuthenticationFailed
            } else {
                LlmError::Provider(err.to_string())
            }
        }
        OpenAIError::Reqwest(reqwest_err) => {
            if reqwest_err.status().is_some_and(|s| s.as_u16() == 401) {
                LlmError::AuthenticationFailed
            } else {
                LlmError::Provider(err.to_string())
            }
        }
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::InvalidResponse(format!("failed to parse response: {content}"))
        }
        _ => LlmError::Provider(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_factory() {
        let client = OpenAiCompatibleClient::ollama();
        assert_eq!(client.name(), "ollama");
    }

    #[test]
    fn test_from_chat_config_uses_configured_endpoint() {
        let chat = ChatConfig {
            base_url: "http://localhost:8080/v1".to_string(),
            api_key: "test-key".to_string(),
            ..ChatConfig::default()
        };
        let client = OpenAiCompatibleClient::from_chat_config(&chat);
        assert_eq!(client.name(), "chat");
    }

    #[test]
    fn test_build_request_with_system() {
        let client = OpenAiCompatibleClient::ollama();
        let request = ChatRequest::with_system("gemma2", "be brief", "hello");

        let oai_req = client.build_request(&request);
        assert_eq!(oai_req.model, "gemma2");
        assert_eq!(oai_req.messages.len(), 2);
        assert!(matches!(
            oai_req.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            oai_req.messages[1],
            ChatCompletionRequestMessage::User(_)
        ));
    }

    #[test]
    fn test_build_request_without_system() {
        let client = OpenAiCompatibleClient::ollama();
        let request = ChatRequest {
            model: "gemma2".to_string(),
            system: None,
            user: "hello".to_string(),
        };

        let oai_req = client.build_request(&request);
        assert_eq!(oai_req.messages.len(), 1);
        assert!(matches!(
            oai_req.messages[0],
            ChatCompletionRequestMessage::User(_)
        ));
    }

    #[test]
    fn test_map_openai_error_api_auth() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Incorrect API key provided".to_string(),
            r#type: Some("authentication_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[test]
    fn test_map_openai_error_other_api_error_is_provider() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "model not found".to_string(),
            r#type: Some("invalid_request_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, LlmError::Provider(_)));
    }
}
