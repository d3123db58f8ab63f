//! BoxChatClient -- object-safe dynamic dispatch wrapper for ChatClient.
//!
//! 1. Define an object-safe `ChatClientDyn` trait with boxed futures
//! 2. Blanket-impl `ChatClientDyn` for all `T: ChatClient`
//! 3. `BoxChatClient` wraps `Box<dyn ChatClientDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use agora_types::error::LlmError;
use agora_types::llm::ChatRequest;

use super::client::ChatClient;

/// Object-safe version of [`ChatClient`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch (`dyn ChatClientDyn`).
/// A blanket implementation is provided for all types implementing
/// `ChatClient`.
pub trait ChatClientDyn: Send + Sync {
    fn name(&self) -> &str;

    fn complete_boxed<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>>;
}

/// Blanket implementation: any `ChatClient` automatically implements
/// `ChatClientDyn`.
impl<T: ChatClient> ChatClientDyn for T {
    fn name(&self) -> &str {
        ChatClient::name(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>> {
        Box::pin(self.complete(request))
    }
}

/// Type-erased chat client for runtime backend selection.
///
/// Since `ChatClient` uses RPITIT it cannot be used as a trait object
/// directly; `BoxChatClient` provides equivalent methods that delegate to
/// the inner `ChatClientDyn` trait object.
pub struct BoxChatClient {
    inner: Box<dyn ChatClientDyn + Send + Sync>,
}

impl BoxChatClient {
    /// Wrap a concrete `ChatClient` in a type-erased box.
    pub fn new<T: ChatClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }

    /// Backend name of the wrapped client.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Send a completion request and return the response text.
    pub async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.inner.complete_boxed(request).await
    }
}

impl std::fmt::Debug for BoxChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxChatClient")
            .field("name", &self.inner.name())
            .finish()
    }
}
