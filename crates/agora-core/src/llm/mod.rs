//! LLM client port.

pub mod boxed;
pub mod client;

pub use boxed::BoxChatClient;
pub use client::ChatClient;
