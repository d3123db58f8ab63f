//! Conversation orchestration engine for Agora.
//!
//! This crate defines the "ports" (storage and LLM traits) that the
//! infrastructure layer implements, and the engine built on top of them:
//! the conversation store, the thread registry, the turn scheduler, the
//! context builder, mention extraction, and the summarizer. It depends
//! only on `agora-types` -- never on `agora-infra` or any IO crate.

pub mod agent;
pub mod config;
pub mod conversation;
pub mod engine;
pub mod llm;
pub mod thread;

#[cfg(test)]
pub(crate) mod test_support;
