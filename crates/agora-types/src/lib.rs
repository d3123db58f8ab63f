//! Shared domain types for Agora.
//!
//! This crate contains the core domain types used across the Agora
//! conversation engine: Post, AgentPersona, ThreadSnapshot, EngineConfig,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod post;
pub mod thread;
