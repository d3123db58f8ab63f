//! Infrastructure implementations for Agora.
//!
//! Everything here implements a port defined in `agora-core`: file-backed
//! conversation storage, the TOML configuration loader with hot reload,
//! and the OpenAI-compatible LLM client.

pub mod config;
pub mod llm;
pub mod storage;
