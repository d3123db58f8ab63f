//! Agent persona domain types.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An autonomous persona driven by periodic LLM calls.
///
/// Name uniqueness is deliberately not enforced: two personas with the same
/// name are a valid (if confusing) roster state, and reply-target extraction
/// works on names, not ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentPersona {
    /// Roster id, >= 1, unique within the thread.
    pub id: u64,
    /// Display name used as the post author and as a mention target.
    pub name: String,
    /// Free-form personality description injected into the turn prompt.
    pub personality: String,
}

impl AgentPersona {
    /// Construct a persona, enforcing non-empty name and personality.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        personality: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let personality = personality.into();
        if id == 0 {
            return Err(ValidationError::InvalidAgentId);
        }
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyAgentName);
        }
        if personality.trim().is_empty() {
            return Err(ValidationError::EmptyPersonality);
        }
        Ok(Self {
            id,
            name,
            personality,
        })
    }
}
