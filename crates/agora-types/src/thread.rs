//! Thread-level session state: title, roster, and running summary.

use serde::{Deserialize, Serialize};

use crate::agent::AgentPersona;

/// Title shown when the thread has not been named yet.
pub const DEFAULT_TITLE: &str = "unset";

/// Exportable snapshot of the thread's session-level configuration.
///
/// This is the copy-and-paste import/export shape: importing one fully
/// replaces title, roster, and summary. Unknown fields in an imported
/// document are ignored so older exports keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSnapshot {
    /// Thread title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Registered agent personas, in roster order.
    #[serde(default)]
    pub agents: Vec<AgentPersona>,
    /// Running LLM-generated digest of the discussion.
    #[serde(default)]
    pub summary: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for ThreadSnapshot {
    fn default() -> Self {
        Self {
            title: default_title(),
            agents: Vec::new(),
            summary: String::new(),
        }
    }
}
