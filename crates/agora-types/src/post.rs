//! Timeline post domain types for Agora.
//!
//! Defines the `Post` record appended to the shared numbered timeline, and
//! the `ConversationSnapshot` shape used by full-snapshot persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A single entry in the conversation timeline.
///
/// Sequence numbers are assigned by the conversation store and are strictly
/// increasing for the lifetime of the log; trimming old entries never
/// renumbers the survivors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Sequence number, >= 1. Assigned at append time.
    pub seq: u64,
    /// Display name of the poster (agent persona or human user).
    pub author: String,
    /// Participant this post replies to, extracted from an `@name` mention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Post body, already cleaned of mention markup.
    pub text: String,
    /// When the post was committed to the timeline.
    pub posted_at: DateTime<Utc>,
}

impl Post {
    /// Construct a post, enforcing the boundary invariants: sequence number
    /// >= 1, non-empty author, non-empty text.
    pub fn new(
        seq: u64,
        author: impl Into<String>,
        reply_to: Option<String>,
        text: impl Into<String>,
        posted_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let author = author.into();
        let text = text.into();
        if seq == 0 {
            return Err(ValidationError::InvalidSequence);
        }
        if author.trim().is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(Self {
            seq,
            author,
            reply_to,
            text,
            posted_at,
        })
    }
}

/// Full-snapshot persistence shape: the entire timeline in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    /// All retained posts, oldest first.
    pub messages: Vec<Post>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(seq: u64, reply_to: Option<&str>) -> Post {
        Post::new(
            seq,
            "alice",
            reply_to.map(String::from),
            "hello there",
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_post_json_roundtrip() {
        let msg = post(3, Some("bob"));
        let json_str = serde_json::to_string(&msg).unwrap();

        assert!(json_str.contains("\"seq\":3"));
        assert!(json_str.contains("\"reply_to\":\"bob\""));

        let parsed: Post = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_reply_to_omitted_when_none() {
        let msg = post(1, None);
        let json_str = serde_json::to_string(&msg).unwrap();
        assert!(!json_str.contains("reply_to"));

        let parsed: Post = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.reply_to.is_none());
    }

    #[test]
    fn test_rejects_zero_sequence() {
        let err = Post::new(0, "alice", None, "hi", Utc::now()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSequence));
    }

    #[test]
    fn test_rejects_blank_author_and_text() {
        assert!(matches!(
            Post::new(1, "  ", None, "hi", Utc::now()),
            Err(ValidationError::EmptyAuthor)
        ));
        assert!(matches!(
            Post::new(1, "alice", None, "\n", Utc::now()),
            Err(ValidationError::EmptyText)
        ));
    }

    #[test]
    fn test_conversation_snapshot_roundtrip() {
        let snapshot = ConversationSnapshot {
            messages: vec![post(1, None), post(2, Some("alice"))],
        };
        let json_str = serde_json::to_string(&snapshot).unwrap();
        let parsed: ConversationSnapshot = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.messages.len(), 2);
        assert_eq!(parsed.messages[1].seq, 2);
    }
}
