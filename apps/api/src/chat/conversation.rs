#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum accepted user message length, in characters.
pub const MAX_MESSAGE_LEN: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Wire name expected by the model provider's messages array.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A turn as submitted by the widget. Role and content may be absent or
/// blank on the wire; `format_history` drops such turns instead of storing
/// them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingTurn {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A validated turn in the conversation. History is append-only; the turn
/// sequence is replayed to the model as conversational context.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }
}

impl From<ConversationTurn> for IncomingTurn {
    fn from(turn: ConversationTurn) -> Self {
        Self {
            role: Some(turn.role),
            content: Some(turn.content),
            timestamp: turn.timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Message cannot be empty")]
    Empty,

    #[error("Message is too long (max 1000 characters)")]
    TooLong,

    #[error("Message cannot be only whitespace")]
    WhitespaceOnly,
}

/// Checks a user message before it is sent anywhere. Returns the first
/// violated rule only; rules are checked in a fixed order.
pub fn validate_message(text: &str) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    if text.chars().count() > MAX_MESSAGE_LEN {
        return Err(ValidationError::TooLong);
    }
    if text.trim().is_empty() {
        return Err(ValidationError::WhitespaceOnly);
    }
    Ok(())
}

/// Drops turns with a missing role or empty/whitespace-only content,
/// preserving the relative order of the rest. Idempotent: re-formatting an
/// already clean history is a no-op.
pub fn format_history(turns: &[IncomingTurn]) -> Vec<ConversationTurn> {
    turns
        .iter()
        .filter_map(|turn| {
            let role = turn.role?;
            let content = turn.content.as_ref()?;
            if content.trim().is_empty() {
                return None;
            }
            Some(ConversationTurn {
                role,
                content: content.clone(),
                timestamp: turn.timestamp,
            })
        })
        .collect()
}

/// Pure append: the input history is never mutated, so callers can treat a
/// history slice as a consistent snapshot while a request is in flight.
pub fn append_turn(history: &[ConversationTurn], turn: ConversationTurn) -> Vec<ConversationTurn> {
    let mut next = history.to_vec();
    next.push(turn);
    next
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversationSummary {
    pub user_messages: usize,
    pub assistant_messages: usize,
}

pub fn summarize_conversation(turns: &[ConversationTurn]) -> ConversationSummary {
    ConversationSummary {
        user_messages: turns.iter().filter(|t| t.role == Role::User).count(),
        assistant_messages: turns.iter().filter(|t| t.role == Role::Assistant).count(),
    }
}

/// The widget's opening bubble. `visitor_name` personalizes the salutation
/// when the caller knows it.
pub fn greeting_message(visitor_name: Option<&str>) -> String {
    let salutation = match visitor_name {
        Some(name) => format!("Hi {name}!"),
        None => "Hi!".to_string(),
    };
    format!(
        "{salutation} I'm the AI resume assistant for this portfolio. I can help you learn about:\n\n\
         - Professional experience and roles\n\
         - Technical skills and expertise\n\
         - Education and certifications\n\
         - Featured projects\n\
         - Languages and achievements\n\n\
         Feel free to ask me anything about the background, skills, or projects!"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: Option<Role>, content: Option<&str>) -> IncomingTurn {
        IncomingTurn {
            role,
            content: content.map(str::to_string),
            timestamp: None,
        }
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert_eq!(validate_message(""), Err(ValidationError::Empty));
    }

    #[test]
    fn test_validate_rejects_whitespace_only() {
        assert_eq!(validate_message("   "), Err(ValidationError::WhitespaceOnly));
    }

    #[test]
    fn test_validate_rejects_too_long() {
        assert_eq!(
            validate_message(&"x".repeat(MAX_MESSAGE_LEN + 1)),
            Err(ValidationError::TooLong)
        );
    }

    #[test]
    fn test_validate_accepts_max_length() {
        assert_eq!(validate_message(&"x".repeat(MAX_MESSAGE_LEN)), Ok(()));
    }

    #[test]
    fn test_validate_accepts_normal_message() {
        assert_eq!(validate_message("hello"), Ok(()));
    }

    #[test]
    fn test_validate_reports_first_violated_rule() {
        // Over-long whitespace trips the length rule before the whitespace rule.
        assert_eq!(
            validate_message(&" ".repeat(MAX_MESSAGE_LEN + 1)),
            Err(ValidationError::TooLong)
        );
    }

    #[test]
    fn test_format_history_drops_malformed_turns() {
        let turns = vec![
            turn(Some(Role::User), Some("What do you do?")),
            turn(None, Some("orphan content")),
            turn(Some(Role::Assistant), None),
            turn(Some(Role::Assistant), Some("   ")),
            turn(Some(Role::Assistant), Some("I build APIs.")),
        ];
        let history = format_history(&turns);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "What do you do?");
        assert_eq!(history[1].content, "I build APIs.");
    }

    #[test]
    fn test_format_history_preserves_order() {
        let turns: Vec<IncomingTurn> = (0..5)
            .map(|i| turn(Some(Role::User), Some(&format!("message {i}"))))
            .collect();
        let history = format_history(&turns);
        let contents: Vec<&str> = history.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(
            contents,
            ["message 0", "message 1", "message 2", "message 3", "message 4"]
        );
    }

    #[test]
    fn test_format_history_is_idempotent() {
        let turns = vec![
            turn(Some(Role::User), Some("hello")),
            turn(None, Some("dropped")),
            turn(Some(Role::Assistant), Some("hi there")),
        ];
        let once = format_history(&turns);
        let again: Vec<IncomingTurn> = once.iter().cloned().map(IncomingTurn::from).collect();
        let twice = format_history(&again);
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.role, b.role);
            assert_eq!(a.content, b.content);
            assert_eq!(a.timestamp, b.timestamp);
        }
    }

    #[test]
    fn test_append_preserves_prior_order_and_places_new_turn_last() {
        let raw = vec![
            turn(Some(Role::User), Some("first")),
            turn(Some(Role::Assistant), Some("second")),
        ];
        let history = format_history(&raw);
        let appended = append_turn(&history, ConversationTurn::user("third"));
        assert_eq!(appended.len(), 3);
        assert_eq!(appended[0].content, "first");
        assert_eq!(appended[1].content, "second");
        assert_eq!(appended[2].content, "third");
        assert_eq!(appended[2].role, Role::User);
        // Input snapshot untouched.
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_summarize_counts_roles() {
        let history = vec![
            ConversationTurn::user("q1"),
            ConversationTurn::assistant("a1"),
            ConversationTurn::user("q2"),
        ];
        let summary = summarize_conversation(&history);
        assert_eq!(summary.user_messages, 2);
        assert_eq!(summary.assistant_messages, 1);
    }

    #[test]
    fn test_greeting_personalizes_when_name_known() {
        assert!(greeting_message(Some("Ada")).starts_with("Hi Ada!"));
        assert!(greeting_message(None).starts_with("Hi!"));
    }

    #[test]
    fn test_incoming_turn_deserializes_wire_shape() {
        let turn: IncomingTurn =
            serde_json::from_str(r#"{"role": "user", "content": "hello"}"#).unwrap();
        assert_eq!(turn.role, Some(Role::User));
        assert_eq!(turn.content.as_deref(), Some("hello"));
        assert!(turn.timestamp.is_none());
    }
}
