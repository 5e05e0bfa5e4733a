//! User message value object

use serde::{Deserialize, Serialize};

/// A validated piece of user input (Value Object)
///
/// Blank submissions never reach a session: the UI treats them as
/// "no new input".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    content: String,
}

impl UserMessage {
    /// Try to create a new message, returning None if blank
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the message content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for UserMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_blank() {
        assert!(UserMessage::try_new("").is_none());
        assert!(UserMessage::try_new(" \n ").is_none());
    }

    #[test]
    fn test_content_is_kept_verbatim() {
        let msg = UserMessage::try_new("  Hello  ").unwrap();
        assert_eq!(msg.content(), "  Hello  ");
        assert_eq!(msg.into_content(), "  Hello  ");
    }
}
