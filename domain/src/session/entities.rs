//! Session domain entities

use serde::{Deserialize, Serialize};

/// Role of a turn in a conversation
///
/// The remote API labels turns with loosely typed strings (`"user"`,
/// `"model"`, ...). They are narrowed to this closed set at the API boundary
/// via [`Role::from_api_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Map an API-side role label to a role.
    ///
    /// Exactly the literal `"user"` maps to [`Role::User`]; every other
    /// label (the model's role, or anything unexpected) is an assistant turn.
    pub fn from_api_label(label: &str) -> Self {
        if label == "user" {
            Role::User
        } else {
            Role::Assistant
        }
    }

    /// Label used by the UI to pick a chat bubble.
    pub fn ui_label(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.ui_label())
    }
}

/// A single role-tagged message in the history (Entity)
///
/// Turns are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Append-only, chronological turn sequence owned by one session.
///
/// Turns are only ever added as a completed exchange (user turn followed by
/// the assistant reply), so a history built through [`History::record_exchange`]
/// always alternates user, assistant, user, assistant, ...
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed exchange.
    pub fn record_exchange(&mut self, user_text: impl Into<String>, reply: impl Into<String>) {
        self.turns.push(Turn::user(user_text));
        self.turns.push(Turn::assistant(reply));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl FromIterator<Turn> for History {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_mapping_is_total() {
        assert_eq!(Role::from_api_label("user"), Role::User);
        assert_eq!(Role::from_api_label("model"), Role::Assistant);
        assert_eq!(Role::from_api_label("assistant"), Role::Assistant);
        assert_eq!(Role::from_api_label(""), Role::Assistant);
        // Only the exact literal counts as a user turn
        assert_eq!(Role::from_api_label("User"), Role::Assistant);
    }

    #[test]
    fn test_ui_labels() {
        assert_eq!(Role::User.ui_label(), "user");
        assert_eq!(Role::Assistant.ui_label(), "assistant");
    }

    #[test]
    fn test_history_alternates() {
        let mut history = History::new();
        assert!(history.is_empty());

        history.record_exchange("Hello", "Hi there!");
        history.record_exchange("How are you?", "Great.");

        let roles: Vec<Role> = history.turns().iter().map(Turn::role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(history.turns()[1].text(), "Hi there!");
    }

    #[test]
    fn test_turn_serializes_lowercase_role() {
        let json = serde_json::to_value(Turn::assistant("ok")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "assistant", "text": "ok"}));
    }
}
