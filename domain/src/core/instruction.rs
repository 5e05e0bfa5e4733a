//! System instruction value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Personality prompt used when no instruction is configured.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a friendly and informative AI assistant. \
Your goal is to have a helpful, multi-turn conversation with the user, \
and always maintain a positive and curious tone.";

/// Fixed behavior prompt a session is bound to (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SystemInstruction {
    text: String,
}

impl SystemInstruction {
    pub fn try_new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyInstruction);
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for SystemInstruction {
    fn default() -> Self {
        Self {
            text: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }
}

impl TryFrom<String> for SystemInstruction {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<SystemInstruction> for String {
    fn from(value: SystemInstruction) -> Self {
        value.text
    }
}

impl std::fmt::Display for SystemInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_instruction() {
        let instruction = SystemInstruction::default();
        assert!(instruction.text().starts_with("You are a friendly"));
    }

    #[test]
    fn test_blank_instruction_rejected() {
        assert_eq!(
            SystemInstruction::try_new("   "),
            Err(DomainError::EmptyInstruction)
        );
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let result: Result<SystemInstruction, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());

        let ok: SystemInstruction = serde_json::from_str("\"Be terse.\"").unwrap();
        assert_eq!(ok.text(), "Be terse.");
    }
}
