//! Chat settings: what a new session is bound to.
//!
//! [`ChatSettings`] is resolved once at startup (config file, env, CLI) and
//! shared read-only by every UI session. Changing it never affects sessions
//! that already exist.

use parley_domain::{Model, SystemInstruction};

/// Model and system instruction for newly created sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSettings {
    pub model: Model,
    pub system_instruction: SystemInstruction,
}

impl ChatSettings {
    pub fn new(model: Model, system_instruction: SystemInstruction) -> Self {
        Self {
            model,
            system_instruction,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_system_instruction(mut self, instruction: SystemInstruction) -> Self {
        self.system_instruction = instruction;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_domain::DEFAULT_SYSTEM_INSTRUCTION;

    #[test]
    fn test_defaults() {
        let settings = ChatSettings::default();
        assert_eq!(settings.model, Model::Gemini25Flash);
        assert_eq!(settings.system_instruction.text(), DEFAULT_SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_builder() {
        let settings = ChatSettings::default()
            .with_model(Model::Gemini25Pro)
            .with_system_instruction(SystemInstruction::try_new("Be brief.").unwrap());
        assert_eq!(settings.model, Model::Gemini25Pro);
        assert_eq!(settings.system_instruction.text(), "Be brief.");
    }
}
