//! Process environment

use parley_application::{CredentialLookupError, CredentialSource};
use std::env::VarError;

/// Credential source reading environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentialSource;

impl EnvCredentialSource {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialSource for EnvCredentialSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn lookup(&self, key: &str) -> Result<Option<String>, CredentialLookupError> {
        match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(CredentialLookupError::Unreadable {
                source_name: self.name().to_string(),
                reason: format!("{key} is not valid unicode"),
            }),
        }
    }
}
