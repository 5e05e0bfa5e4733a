//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("System instruction cannot be empty")]
    EmptyInstruction,

    #[error("Credential cannot be empty")]
    EmptyCredential,
}
