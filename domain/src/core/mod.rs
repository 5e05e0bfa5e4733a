//! Core domain concepts shared across the crate.
//!
//! - [`model::Model`] - hosted Gemini chat models
//! - [`instruction::SystemInstruction`] - the fixed behavior prompt
//! - [`credential::Credential`] - the redacted API key
//! - [`message::UserMessage`] - validated user input
//! - [`error::DomainError`] - domain-level errors

pub mod credential;
pub mod error;
pub mod instruction;
pub mod message;
pub mod model;
