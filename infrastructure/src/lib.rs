//! Infrastructure layer for parley
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod credentials;
pub mod gemini;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileChatConfig, FileConfig, FileGeminiConfig,
    FileLoggingConfig, FileSecretsConfig, FileServerConfig,
};
pub use credentials::{EnvCredentialSource, SecretsFileSource};
pub use gemini::{
    client::{DEFAULT_BASE_URL, GeminiClient, GeminiOptions},
    error::{GeminiError, Result},
    gateway::GeminiLlmGateway,
    session::GeminiSession,
};
