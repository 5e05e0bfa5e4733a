//! Raw TOML configuration data types
//!
//! These structs mirror the TOML config file. Every section and field has a
//! default, so a partial (or absent) file is always valid input.

use parley_application::ChatSettings;
use parley_domain::{DEFAULT_SYSTEM_INSTRUCTION, Model, SystemInstruction};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default bind address of the web UI
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default port of the web UI
pub const DEFAULT_PORT: u16 = 8501;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("chat.model cannot be empty")]
    EmptyModelName,

    #[error("chat.system_instruction cannot be empty")]
    EmptySystemInstruction,

    #[error("server.port cannot be 0")]
    InvalidPort,

    #[error("gemini.{0} cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("gemini.base_url cannot be empty")]
    EmptyBaseUrl,
}

/// `[chat]`: what every new session is created with
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Model id, e.g. "gemini-2.5-flash"
    pub model: String,
    pub system_instruction: String,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            model: Model::default().to_string(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }
}

/// `[server]`: where the web UI listens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl FileServerConfig {
    /// `host:port`, ready for a socket bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `[gemini]`: transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    pub base_url: String,
    /// Unset means no limit beyond the transport's own
    pub request_timeout_seconds: Option<u64>,
    pub connect_timeout_seconds: Option<u64>,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            base_url: crate::gemini::client::DEFAULT_BASE_URL.to_string(),
            request_timeout_seconds: None,
            connect_timeout_seconds: None,
        }
    }
}

/// `[secrets]`: where the secrets file lives
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSecretsConfig {
    /// Overrides the default search locations
    pub path: Option<PathBuf>,
}

/// `[logging]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Also write logs to this file
    pub file: Option<PathBuf>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub chat: FileChatConfig,
    pub server: FileServerConfig,
    pub gemini: FileGeminiConfig,
    pub secrets: FileSecretsConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.chat.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.chat.system_instruction.trim().is_empty() {
            return Err(ConfigValidationError::EmptySystemInstruction);
        }
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }
        if self.gemini.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if let Some(0) = self.gemini.request_timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout("request_timeout_seconds"));
        }
        if let Some(0) = self.gemini.connect_timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout("connect_timeout_seconds"));
        }
        Ok(())
    }

    /// Settings for new chat sessions
    pub fn chat_settings(&self) -> Result<ChatSettings, ConfigValidationError> {
        let instruction = SystemInstruction::try_new(self.chat.system_instruction.as_str())
            .map_err(|_| ConfigValidationError::EmptySystemInstruction)?;
        if self.chat.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        let model = self
            .chat
            .model
            .parse::<Model>()
            .unwrap_or_else(|never| match never {});

        Ok(ChatSettings::new(model, instruction))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.gemini.request_timeout_seconds.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.gemini.connect_timeout_seconds.map(Duration::from_secs)
    }
}
