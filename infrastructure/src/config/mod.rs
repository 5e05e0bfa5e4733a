//! Configuration file loading for parley
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PARLEY_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./parley.toml` or `./.parley.toml`
//! 4. Global: `$XDG_CONFIG_HOME/parley/config.toml`
//! 5. Default values
//!
//! CLI flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_HOST, DEFAULT_PORT, FileChatConfig, FileConfig,
    FileGeminiConfig, FileLoggingConfig, FileSecretsConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
