//! Credential sources
//!
//! Implementations of the [`CredentialSource`] port, in lookup order:
//! a TOML secrets file, then the process environment.
//!
//! [`CredentialSource`]: parley_application::CredentialSource

mod env;
mod secrets_file;

pub use env::EnvCredentialSource;
pub use secrets_file::SecretsFileSource;
