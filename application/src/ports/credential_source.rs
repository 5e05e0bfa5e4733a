//! Credential source port
//!
//! A credential source is one layer of the credential lookup chain
//! (secrets file, process environment, ...).

use thiserror::Error;

/// Why a source could not answer a lookup.
///
/// A lookup error is never fatal on its own: the resolver moves on to the
/// next source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialLookupError {
    #[error("{source_name} is unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },

    #[error("{source_name} could not be read: {reason}")]
    Unreadable { source_name: String, reason: String },
}

/// One layer of credential configuration.
///
/// Lookups are synchronous and happen once at startup.
pub trait CredentialSource: Send + Sync {
    /// Human-readable name for logs (never includes the secret)
    fn name(&self) -> &str;

    /// Look up `key`. `Ok(None)` means the source works but has no entry.
    fn lookup(&self, key: &str) -> Result<Option<String>, CredentialLookupError>;
}
