//! Resolve Credential use case.
//!
//! Walks the configured [`CredentialSource`]s in order and returns the first
//! usable API key. Any lookup failure (missing entry, unavailable or
//! unreadable store, blank value) falls through to the next source.

use crate::ports::credential_source::CredentialSource;
use parley_domain::Credential;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Key the credential is stored under in every source.
pub const CREDENTIAL_KEY: &str = "GEMINI_API_KEY";

/// Errors that can occur while resolving the credential.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error(
        "API Key not found. Please set {key} in your environment or secrets file. (checked: {checked})"
    )]
    Missing { key: String, checked: String },
}

/// Use case resolving the API key once at startup.
pub struct ResolveCredentialUseCase {
    sources: Vec<Arc<dyn CredentialSource>>,
    key: String,
}

impl ResolveCredentialUseCase {
    /// Create a resolver that tries `sources` in order.
    pub fn new(sources: Vec<Arc<dyn CredentialSource>>) -> Self {
        Self {
            sources,
            key: CREDENTIAL_KEY.to_string(),
        }
    }

    /// Look up a different key (for testing).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Resolve the credential.
    ///
    /// Returns [`CredentialError::Missing`] when no source yields a
    /// non-blank value. There is no retry.
    pub fn execute(&self) -> Result<Credential, CredentialError> {
        for source in &self.sources {
            match source.lookup(&self.key) {
                Ok(Some(value)) => match Credential::new(value) {
                    Ok(credential) => {
                        info!("Resolved {} from {}", self.key, source.name());
                        return Ok(credential);
                    }
                    Err(_) => {
                        warn!("{} in {} is blank; ignoring it", self.key, source.name());
                    }
                },
                Ok(None) => {
                    debug!("{} not set in {}", self.key, source.name());
                }
                Err(e) => {
                    debug!("Skipping credential source: {}", e);
                }
            }
        }

        Err(CredentialError::Missing {
            key: self.key.clone(),
            checked: self
                .sources
                .iter()
                .map(|s| s.name().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}
