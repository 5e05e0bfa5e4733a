//! Credential value object

use super::error::DomainError;

/// API key authorizing calls to the remote chat service (Value Object)
///
/// The secret is only reachable through [`Credential::expose`]. `Debug` and
/// `Display` are redacted so the key can never end up in a log line by
/// accident. There is intentionally no `Serialize` implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    secret: String,
}

impl Credential {
    /// Wrap a secret, rejecting empty or whitespace-only values.
    ///
    /// Surrounding whitespace (e.g. a trailing newline from a secrets file)
    /// is stripped.
    pub fn new(secret: impl Into<String>) -> Result<Self, DomainError> {
        let secret = secret.into();
        let trimmed = secret.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyCredential);
        }
        Ok(Self {
            secret: trimmed.to_string(),
        })
    }

    /// Borrow the raw secret for use in a request header.
    pub fn expose(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<redacted>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_trims_and_exposes() {
        let cred = Credential::new("  abc123\n").unwrap();
        assert_eq!(cred.expose(), "abc123");
    }

    #[test]
    fn test_empty_credential_rejected() {
        assert_eq!(Credential::new(""), Err(DomainError::EmptyCredential));
        assert_eq!(Credential::new(" \t\n"), Err(DomainError::EmptyCredential));
    }

    #[test]
    fn test_credential_is_redacted() {
        let cred = Credential::new("super-secret").unwrap();
        assert!(!format!("{:?}", cred).contains("super-secret"));
        assert!(!cred.to_string().contains("super-secret"));
    }
}
