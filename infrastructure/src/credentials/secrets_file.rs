//! TOML secrets file (`KEY = "value"` pairs)

use parley_application::{CredentialLookupError, CredentialSource};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const APP_DIR: &str = "parley";
const FILE_NAME: &str = "secrets.toml";

/// Credential source backed by a secrets file.
///
/// The file is read on every lookup; it is consulted once at startup.
#[derive(Debug, Clone)]
pub struct SecretsFileSource {
    path: Option<PathBuf>,
    name: String,
}

impl SecretsFileSource {
    /// Source reading exactly `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: format!("secrets file {}", path.display()),
            path: Some(path),
        }
    }

    /// Source for the configured path, or the first existing default:
    /// `./.parley/secrets.toml`, then `$XDG_CONFIG_HOME/parley/secrets.toml`.
    pub fn discover(configured: Option<&Path>) -> Self {
        if let Some(path) = configured {
            return Self::at(path);
        }

        let found = Self::default_paths().into_iter().find(|p| p.exists());
        match found {
            Some(path) => Self::at(path),
            None => Self {
                path: None,
                name: "secrets file".to_string(),
            },
        }
    }

    /// Default search locations, in order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(format!(".{APP_DIR}")).join(FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join(APP_DIR).join(FILE_NAME));
        }
        paths
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn unavailable(&self, reason: impl Into<String>) -> CredentialLookupError {
        CredentialLookupError::Unavailable {
            source_name: self.name.clone(),
            reason: reason.into(),
        }
    }

    fn unreadable(&self, reason: impl Into<String>) -> CredentialLookupError {
        CredentialLookupError::Unreadable {
            source_name: self.name.clone(),
            reason: reason.into(),
        }
    }
}

impl CredentialSource for SecretsFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, key: &str) -> Result<Option<String>, CredentialLookupError> {
        let Some(path) = &self.path else {
            return Err(self.unavailable("no secrets file found"));
        };

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => self.unavailable("file does not exist"),
            _ => self.unreadable(e.to_string()),
        })?;

        let table: toml::Table = content.parse().map_err(|e: toml::de::Error| {
            warn!("Ignoring malformed {}: {}", self.name, e.message());
            self.unreadable(e.message().to_string())
        })?;

        match table.get(key) {
            Some(toml::Value::String(value)) => {
                debug!("{} found in {}", key, self.name);
                Ok(Some(value.clone()))
            }
            Some(other) => {
                warn!("{} in {} is a {}, not a string", key, self.name, other.type_str());
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_string_value() {
        let dir = TempDir::new().unwrap();
        let source = SecretsFileSource::at(write(&dir, "GEMINI_API_KEY = \"abc123\"\n"));

        assert_eq!(
            source.lookup("GEMINI_API_KEY").unwrap(),
            Some("abc123".to_string())
        );
        assert_eq!(source.lookup("OTHER_KEY").unwrap(), None);
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = SecretsFileSource::at(dir.path().join("absent.toml"));

        assert!(matches!(
            source.lookup("GEMINI_API_KEY"),
            Err(CredentialLookupError::Unavailable { .. })
        ));
    }

    #[test]
    fn malformed_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let source = SecretsFileSource::at(write(&dir, "GEMINI_API_KEY = \n[[["));

        assert!(matches!(
            source.lookup("GEMINI_API_KEY"),
            Err(CredentialLookupError::Unreadable { .. })
        ));
    }

    #[test]
    fn non_string_value_is_absent() {
        let dir = TempDir::new().unwrap();
        let source = SecretsFileSource::at(write(&dir, "GEMINI_API_KEY = 42\n"));

        assert_eq!(source.lookup("GEMINI_API_KEY").unwrap(), None);
    }

    #[test]
    fn configured_path_wins_over_discovery() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "GEMINI_API_KEY = \"from-config\"\n");

        let source = SecretsFileSource::discover(Some(&path));
        assert_eq!(source.path(), Some(path.as_path()));
        assert!(source.name().contains("secrets.toml"));
    }

    #[test]
    fn default_paths_start_with_project_dir() {
        let paths = SecretsFileSource::default_paths();
        assert_eq!(paths[0], PathBuf::from(".parley/secrets.toml"));
    }
}
