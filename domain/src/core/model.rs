//! Model value object representing a hosted chat model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Gemini chat models (Value Object)
///
/// A session is bound to exactly one model for its whole lifetime.
/// Unknown identifiers are carried verbatim in [`Model::Custom`] so that
/// newly released models can be used without a code change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gemini25Flash,
    Gemini25FlashLite,
    Gemini25Pro,
    Gemini20Flash,
    Custom(String),
}

impl Model {
    /// Get the string identifier used in API paths
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25FlashLite => "gemini-2.5-flash-lite",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Custom(s) => s,
        }
    }
}

impl Default for Model {
    /// Returns the default model (Gemini 2.5 Flash)
    fn default() -> Self {
        Model::Gemini25Flash
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // The API also accepts the fully qualified "models/<id>" form
        let id = s.trim().trim_start_matches("models/");
        Ok(match id {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.0-flash" => Model::Gemini20Flash,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // Infallible
        Ok(s.parse().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_flash() {
        assert_eq!(Model::default().as_str(), "gemini-2.5-flash");
    }

    #[test]
    fn test_parse_known_and_custom() {
        assert_eq!("gemini-2.5-pro".parse::<Model>().unwrap(), Model::Gemini25Pro);
        assert_eq!(
            "models/gemini-2.0-flash".parse::<Model>().unwrap(),
            Model::Gemini20Flash
        );

        let custom: Model = "gemini-exp-1206".parse().unwrap();
        assert_eq!(custom, Model::Custom("gemini-exp-1206".into()));
        assert_eq!(custom.to_string(), "gemini-exp-1206");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Model::Gemini25FlashLite).unwrap();
        assert_eq!(json, "\"gemini-2.5-flash-lite\"");

        let model: Model = serde_json::from_str("\"gemini-2.5-flash\"").unwrap();
        assert_eq!(model, Model::Gemini25Flash);
    }
}
