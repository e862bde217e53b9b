//! Model value object representing a chat model

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available chat models (Value Object)
///
/// The conversation core only talks to the Gemini family; the identifiers
/// here are the wire ids used by the `generateContent` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gemini25Flash,
    Gemini25Pro,
    Gemini20Flash,
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini20Flash => "gemini-2.0-flash",
        }
    }

    /// All models the agent tester can be pointed at
    pub fn all() -> Vec<Model> {
        vec![Model::Gemini25Flash, Model::Gemini25Pro, Model::Gemini20Flash]
    }
}

impl Default for Model {
    /// Returns the default model (gemini-2.5-flash)
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
    type Err = DomainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "gemini-2.5-flash" => Ok(Model::Gemini25Flash),
            "gemini-2.5-pro" => Ok(Model::Gemini25Pro),
            "gemini-2.0-flash" => Ok(Model::Gemini20Flash),
            other => Err(DomainError::UnknownModel(other.to_string())),
        }
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
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in Model::all() {
            let parsed: Model = model.as_str().parse().unwrap();
            assert_eq!(parsed, model);
        }
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let result: Result<Model, _> = "gpt-4".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_default_model() {
        assert_eq!(Model::default().as_str(), "gemini-2.5-flash");
    }
}
