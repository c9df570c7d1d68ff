//! Language tag attached to a room.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

const MAX_LANGUAGE_LEN: usize = 32;

/// Informational language tag of a room's buffer (`python`, `javascript`, ...).
///
/// The realtime core never inspects it; autocomplete picks its rule set by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Tag used when a room is created without one.
    pub const DEFAULT: &'static str = "python";

    /// Creates a language tag, normalized to trimmed lowercase.
    pub fn new(tag: impl AsRef<str>) -> Result<Self, ValidationError> {
        let tag = tag.as_ref().trim().to_ascii_lowercase();
        if tag.is_empty() {
            return Err(ValidationError::empty_field("language"));
        }
        if tag.len() > MAX_LANGUAGE_LEN {
            return Err(ValidationError::invalid_format(
                "language",
                format!("longer than {} characters", MAX_LANGUAGE_LEN),
            ));
        }
        Ok(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Language::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_python() {
        assert_eq!(Language::default().as_str(), "python");
    }

    #[test]
    fn new_normalizes_case_and_whitespace() {
        let lang = Language::new("  TypeScript ").unwrap();
        assert_eq!(lang.as_str(), "typescript");
    }

    #[test]
    fn new_rejects_blank() {
        assert!(matches!(
            Language::new("   "),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn new_rejects_overlong_tag() {
        assert!(Language::new("x".repeat(MAX_LANGUAGE_LEN + 1)).is_err());
    }

    #[test]
    fn deserialize_validates() {
        let lang: Language = serde_json::from_str(r#""Java""#).unwrap();
        assert_eq!(lang.as_str(), "java");
        assert!(serde_json::from_str::<Language>(r#""""#).is_err());
    }
}
