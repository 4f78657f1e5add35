//! Inflation configuration.
//!
//! Hosts usually ship this alongside their resource table, so it deserializes
//! straight from JSON. Every field has a default.

use serde::Deserialize;

use crate::error::Result;

/// What to do with an attribute no parser in the type chain recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownAttributePolicy {
    Ignore,
    #[default]
    Log,
    Error,
}

/// Screen density used to turn dp/sp into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayMetrics {
    pub density: f32,
    pub scaled_density: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            density: 1.0,
            scaled_density: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InflateConfig {
    pub unknown_attribute: UnknownAttributePolicy,
    pub display: DisplayMetrics,
}

impl InflateConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_unknown_attribute(mut self, policy: UnknownAttributePolicy) -> Self {
        self.unknown_attribute = policy;
        self
    }

    pub fn with_display(mut self, display: DisplayMetrics) -> Self {
        self.display = display;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InflateConfig::default();
        assert_eq!(config.unknown_attribute, UnknownAttributePolicy::Log);
        assert_eq!(config.display.density, 1.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            InflateConfig::from_json_str(r#"{"unknown_attribute": "error", "display": {"density": 2.5}}"#)
                .unwrap();
        assert_eq!(config.unknown_attribute, UnknownAttributePolicy::Error);
        assert_eq!(config.display.density, 2.5);
        assert_eq!(config.display.scaled_density, 1.0);
    }

    #[test]
    fn test_from_json_rejects_unknown_policy() {
        assert!(InflateConfig::from_json_str(r#"{"unknown_attribute": "shout"}"#).is_err());
    }
}
