//! Frontend configuration.
//!
//! Controls how templates are bound and whether the synthesized schema is
//! validated. Every field has a default, so an empty document is a valid
//! configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! bind:
//!   max_suggestions: 3
//!   unknown_field_severity: error
//! validate_schema: true
//! ```

use serde::{Deserialize, Serialize};
use stackform_schema::BindOptions;

use crate::error::Result;

/// Top-level frontend configuration.
///
/// # Examples
///
/// ```
/// use stackform_core::Severity;
/// use stackform_loader::FrontendConfig;
///
/// let text = "bind:\n  unknown_field_severity: error\n";
/// let config = FrontendConfig::from_yaml_str(text).unwrap();
/// assert_eq!(config.bind.unknown_field_severity, Severity::Error);
/// assert_eq!(config.bind.max_suggestions, 5);
/// assert!(config.validate_schema);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    /// Binder settings.
    pub bind: BindOptions,
    /// Validate the synthesized package schema before returning it.
    pub validate_schema: bool,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            bind: BindOptions::default(),
            validate_schema: true,
        }
    }
}

impl FrontendConfig {
    /// Parses configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`YamlError`](crate::LoaderError::YamlError) if parsing fails.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Serializes the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
