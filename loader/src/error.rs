//! Error types for the loader.
//!
//! Problems in a template are reported as diagnostics, never as errors.
//! A [`LoaderError`] means the frontend itself could not do its job:
//! configuration text could not be parsed, or synthesis produced something
//! the validator rejects.

use stackform_core::ValidationError;
use stackform_schema::SynthesisError;
use thiserror::Error;

/// Errors that can occur while loading configuration or compiling a template.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Schema synthesis reached a declaration the checks should have rejected.
    #[error("schema synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    /// The synthesized schema failed validation.
    #[error("invalid package schema: {}", join_errors(.0))]
    InvalidSchema(Vec<ValidationError>),
}

/// Convenience alias for results with [`LoaderError`].
pub type Result<T> = std::result::Result<T, LoaderError>;

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
