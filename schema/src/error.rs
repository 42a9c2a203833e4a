use stackform_core::Range;
use thiserror::Error;

/// Schema synthesis failures.
///
/// These are never user errors: every template that reaches synthesis has
/// already been bound and checked with [`check_component`](crate::check_component).
/// Seeing one means a declaration was built or modified without going
/// through those stages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    /// A configuration default is not a string, number, or boolean literal.
    #[error(
        "default value for configuration '{key}' is {kind}, not a literal{}",
        .range.as_ref().map(|r| format!(" ({r})")).unwrap_or_default()
    )]
    InvalidDefaultExpression {
        key: String,
        kind: &'static str,
        range: Option<Range>,
    },
}

pub type Result<T> = std::result::Result<T, SynthesisError>;
