//! Severity-tagged diagnostics.
//!
//! Every stage of the frontend reports user-facing problems as
//! [`Diagnostic`]s collected into a single ordered [`Diagnostics`] list. A
//! stage keeps going after a problem so the user sees everything in one
//! pass; callers check [`Diagnostics::has_errors`] at the end of a stage.
//!
//! Incremental reporting (only print what has not been printed before) is
//! tracked outside the diagnostics in a [`ShownSet`], so a collection can be
//! shared read-only across reporting passes.
//!
//! # Example
//!
//! ```
//! use stackform_core::diags::{Diagnostic, Diagnostics, ShownSet};
//!
//! let mut diags = Diagnostics::new();
//! diags.extend([
//!     Some(Diagnostic::warning(None, "unused variable 'x'", "")),
//!     None,
//!     Some(Diagnostic::error(None, "missing type", "")),
//! ]);
//! assert_eq!(diags.len(), 2);
//! assert!(diags.has_errors());
//!
//! let mut shown = ShownSet::default();
//! shown.mark_shown(&diags);
//! assert!(diags.unshown(&shown).is_empty());
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::syntax::{Node, Range};

/// Diagnostic severity. Errors order before warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A warning or error to be presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Where the problem is, when it has a location.
    pub subject: Option<Range>,
    /// Enclosing construct the subject belongs to, if known.
    pub context: Option<Range>,
    /// One-line description.
    pub summary: String,
    /// Optional elaboration; empty when there is none.
    pub detail: String,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        subject: Option<Range>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            subject,
            context: None,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Creates an error-level diagnostic.
    pub fn error(
        subject: Option<Range>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, subject, summary, detail)
    }

    /// Creates a warning-level diagnostic.
    pub fn warning(
        subject: Option<Range>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, subject, summary, detail)
    }

    /// Creates an error attached to the node's source range, if it has one.
    pub fn node_error(node: &Node, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::error(node.range().cloned(), summary, detail)
    }

    /// Returns a copy with `context` set; the receiver is left untouched.
    pub fn with_context(&self, context: Option<Range>) -> Self {
        Self {
            context,
            ..self.clone()
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(subject) = &self.subject {
            write!(f, "{subject}: ")?;
        }
        f.write_str(&self.summary)?;
        if !self.detail.is_empty() {
            write!(f, "; {}", self.detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

/// Warns that `found` is a miscapitalization of `expected`.
///
/// Returns `None` when the two are identical, so callers can write
/// `diags.extend([unexpected_casing(..)])` without checking first.
///
/// # Examples
///
/// ```
/// use stackform_core::diags::unexpected_casing;
///
/// assert!(unexpected_casing(None, "outputs", "outputs").is_none());
/// let warning = unexpected_casing(None, "outputs", "Outputs").unwrap();
/// assert_eq!(warning.summary, "'Outputs' looks like a miscapitalization of 'outputs'");
/// ```
pub fn unexpected_casing(
    subject: Option<Range>,
    expected: &str,
    found: &str,
) -> Option<Diagnostic> {
    if expected == found {
        return None;
    }
    Some(Diagnostic::warning(
        subject,
        format!("'{found}' looks like a miscapitalization of '{expected}'"),
        "A future version will enforce camelCase fields.",
    ))
}

/// An ordered list of diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diag: Diagnostic) {
        self.0.push(diag);
    }

    /// Appends every `Some` diagnostic in order and drops the `None`s.
    pub fn extend<I>(&mut self, diags: I)
    where
        I: IntoIterator<Item = Option<Diagnostic>>,
    {
        self.0.extend(diags.into_iter().flatten());
    }

    /// Appends all diagnostics from another collection.
    pub fn append(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }

    /// Returns true if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    /// Reorders the collection in place: errors first, original order kept
    /// within each severity.
    pub fn sort_by_severity(&mut self) {
        self.0.sort_by_key(|d| d.severity);
    }

    /// Sorts in place by severity, then renders the collection.
    ///
    /// Callers that need presentation order preserved should render through
    /// [`Display`](fmt::Display) instead, which sorts a view.
    pub fn render(&mut self) -> String {
        self.sort_by_severity();
        self.to_string()
    }

    /// Returns the diagnostics that have not been reported yet.
    pub fn unshown(&self, shown: &ShownSet) -> Diagnostics {
        self.0
            .iter()
            .filter(|d| !shown.is_shown(d))
            .cloned()
            .collect()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("no diagnostics"),
            [single] => write!(f, "{single}"),
            many => {
                let mut sorted: Vec<&Diagnostic> = many.iter().collect();
                sorted.sort_by_key(|d| d.severity);
                for diag in sorted {
                    write!(f, "\n-{}: {diag}", diag.severity)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Diagnostics {}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(diags: Vec<Diagnostic>) -> Self {
        Self(diags)
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diag: Diagnostic) -> Self {
        Self(vec![diag])
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Diagnostics that have already been reported to the user.
///
/// Identity is the diagnostic's full content, so re-running a stage that
/// produces an equal diagnostic does not report it twice.
#[derive(Debug, Clone, Default)]
pub struct ShownSet {
    shown: HashSet<Diagnostic>,
}

impl ShownSet {
    pub fn mark_shown<'a>(&mut self, diags: impl IntoIterator<Item = &'a Diagnostic>) {
        self.shown.extend(diags.into_iter().cloned());
    }

    pub fn is_shown(&self, diag: &Diagnostic) -> bool {
        self.shown.contains(diag)
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Pos;

    fn range(line: usize) -> Range {
        Range::new("Pulumi.yaml", Pos::new(line, 3, 0), Pos::new(line, 10, 7))
    }

    #[test]
    fn test_extend_drops_none() {
        let mut diags = Diagnostics::new();
        diags.extend([None, Some(Diagnostic::warning(None, "w", "")), None]);
        assert_eq!(diags.len(), 1);
        assert!(!diags.has_errors());
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(Diagnostics::new().to_string(), "no diagnostics");
    }

    #[test]
    fn test_render_single_uses_own_format() {
        let diags: Diagnostics =
            Diagnostic::error(Some(range(2)), "bad type", "expected a string").into();
        assert_eq!(
            diags.to_string(),
            "Pulumi.yaml:2,3-10: bad type; expected a string"
        );
    }

    #[test]
    fn test_render_many_sorts_errors_first_stably() {
        let mut diags = Diagnostics::from(vec![
            Diagnostic::warning(None, "w1", ""),
            Diagnostic::error(None, "e1", ""),
            Diagnostic::warning(None, "w2", ""),
            Diagnostic::error(None, "e2", "more"),
        ]);
        let expected = "\n-error: e1\n-error: e2; more\n-warning: w1\n-warning: w2";
        assert_eq!(diags.to_string(), expected);
        // Display leaves the order alone.
        assert_eq!(diags.as_slice()[0].summary, "w1");

        assert_eq!(diags.render(), expected);
        let order: Vec<&str> = diags.iter().map(|d| d.summary.as_str()).collect();
        assert_eq!(order, vec!["e1", "e2", "w1", "w2"]);
    }

    #[test]
    fn test_unshown_filters_without_mutating() {
        let first = Diagnostic::error(Some(range(1)), "first", "");
        let second = Diagnostic::warning(Some(range(2)), "second", "");
        let mut diags = Diagnostics::from(vec![first.clone()]);

        let mut shown = ShownSet::default();
        shown.mark_shown(&diags);

        diags.push(second.clone());
        let unshown = diags.unshown(&shown);
        assert_eq!(unshown.as_slice(), &[second]);
        assert_eq!(diags.len(), 2);
        assert!(shown.is_shown(&first));
    }

    #[test]
    fn test_with_context_copies() {
        let diag = Diagnostic::error(Some(range(4)), "s", "");
        let with = diag.with_context(Some(range(1)));
        assert!(diag.context.is_none());
        assert_eq!(with.context, Some(range(1)));
        assert_eq!(with.subject, diag.subject);
    }

    #[test]
    fn test_node_error_uses_node_range() {
        let node = Node::String(crate::syntax::StringNode::with_syntax(
            Some(crate::syntax::Syntax::new(range(9))),
            "x",
        ));
        let diag = Diagnostic::node_error(&node, "bad", "");
        assert!(diag.is_error());
        assert_eq!(diag.subject, Some(range(9)));
        assert!(Diagnostic::node_error(&Node::null(), "bad", "").subject.is_none());
    }
}
