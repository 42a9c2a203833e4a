//! "Did you mean" suggestions and human-readable lists.
//!
//! When a template names a field that does not exist, the binder reports the
//! existing fields ranked by Levenshtein distance to what was typed, so the
//! likely intended name comes first.

use std::collections::HashMap;
use std::fmt;

/// Number of ranked candidates kept when a suggestion list is truncated.
const TRUNCATED_CANDIDATES: usize = 5;

/// Levenshtein distance between `a` and `b`, with unit cost for insertion,
/// deletion, and substitution. Compares bytes.
///
/// # Examples
///
/// ```
/// use stackform_core::suggest::edit_distance;
///
/// assert_eq!(edit_distance("vpcId", "cpcId"), 1);
/// assert_eq!(edit_distance("vpcId", "foo"), 5);
/// ```
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut d = vec![vec![0usize; b.len() + 1]; a.len() + 1];

    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        d[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let sub_cost = usize::from(a[i - 1] != b[j - 1]);
            d[i][j] = (d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1)
                .min(d[i - 1][j - 1] + sub_cost);
        }
    }
    d[a.len()][b.len()]
}

/// Returns a copy of `words` ordered by ascending edit distance to
/// `compared_to`, ties broken alphabetically.
///
/// # Examples
///
/// ```
/// use stackform_core::suggest::sort_by_edit_distance;
///
/// assert_eq!(sort_by_edit_distance(&["test2", "test"], "test"), vec!["test", "test2"]);
/// assert_eq!(sort_by_edit_distance(&["c", "b", "a"], "test"), vec!["a", "b", "c"]);
/// ```
pub fn sort_by_edit_distance<S: AsRef<str>>(words: &[S], compared_to: &str) -> Vec<String> {
    let mut sorted: Vec<String> = words.iter().map(|w| w.as_ref().to_string()).collect();
    sorted.sort();

    let mut memo: HashMap<String, usize> = HashMap::new();
    for word in &sorted {
        memo.entry(word.clone())
            .or_insert_with(|| edit_distance(word, compared_to));
    }
    // Stable: equal distances keep the alphabetical order from above.
    sorted.sort_by_key(|w| memo[w]);
    sorted
}

/// Renders `items` as "a, b <conjunction> c".
pub fn display_list<S: AsRef<str>>(items: &[S], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} {conjunction} {}", first.as_ref(), second.as_ref()),
        [first, rest @ ..] => format!("{}, {}", first.as_ref(), display_list(rest, conjunction)),
    }
}

/// A list that displays as "a, b and c".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AndList(pub Vec<String>);

impl fmt::Display for AndList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_list(&self.0, "and"))
    }
}

/// A list that displays as "a, b or c".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrList(pub Vec<String>);

impl fmt::Display for OrList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_list(&self.0, "or"))
    }
}

/// Formats the message for a field or property that does not exist.
///
/// # Examples
///
/// ```
/// use stackform_core::suggest::NonExistentFieldFormatter;
///
/// let formatter = NonExistentFieldFormatter {
///     parent_label: "the template".into(),
///     fields: vec!["outputs".into(), "resources".into(), "name".into()],
///     max_elements: 5,
///     fields_are_properties: false,
/// };
/// assert_eq!(
///     formatter.message("output", "Field 'output'"),
///     "Field 'output' does not exist on the template. \
///      Existing fields are: outputs, name, resources",
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct NonExistentFieldFormatter {
    /// How the parent is referred to in the message.
    pub parent_label: String,
    /// Names that do exist on the parent.
    pub fields: Vec<String>,
    /// Maximum suggestions listed before truncating; 0 means unlimited.
    pub max_elements: usize,
    /// Say "properties" instead of "fields".
    pub fields_are_properties: bool,
}

impl NonExistentFieldFormatter {
    fn fields_name(&self) -> &'static str {
        if self.fields_are_properties {
            "properties"
        } else {
            "fields"
        }
    }

    /// Single-line message: header and body joined by a space.
    pub fn message(&self, field: &str, field_label: &str) -> String {
        format!(
            "{} {}",
            self.message_header(field_label),
            self.message_body(field)
        )
    }

    /// The message split into a summary line and a detail line.
    pub fn message_with_detail(&self, field: &str, field_label: &str) -> (String, String) {
        (self.message_header(field_label), self.message_body(field))
    }

    fn message_header(&self, field_label: &str) -> String {
        format!("{field_label} does not exist on {}.", self.parent_label)
    }

    fn message_body(&self, field: &str) -> String {
        let existing = sort_by_edit_distance(&self.fields, field);
        if existing.is_empty() {
            return format!("{} has no {}", self.parent_label, self.fields_name());
        }
        let list = if self.max_elements != 0 && existing.len() > self.max_elements {
            let shown = TRUNCATED_CANDIDATES.min(existing.len());
            format!(
                "{} and {} others",
                existing[..shown].join(", "),
                existing.len() - self.max_elements
            )
        } else {
            existing.join(", ")
        };
        format!("Existing {} are: {list}", self.fields_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_edit_distance_cases() {
        assert_eq!(edit_distance("vpcId", "cpcId"), 1);
        assert_eq!(edit_distance("vpcId", "foo"), 5);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_sort_by_edit_distance_cases() {
        let empty: [&str; 0] = [];
        assert!(sort_by_edit_distance(&empty, "test").is_empty());
        assert_eq!(
            sort_by_edit_distance(&["", "", ""], "test"),
            vec!["", "", ""]
        );
        assert_eq!(
            sort_by_edit_distance(&["test", "test2"], "test"),
            vec!["test", "test2"]
        );
        assert_eq!(
            sort_by_edit_distance(&["test2", "test", "test2"], "test"),
            vec!["test", "test2", "test2"]
        );
        assert_eq!(
            sort_by_edit_distance(&["c", "b", "a"], "test"),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_sort_by_edit_distance_does_not_mutate_input() {
        let words = vec!["zeta".to_string(), "alpha".to_string()];
        let _ = sort_by_edit_distance(&words, "alpha");
        assert_eq!(words, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_display_list_cases() {
        let empty: [&str; 0] = [];
        assert_eq!(display_list(&empty, "and"), "");
        assert_eq!(display_list(&["a"], "and"), "a");
        assert_eq!(display_list(&["a", "b"], "and"), "a and b");
        assert_eq!(display_list(&["a", "b"], "or"), "a or b");
        assert_eq!(display_list(&["a", "b"], "random"), "a random b");
        assert_eq!(display_list(&["a", "b", "c"], "and"), "a, b and c");
        assert_eq!(display_list(&["a", "b", "c", "d"], "or"), "a, b, c or d");
    }

    #[test]
    fn test_and_or_lists() {
        let and = AndList(vec!["x".into(), "y".into(), "z".into()]);
        let or = OrList(vec!["x".into(), "y".into()]);
        assert_eq!(and.to_string(), "x, y and z");
        assert_eq!(or.to_string(), "x or y");
    }

    #[test]
    fn test_formatter_no_fields() {
        let formatter = NonExistentFieldFormatter {
            parent_label: "resource 'bucket'".into(),
            fields_are_properties: true,
            ..Default::default()
        };
        let (header, detail) = formatter.message_with_detail("acl", "Property 'acl'");
        assert_eq!(header, "Property 'acl' does not exist on resource 'bucket'.");
        assert_eq!(detail, "resource 'bucket' has no properties");
    }

    #[test]
    fn test_formatter_truncates_long_lists() {
        let fields: Vec<String> = ["aa", "ab", "ac", "ad", "ae", "af", "ag", "ah"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let formatter = NonExistentFieldFormatter {
            parent_label: "obj".into(),
            fields,
            max_elements: 6,
            fields_are_properties: false,
        };
        let (_, detail) = formatter.message_with_detail("ag", "x");
        assert_eq!(
            detail,
            "Existing fields are: ag, aa, ab, ac, ad and 2 others"
        );
    }

    #[test]
    fn test_formatter_unlimited_when_max_is_zero() {
        let formatter = NonExistentFieldFormatter {
            parent_label: "obj".into(),
            fields: (0..10).map(|i| format!("f{i}")).collect(),
            max_elements: 0,
            fields_are_properties: false,
        };
        let (_, detail) = formatter.message_with_detail("f3", "x");
        assert!(detail.starts_with("Existing fields are: f3, f0, f1"));
        assert!(!detail.contains("others"));
    }

    proptest! {
        #[test]
        fn prop_edit_distance_is_symmetric(a in "[a-zA-Z0-9]{0,12}", b in "[a-zA-Z0-9]{0,12}") {
            prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
        }

        #[test]
        fn prop_edit_distance_to_self_is_zero(a in ".{0,16}") {
            prop_assert_eq!(edit_distance(&a, &a), 0);
        }

        #[test]
        fn prop_edit_distance_bounded_by_longer_len(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
            prop_assert!(edit_distance(&a, &b) <= a.len().max(b.len()));
        }
    }
}
