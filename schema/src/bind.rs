//! Binds a decoded [`Node`] tree to a [`TemplateDecl`].
//!
//! Binding checks the template's shape, the configuration types, and the
//! literal defaults against their declared types. It never stops at the
//! first problem: every diagnostic is collected and returned alongside
//! whatever part of the declaration could be bound.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use stackform_core::config::{self, CONFIG_TYPES, ConfigValue, Type, Types};
use stackform_core::diags::unexpected_casing;
use stackform_core::syntax::{ObjectPropertyDef, StringNode};
use stackform_core::{Diagnostic, Diagnostics, NonExistentFieldFormatter, Node, Range, Severity};
use tracing::debug;

use crate::ast::{
    BooleanExpr, ConfigEntry, ConfigParamDecl, Expr, PropertyEntry, ResourceDecl, ResourceEntry,
    StringExpr, TemplateDecl, parse_expr,
};

const TEMPLATE_FIELDS: &[&str] = &[
    "name",
    "runtime",
    "description",
    "configuration",
    "variables",
    "resources",
    "outputs",
];
const CONFIG_PARAM_FIELDS: &[&str] = &["type", "default", "secret"];
const RESOURCE_FIELDS: &[&str] = &["type", "properties", "options"];

/// Binder tuning.
///
/// # Examples
///
/// ```
/// use stackform_core::Severity;
/// use stackform_schema::BindOptions;
///
/// let json = r#"{"unknown_field_severity": "error"}"#;
/// let options: BindOptions = serde_json::from_str(json).unwrap();
/// assert_eq!(options.unknown_field_severity, Severity::Error);
/// assert_eq!(options.max_suggestions, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindOptions {
    /// Suggestions listed in an unknown-field message before truncating;
    /// 0 lists every candidate.
    pub max_suggestions: usize,
    /// Severity of unknown-field diagnostics.
    pub unknown_field_severity: Severity,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            max_suggestions: 5,
            unknown_field_severity: Severity::Warning,
        }
    }
}

/// Binds a template from its decoded node tree.
///
/// # Examples
///
/// ```
/// use stackform_core::Node;
/// use stackform_core::syntax::{ObjectPropertyDef, StringNode};
/// use stackform_schema::{BindOptions, parse_template};
///
/// let root = Node::object(vec![
///     ObjectPropertyDef::new(StringNode::new("name"), Node::string("webapp")),
///     ObjectPropertyDef::new(StringNode::new("outptus"), Node::null()),
/// ]);
/// let (decl, diags) = parse_template(&root, &BindOptions::default());
///
/// assert_eq!(decl.name.unwrap().value, "webapp");
/// assert_eq!(diags.len(), 1);
/// assert!(!diags.has_errors());
/// assert!(diags.as_slice()[0].detail.starts_with("Existing fields are: outputs"));
/// ```
pub fn parse_template(node: &Node, options: &BindOptions) -> (TemplateDecl, Diagnostics) {
    let mut binder = Binder {
        options,
        diags: Diagnostics::new(),
    };
    let decl = binder.bind_template(node);

    debug!(
        name = decl.name.as_ref().map(|n| n.value.as_str()),
        configuration = decl.configuration.len(),
        resources = decl.resources.len(),
        outputs = decl.outputs.len(),
        diagnostics = binder.diags.len(),
        "Bound template"
    );
    (decl, binder.diags)
}

struct Binder<'a> {
    options: &'a BindOptions,
    diags: Diagnostics,
}

impl Binder<'_> {
    fn bind_template(&mut self, node: &Node) -> TemplateDecl {
        let mut decl = TemplateDecl::default();
        let Node::Object(obj) = node else {
            self.diags
                .push(Diagnostic::node_error(node, "template must be an object", ""));
            return decl;
        };
        decl.set_syntax(obj.syntax().cloned());

        let mut seen = HashSet::new();
        for ObjectPropertyDef { key, value, .. } in obj.entries() {
            let Some(field) = self.match_field(key, TEMPLATE_FIELDS, "the template") else {
                continue;
            };
            if !seen.insert(field) {
                self.duplicate_key(key, "the template");
                continue;
            }
            match field {
                "name" => decl.name = self.bind_string(field, value),
                "runtime" => decl.runtime = self.bind_string(field, value),
                "description" => decl.description = self.bind_string(field, value),
                "configuration" => decl.configuration = self.bind_configuration(value),
                "variables" => decl.variables = self.bind_properties(field, value),
                "resources" => decl.resources = self.bind_resources(value),
                "outputs" => decl.outputs = self.bind_properties(field, value),
                _ => {}
            }
        }
        decl
    }

    /// Resolves `key` against the known `fields`. A miscapitalized match is
    /// accepted with a warning; an unknown key is reported and skipped.
    fn match_field(
        &mut self,
        key: &StringNode,
        fields: &[&'static str],
        parent_label: &str,
    ) -> Option<&'static str> {
        let name = key.value();
        if let Some(field) = fields.iter().copied().find(|f| f.eq_ignore_ascii_case(name)) {
            self.diags
                .extend([unexpected_casing(key.range().cloned(), field, name)]);
            return Some(field);
        }

        let formatter = NonExistentFieldFormatter {
            parent_label: parent_label.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            max_elements: self.options.max_suggestions,
            fields_are_properties: false,
        };
        let (summary, detail) = formatter.message_with_detail(name, &format!("Field '{name}'"));
        self.diags.push(Diagnostic::new(
            self.options.unknown_field_severity,
            key.range().cloned(),
            summary,
            detail,
        ));
        None
    }

    fn duplicate_key(&mut self, key: &StringNode, section: &str) {
        self.diags.push(Diagnostic::error(
            key.range().cloned(),
            format!("duplicate key '{}' in {section}", key.value()),
            "",
        ));
    }

    fn bind_expr(&mut self, node: &Node) -> Expr {
        let (expr, diags) = parse_expr(node);
        self.diags.append(diags);
        expr
    }

    fn bind_string(&mut self, path: &str, node: &Node) -> Option<StringExpr> {
        match self.bind_expr(node) {
            Expr::String(s) => Some(s),
            _ => {
                self.diags
                    .push(Diagnostic::node_error(node, format!("{path} must be a string"), ""));
                None
            }
        }
    }

    fn bind_boolean(&mut self, path: &str, node: &Node) -> Option<BooleanExpr> {
        match self.bind_expr(node) {
            Expr::Boolean(b) => Some(b),
            _ => {
                self.diags.push(Diagnostic::node_error(
                    node,
                    format!("{path} must be a boolean value"),
                    "",
                ));
                None
            }
        }
    }

    /// The entries of an object-valued section, minus duplicate keys.
    fn section_entries<'n>(
        &mut self,
        section: &str,
        node: &'n Node,
    ) -> Vec<(&'n StringNode, &'n Node)> {
        let obj = match node {
            Node::Object(obj) => obj,
            // An empty section reads as null in YAML.
            Node::Null(_) => return Vec::new(),
            _ => {
                self.diags.push(Diagnostic::node_error(
                    node,
                    format!("{section} must be an object"),
                    "",
                ));
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(obj.len());
        for ObjectPropertyDef { key, value, .. } in obj.entries() {
            if seen.insert(key.value()) {
                entries.push((key, value));
            } else {
                self.duplicate_key(key, section);
            }
        }
        entries
    }

    fn bind_properties(&mut self, section: &str, node: &Node) -> Vec<PropertyEntry> {
        self.section_entries(section, node)
            .into_iter()
            .map(|(key, value)| PropertyEntry {
                key: StringExpr::from_key(key),
                value: self.bind_expr(value),
            })
            .collect()
    }

    fn bind_configuration(&mut self, node: &Node) -> Vec<ConfigEntry> {
        self.section_entries("configuration", node)
            .into_iter()
            .map(|(key, value)| ConfigEntry {
                key: StringExpr::from_key(key),
                value: self.bind_config_param(key.value(), value),
            })
            .collect()
    }

    fn bind_config_param(&mut self, name: &str, node: &Node) -> ConfigParamDecl {
        let path = format!("configuration.{name}");
        let mut param = ConfigParamDecl::default();
        let Node::Object(obj) = node else {
            self.diags
                .push(Diagnostic::node_error(node, format!("{path} must be an object"), ""));
            return param;
        };
        param.set_syntax(obj.syntax().cloned());

        let parent_label = format!("'{path}'");
        let mut seen = HashSet::new();
        for ObjectPropertyDef { key, value, .. } in obj.entries() {
            let Some(field) = self.match_field(key, CONFIG_PARAM_FIELDS, &parent_label) else {
                continue;
            };
            if !seen.insert(field) {
                self.duplicate_key(key, &path);
                continue;
            }
            match field {
                "type" => param.type_ = self.bind_string(&format!("{path}.type"), value),
                "default" => param.default = Some(self.bind_expr(value)),
                "secret" => param.secret = self.bind_boolean(&format!("{path}.secret"), value),
                _ => {}
            }
        }

        // Type problems are reported at the value, within the parameter.
        let context = param.range();
        let declared = param
            .type_
            .as_ref()
            .and_then(|t| self.check_declared_type(name, t, context));
        if let Some(default) = &param.default {
            self.check_default(name, declared, default, context);
        }
        param
    }

    fn check_declared_type(
        &mut self,
        name: &str,
        type_: &StringExpr,
        context: Option<&Range>,
    ) -> Option<Type> {
        match config::parse(&type_.value) {
            Some(t) if config::is_valid_type(t) => Some(t),
            _ => {
                let diag = Diagnostic::error(
                    type_.range().cloned(),
                    format!(
                        "unrecognized type '{}' for config variable '{name}'",
                        type_.value
                    ),
                    format!("valid types are {}", Types(&CONFIG_TYPES)),
                );
                self.diags.push(diag.with_context(context.cloned()));
                None
            }
        }
    }

    /// Infers the type of a literal default and checks it against the
    /// declared type. Dynamic defaults (symbols, interpolations) are left
    /// for later stages.
    fn check_default(
        &mut self,
        name: &str,
        declared: Option<Type>,
        default: &Expr,
        context: Option<&Range>,
    ) {
        let Some(value) = literal_value(default) else {
            return;
        };
        let range = default.range().cloned();
        let inferred = match config::type_value(&value) {
            Ok(t) => t,
            Err(err) => {
                let diag = Diagnostic::error(
                    range,
                    err.to_string(),
                    format!("in the default value of config variable '{name}'"),
                );
                self.diags.push(diag.with_context(context.cloned()));
                return;
            }
        };

        if let Some(declared) = declared {
            if !is_assignable(inferred, declared) {
                let diag = Diagnostic::error(
                    range,
                    format!("type mismatch for config variable '{name}'"),
                    format!("declared as {declared}, but the default value has type {inferred}"),
                );
                self.diags.push(diag.with_context(context.cloned()));
            }
        }
    }

    fn bind_resources(&mut self, node: &Node) -> Vec<ResourceEntry> {
        self.section_entries("resources", node)
            .into_iter()
            .map(|(key, value)| ResourceEntry {
                key: StringExpr::from_key(key),
                value: self.bind_resource(key.value(), value),
            })
            .collect()
    }

    fn bind_resource(&mut self, name: &str, node: &Node) -> ResourceDecl {
        let path = format!("resources.{name}");
        let mut resource = ResourceDecl::default();
        let Node::Object(obj) = node else {
            self.diags
                .push(Diagnostic::node_error(node, format!("{path} must be an object"), ""));
            return resource;
        };

        let parent_label = format!("'{path}'");
        let mut seen = HashSet::new();
        for ObjectPropertyDef { key, value, .. } in obj.entries() {
            let Some(field) = self.match_field(key, RESOURCE_FIELDS, &parent_label) else {
                continue;
            };
            if !seen.insert(field) {
                self.duplicate_key(key, &path);
                continue;
            }
            match field {
                "type" => resource.type_ = self.bind_string(&format!("{path}.type"), value),
                "properties" => {
                    resource.properties =
                        self.bind_properties(&format!("{path}.properties"), value);
                }
                "options" => match self.bind_expr(value) {
                    options @ Expr::Object(_) => resource.options = Some(options),
                    _ => self.diags.push(Diagnostic::node_error(
                        value,
                        format!("{path}.options must be an object"),
                        "",
                    )),
                },
                _ => {}
            }
        }
        resource
    }
}

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// The literal value of an expression, or `None` when it depends on
/// something only known at runtime.
fn literal_value(expr: &Expr) -> Option<ConfigValue> {
    let value = match expr {
        Expr::String(x) => ConfigValue::String(x.value.clone()),
        Expr::Boolean(x) => ConfigValue::Boolean(x.value),
        Expr::Number(x) if x.value.fract() == 0.0 && x.value.abs() <= MAX_SAFE_INTEGER => {
            ConfigValue::Int(x.value as i64)
        }
        Expr::Number(x) => ConfigValue::Number(x.value),
        Expr::List(x) => ConfigValue::List(
            x.elements
                .iter()
                .map(literal_value)
                .collect::<Option<Vec<_>>>()?,
        ),
        Expr::Null(_) => ConfigValue::Unsupported("null".to_string()),
        Expr::Object(_) => ConfigValue::Unsupported("object".to_string()),
        Expr::Interpolate(_) | Expr::Symbol(_) => return None,
    };
    Some(value)
}

/// Integers are numbers; nothing else converts implicitly.
fn is_assignable(from: Type, to: Type) -> bool {
    from == to
        || matches!(
            (from, to),
            (Type::Int, Type::Number) | (Type::IntList, Type::NumberList)
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackform_core::syntax::{NumberNode, ObjectNode, Pos, Syntax};

    fn prop(key: &str, value: Node) -> ObjectPropertyDef {
        ObjectPropertyDef::new(StringNode::new(key), value)
    }

    fn config_param(entries: Vec<ObjectPropertyDef>) -> Node {
        Node::object(vec![prop(
            "configuration",
            Node::object(vec![prop("size", Node::object(entries))]),
        )])
    }

    fn bind(node: &Node) -> (TemplateDecl, Diagnostics) {
        parse_template(node, &BindOptions::default())
    }

    fn summaries(diags: &Diagnostics) -> Vec<String> {
        diags.iter().map(|d| d.summary.clone()).collect()
    }

    // ------------------------------------------------------------------------
    // Top level

    #[test]
    fn test_root_must_be_object() {
        let (decl, diags) = bind(&Node::string("nope"));
        assert_eq!(decl, TemplateDecl::default());
        assert_eq!(summaries(&diags), vec!["template must be an object"]);
    }

    #[test]
    fn test_binds_scalar_fields() {
        let root = Node::object(vec![
            prop("name", Node::string("webapp")),
            prop("runtime", Node::string("yaml")),
            prop("description", Node::string("A web app")),
        ]);
        let (decl, diags) = bind(&root);
        assert!(diags.is_empty());
        assert_eq!(decl.name.unwrap().value, "webapp");
        assert_eq!(decl.runtime.unwrap().value, "yaml");
        assert_eq!(decl.description.unwrap().value, "A web app");
    }

    #[test]
    fn test_miscapitalized_field_is_accepted_with_warning() {
        let root = Node::object(vec![prop("Name", Node::string("webapp"))]);
        let (decl, diags) = bind(&root);
        assert_eq!(decl.name.unwrap().value, "webapp");
        assert!(!diags.has_errors());
        assert_eq!(
            summaries(&diags),
            vec!["'Name' looks like a miscapitalization of 'name'"]
        );
    }

    #[test]
    fn test_unknown_field_suggests_closest() {
        let root = Node::object(vec![prop("resource", Node::null())]);
        let (_, diags) = bind(&root);
        let diag = &diags.as_slice()[0];
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.summary, "Field 'resource' does not exist on the template.");
        assert!(diag.detail.starts_with("Existing fields are: resources"));
    }

    #[test]
    fn test_unknown_field_severity_is_configurable() {
        let options = BindOptions {
            unknown_field_severity: Severity::Error,
            max_suggestions: 2,
        };
        let root = Node::object(vec![prop("bogus", Node::null())]);
        let (_, diags) = parse_template(&root, &options);
        assert!(diags.has_errors());
        assert!(diags.as_slice()[0].detail.ends_with("and 5 others"));
    }

    #[test]
    fn test_shape_errors() {
        let root = Node::object(vec![
            prop("name", Node::number(3.0)),
            prop("description", Node::string("${interpolated}")),
            prop("outputs", Node::list(vec![])),
        ]);
        let (decl, diags) = bind(&root);
        assert!(decl.name.is_none());
        assert_eq!(
            summaries(&diags),
            vec![
                "name must be a string",
                "description must be a string",
                "outputs must be an object",
            ]
        );
    }

    #[test]
    fn test_duplicate_keys() {
        let root = Node::object(vec![
            prop("name", Node::string("a")),
            prop("name", Node::string("b")),
            prop(
                "outputs",
                Node::object(vec![prop("x", Node::number(1.0)), prop("x", Node::number(2.0))]),
            ),
        ]);
        let (decl, diags) = bind(&root);
        assert_eq!(decl.name.unwrap().value, "a");
        assert_eq!(decl.outputs.len(), 1);
        assert_eq!(
            summaries(&diags),
            vec![
                "duplicate key 'name' in the template",
                "duplicate key 'x' in outputs",
            ]
        );
    }

    #[test]
    fn test_null_sections_are_empty() {
        let root = Node::object(vec![prop("configuration", Node::null())]);
        let (decl, diags) = bind(&root);
        assert!(diags.is_empty());
        assert!(decl.configuration.is_empty());
    }

    // ------------------------------------------------------------------------
    // Configuration

    #[test]
    fn test_binds_config_param() {
        let root = config_param(vec![
            prop("type", Node::string("Number")),
            prop("default", Node::number(3.0)),
            prop("secret", Node::boolean(true)),
        ]);
        let (decl, diags) = bind(&root);
        assert!(diags.is_empty(), "{diags}");
        let entry = &decl.configuration[0];
        assert_eq!(entry.key.value, "size");
        assert_eq!(entry.value.type_.as_ref().unwrap().value, "Number");
        assert_eq!(entry.value.default, Some(Expr::number(3.0)));
        assert!(entry.value.secret.as_ref().unwrap().value);
    }

    #[test]
    fn test_unrecognized_config_type() {
        let root = config_param(vec![prop("type", Node::string("Map<String>"))]);
        let (_, diags) = bind(&root);
        assert_eq!(
            summaries(&diags),
            vec!["unrecognized type 'Map<String>' for config variable 'size'"]
        );
        assert!(diags.as_slice()[0].detail.starts_with("valid types are String, List<String>"));

        let root = config_param(vec![prop("type", Node::string("List<List<Int>>"))]);
        let (_, diags) = bind(&root);
        assert!(diags.has_errors());
    }

    #[test]
    fn test_default_type_mismatch() {
        let root = config_param(vec![
            prop("type", Node::string("Boolean")),
            prop("default", Node::string("yes")),
        ]);
        let (_, diags) = bind(&root);
        let diag = &diags.as_slice()[0];
        assert_eq!(diag.summary, "type mismatch for config variable 'size'");
        assert_eq!(
            diag.detail,
            "declared as Boolean, but the default value has type String"
        );
    }

    #[test]
    fn test_int_default_satisfies_number() {
        let root = config_param(vec![
            prop("type", Node::string("List<Number>")),
            prop(
                "default",
                Node::list(vec![Node::number(1.0), Node::number(2.0)]),
            ),
        ]);
        let (_, diags) = bind(&root);
        assert!(diags.is_empty(), "{diags}");

        let root = config_param(vec![
            prop("type", Node::string("Int")),
            prop("default", Node::number(2.5)),
        ]);
        let (_, diags) = bind(&root);
        assert!(diags.has_errors());
    }

    #[test]
    fn test_heterogeneous_list_default() {
        let root = config_param(vec![prop(
            "default",
            Node::list(vec![Node::number(1.0), Node::string("two")]),
        )]);
        let (_, diags) = bind(&root);
        assert_eq!(
            summaries(&diags),
            vec!["heterogeneous typed lists are not allowed: found types Int and String"]
        );
    }

    #[test]
    fn test_dynamic_default_is_not_type_checked() {
        let root = config_param(vec![
            prop("type", Node::string("Int")),
            prop("default", Node::string("${other}")),
        ]);
        let (decl, diags) = bind(&root);
        assert!(diags.is_empty());
        assert!(matches!(
            decl.configuration[0].value.default,
            Some(Expr::Symbol(_))
        ));
    }

    #[test]
    fn test_unknown_config_param_field() {
        let root = config_param(vec![prop("defualt", Node::string("x"))]);
        let (_, diags) = bind(&root);
        let diag = &diags.as_slice()[0];
        assert_eq!(
            diag.summary,
            "Field 'defualt' does not exist on 'configuration.size'."
        );
        assert_eq!(diag.detail, "Existing fields are: default, secret, type");
    }

    #[test]
    fn test_secret_must_be_boolean() {
        let root = config_param(vec![prop("secret", Node::string("true"))]);
        let (decl, diags) = bind(&root);
        assert!(decl.configuration[0].value.secret.is_none());
        assert_eq!(
            summaries(&diags),
            vec!["configuration.size.secret must be a boolean value"]
        );
    }

    #[test]
    fn test_repeated_config_param_field() {
        let root = config_param(vec![
            prop("type", Node::string("String")),
            prop("type", Node::string("Int")),
            prop("secret", Node::boolean(true)),
        ]);
        let (decl, diags) = bind(&root);
        let param = &decl.configuration[0].value;
        assert_eq!(param.type_.as_ref().unwrap().value, "String");
        assert!(param.secret.as_ref().unwrap().value);
        assert_eq!(
            summaries(&diags),
            vec!["duplicate key 'type' in configuration.size"]
        );
        assert!(diags.has_errors());
    }

    #[test]
    fn test_type_errors_carry_parameter_context() {
        let at = |line: usize, column: usize, len: usize| {
            Some(Syntax::new(Range::new(
                "Pulumi.yaml",
                Pos::new(line, column, 0),
                Pos::new(line, column + len, 0),
            )))
        };
        let param = Node::Object(ObjectNode::with_syntax(
            at(3, 5, 30),
            vec![
                prop("type", Node::String(StringNode::with_syntax(at(4, 11, 4), "Bool"))),
                prop("default", Node::Number(NumberNode::with_syntax(at(5, 14, 1), 1.0))),
            ],
        ));
        let root = Node::object(vec![prop(
            "configuration",
            Node::object(vec![prop("flag", param)]),
        )]);
        let (_, diags) = bind(&root);
        let diag = &diags.as_slice()[0];
        assert_eq!(diag.summary, "unrecognized type 'Bool' for config variable 'flag'");
        assert_eq!(diag.subject.as_ref().unwrap().start.line, 4);
        assert_eq!(diag.context.as_ref().unwrap().start.line, 3);

        // Unknown fields are reported without a context.
        let root = config_param(vec![prop("typ", Node::string("Int"))]);
        let (_, diags) = bind(&root);
        assert!(diags.as_slice()[0].context.is_none());
    }

    // ------------------------------------------------------------------------
    // Resources

    #[test]
    fn test_binds_resource() {
        let root = Node::object(vec![prop(
            "resources",
            Node::object(vec![prop(
                "bucket",
                Node::object(vec![
                    prop("type", Node::string("aws:s3:Bucket")),
                    prop(
                        "properties",
                        Node::object(vec![prop("acl", Node::string("private"))]),
                    ),
                    prop("options", Node::string("bad")),
                ]),
            )]),
        )]);
        let (decl, diags) = bind(&root);
        let bucket = &decl.resources[0];
        assert_eq!(bucket.key.value, "bucket");
        assert_eq!(bucket.value.type_.as_ref().unwrap().value, "aws:s3:Bucket");
        assert_eq!(bucket.value.properties[0].value, Expr::string("private"));
        assert!(bucket.value.options.is_none());
        assert_eq!(
            summaries(&diags),
            vec!["resources.bucket.options must be an object"]
        );
    }

    #[test]
    fn test_repeated_resource_field() {
        let root = Node::object(vec![prop(
            "resources",
            Node::object(vec![prop(
                "bucket",
                Node::object(vec![
                    prop("type", Node::string("aws:s3:Bucket")),
                    prop("Type", Node::string("aws:s3:BucketV2")),
                ]),
            )]),
        )]);
        let (decl, diags) = bind(&root);
        let bucket = &decl.resources[0].value;
        assert_eq!(bucket.type_.as_ref().unwrap().value, "aws:s3:Bucket");
        assert_eq!(
            summaries(&diags),
            vec![
                "'Type' looks like a miscapitalization of 'type'",
                "duplicate key 'Type' in resources.bucket",
            ]
        );
    }

    #[test]
    fn test_bind_options_defaults() {
        let options: BindOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, BindOptions::default());
    }
}
