//! Projects a component template into a package schema.
//!
//! A component template declares a single component resource. Its
//! configuration entries become the component's inputs and its outputs
//! become the component's output properties. Output types are not inferred
//! here, so every output is typed `any`.

use stackform_core::config::{self, Type};
use stackform_core::{
    DefaultSpec, Diagnostic, Diagnostics, PackageSchema, PropertySpec, ResourceSpec, TypeSpec,
    component_token,
};
use tracing::debug;

use crate::ast::{Expr, TemplateDecl};
use crate::error::{Result, SynthesisError};

/// A literal configuration default.
#[derive(Debug, Clone, PartialEq)]
enum DefaultValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl DefaultValue {
    fn type_spec(&self) -> TypeSpec {
        match self {
            DefaultValue::String(_) => Type::String.type_spec(),
            DefaultValue::Number(_) => Type::Number.type_spec(),
            DefaultValue::Boolean(_) => Type::Boolean.type_spec(),
        }
    }

    /// Integral numbers are written without a fractional part.
    fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            DefaultValue::String(s) => Some(serde_json::Value::String(s.clone())),
            DefaultValue::Boolean(b) => Some(serde_json::Value::Bool(*b)),
            DefaultValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                Some(serde_json::Value::from(*n as i64))
            }
            DefaultValue::Number(n) => {
                serde_json::Number::from_f64(*n).map(serde_json::Value::Number)
            }
        }
    }
}

fn default_value(key: &str, expr: Option<&Expr>) -> Result<Option<DefaultValue>> {
    let value = match expr {
        None => return Ok(None),
        Some(Expr::String(x)) => DefaultValue::String(x.value.clone()),
        Some(Expr::Number(x)) if x.value.is_finite() => DefaultValue::Number(x.value),
        Some(Expr::Boolean(x)) => DefaultValue::Boolean(x.value),
        Some(other) => {
            return Err(SynthesisError::InvalidDefaultExpression {
                key: key.to_string(),
                kind: if matches!(other, Expr::Number(_)) {
                    "a non-finite number"
                } else {
                    other.describe()
                },
                range: other.range().cloned(),
            });
        }
    };
    Ok(Some(value))
}

/// Reports what would stop a bound template from being exposed as a
/// component: a missing name, or a default that is not a scalar literal.
///
/// Run this before [`schema`]; a template with no errors here always
/// synthesizes.
///
/// # Examples
///
/// ```
/// use stackform_schema::ast::{ConfigParamDecl, Expr, TemplateDecl};
/// use stackform_schema::check_component;
///
/// let decl = TemplateDecl::named("app").with_config(
///     "tags",
///     ConfigParamDecl::new(None, Some(Expr::string("${other}")), None),
/// );
/// let diags = check_component(&decl);
/// assert_eq!(
///     diags.as_slice()[0].summary,
///     "default for config variable 'tags' must be a string, number, or boolean literal",
/// );
/// ```
pub fn check_component(decl: &TemplateDecl) -> Diagnostics {
    let mut diags = Diagnostics::new();

    match &decl.name {
        Some(name) if name.value.contains(':') => diags.push(Diagnostic::error(
            name.range().cloned(),
            format!("component name '{}' must not contain ':'", name.value),
            "",
        )),
        Some(name) if !name.value.is_empty() => {}
        _ => diags.push(Diagnostic::error(
            decl.range().cloned(),
            "component templates must have a name",
            "",
        )),
    }

    for entry in &decl.configuration {
        let Some(default) = &entry.value.default else {
            continue;
        };
        if default_value(&entry.key.value, Some(default)).is_err() {
            diags.push(Diagnostic::error(
                default.range().cloned(),
                format!(
                    "default for config variable '{}' must be a string, number, or boolean literal",
                    entry.key.value
                ),
                format!("found {}", default.describe()),
            ));
        }
    }
    diags
}

/// Synthesizes the package schema for a component template.
///
/// The package holds a single component resource keyed by
/// `<name>:index:Component`. Each configuration entry becomes an input
/// property whose default may be overridden from the environment variable
/// of the same name; entries with no default are required. Each output
/// becomes an `any`-typed output property.
///
/// # Errors
///
/// Returns [`SynthesisError::InvalidDefaultExpression`] if a default is not
/// a string, number, or boolean literal. [`check_component`] reports the
/// same condition as a diagnostic.
///
/// # Examples
///
/// ```
/// use stackform_schema::ast::{ConfigParamDecl, Expr, StringExpr, TemplateDecl};
/// use stackform_schema::schema;
///
/// let decl = TemplateDecl::named("webapp")
///     .with_config(
///         "stage",
///         ConfigParamDecl::new(Some(StringExpr::new("String")), Some(Expr::string("dev")), None),
///     )
///     .with_config("size", ConfigParamDecl::new(Some(StringExpr::new("Number")), None, None));
///
/// let package = schema(&decl).unwrap();
/// let component = &package.resources["webapp:index:Component"];
/// assert_eq!(component.required_inputs, vec!["size"]);
/// assert_eq!(component.input_properties["stage"].default, Some("dev".into()));
/// ```
pub fn schema(decl: &TemplateDecl) -> Result<PackageSchema> {
    let name = decl.name.as_ref().map_or("", |n| n.value.as_str());
    let description = decl.description.as_ref().map_or("", |d| d.value.as_str());

    let token = component_token(name);
    let mut resource = ResourceSpec::component(&token, description);

    for entry in &decl.configuration {
        let key = &entry.key.value;
        let param = &entry.value;
        let default = default_value(key, param.default.as_ref())?;

        let declared = param
            .type_
            .as_ref()
            .and_then(|t| config::parse(&t.value))
            .filter(|t| matches!(t, Type::String | Type::Number | Type::Boolean));
        let type_spec = match (declared, &default) {
            (Some(t), _) => t.type_spec(),
            (None, Some(d)) => d.type_spec(),
            (None, None) => TypeSpec::any(),
        };

        let mut property = PropertySpec::new(type_spec);
        property.default = default.as_ref().and_then(DefaultValue::to_json);
        property.default_info = Some(DefaultSpec {
            environment: vec![key.clone()],
        });
        property.secret = param.secret.as_ref().is_some_and(|s| s.value);

        if property.default.is_none() {
            resource.required_inputs.push(key.clone());
        }
        debug!(
            input = %key,
            type_spec = ?property.type_spec,
            required = property.default.is_none(),
            secret = property.secret,
            "Synthesized component input"
        );
        resource.input_properties.insert(key.clone(), property);
    }

    for output in &decl.outputs {
        let key = &output.key.value;
        debug!(output = %key, "Synthesized component output");
        resource
            .properties
            .insert(key.clone(), PropertySpec::new(TypeSpec::any()));
    }

    let mut package = PackageSchema::new(name, description);
    package.resources.insert(token, resource);
    Ok(package)
}
