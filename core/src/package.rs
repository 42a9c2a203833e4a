use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Schema reference used for values whose type is not known statically.
pub const ANY_TYPE_REF: &str = "pulumi.json#/Any";

/// Returns the resource token for a template's component: `<name>:index:Component`.
///
/// # Examples
///
/// ```
/// use stackform_core::component_token;
///
/// assert_eq!(component_token("webapp"), "webapp:index:Component");
/// ```
pub fn component_token(package_name: &str) -> String {
    format!("{package_name}:index:Component")
}

/// Structural package schema synthesized from a component template.
///
/// The schema is a pure projection of a template: it is built once, never
/// mutated, and handed to the provider runtime that serves it. Maps are
/// ordered so that serializing the same schema twice yields identical bytes.
///
/// # Examples
///
/// ```
/// use stackform_core::*;
///
/// let mut package = PackageSchema::new("webapp", "A small web app");
/// let token = component_token("webapp");
/// package.resources.insert(token.clone(), ResourceSpec::component(&token, "A small web app"));
///
/// assert_eq!(package.resource_count(), 1);
/// assert!(package.resources[&token].is_component);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PackageSchema {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceSpec>,
}

impl PackageSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            resources: BTreeMap::new(),
        }
    }

    /// Returns the number of resources in this package.
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}

/// A resource in a package schema. Templates produce exactly one, a
/// component resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    /// Resource type token.
    #[serde(rename = "type")]
    pub token: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub is_component: bool,
    #[serde(default)]
    pub input_properties: BTreeMap<String, PropertySpec>,
    #[serde(default)]
    pub required_inputs: Vec<String>,
    /// Output properties.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySpec>,
    /// Outputs that are always present.
    #[serde(default)]
    pub required: Vec<String>,
}

impl ResourceSpec {
    /// An empty component resource with the given token.
    pub fn component(token: &str, description: &str) -> Self {
        Self {
            token: token.to_string(),
            description: description.to_string(),
            is_component: true,
            ..Self::default()
        }
    }
}

/// Structural description of a single input or output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    #[serde(flatten)]
    pub type_spec: TypeSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_info: Option<DefaultSpec>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub secret: bool,
}

impl PropertySpec {
    pub fn new(type_spec: TypeSpec) -> Self {
        Self {
            type_spec,
            default: None,
            default_info: None,
            secret: false,
        }
    }
}

/// Where a default value may come from at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSpec {
    /// Environment variables consulted, in order.
    pub environment: Vec<String>,
}

/// A property type: a primitive name, an array of some element type, or a
/// reference to a named type.
///
/// # Examples
///
/// ```
/// use stackform_core::TypeSpec;
///
/// let spec = TypeSpec::array(TypeSpec::primitive("string"));
/// let json = serde_json::to_value(&spec).unwrap();
/// assert_eq!(json, serde_json::json!({"type": "array", "items": {"type": "string"}}));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TypeSpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<TypeSpec>>,
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl TypeSpec {
    pub fn primitive(name: &str) -> Self {
        Self {
            type_: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn array(items: TypeSpec) -> Self {
        Self {
            type_: Some("array".to_string()),
            items: Some(Box::new(items)),
            reference: None,
        }
    }

    /// The universal "any" type.
    pub fn any() -> Self {
        Self {
            reference: Some(ANY_TYPE_REF.to_string()),
            ..Self::default()
        }
    }

    pub fn is_any(&self) -> bool {
        self.reference.as_deref() == Some(ANY_TYPE_REF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_spec_wire_shape() {
        let mut prop = PropertySpec::new(TypeSpec::primitive("string"));
        prop.default = Some(serde_json::json!("dev"));
        prop.default_info = Some(DefaultSpec {
            environment: vec!["stage".into()],
        });

        let json = serde_json::to_value(&prop).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "string",
                "default": "dev",
                "defaultInfo": {"environment": ["stage"]}
            })
        );
    }

    #[test]
    fn test_any_serializes_as_ref() {
        let json = serde_json::to_value(PropertySpec::new(TypeSpec::any())).unwrap();
        assert_eq!(json, serde_json::json!({"$ref": "pulumi.json#/Any"}));
    }

    #[test]
    fn test_resource_spec_wire_names() {
        let mut resource = ResourceSpec::component("app:index:Component", "");
        resource.required_inputs.push("size".into());
        resource.input_properties.insert(
            "size".into(),
            PropertySpec::new(TypeSpec::primitive("number")),
        );

        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["type"], "app:index:Component");
        assert_eq!(json["isComponent"], true);
        assert_eq!(json["requiredInputs"], serde_json::json!(["size"]));
        assert_eq!(json["inputProperties"]["size"]["type"], "number");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_package_roundtrips_through_json() {
        let mut package = PackageSchema::new("app", "desc");
        let token = component_token("app");
        let mut resource = ResourceSpec::component(&token, "desc");
        let mut secret = PropertySpec::new(TypeSpec::primitive("string"));
        secret.secret = true;
        resource.input_properties.insert("password".into(), secret);
        package.resources.insert(token, resource);

        let text = serde_json::to_string(&package).unwrap();
        let back: PackageSchema = serde_json::from_str(&text).unwrap();
        assert_eq!(back, package);
    }
}
