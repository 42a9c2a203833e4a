use stackform_core::syntax::{ObjectPropertyDef, StringNode};
use stackform_core::{Node, TypeSpec, validate_package};
use stackform_schema::{BindOptions, TemplateDecl, check_component, parse_template, schema};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn obj(entries: Vec<(&str, Node)>) -> Node {
    Node::object(
        entries
            .into_iter()
            .map(|(k, v)| ObjectPropertyDef::new(StringNode::new(k), v))
            .collect(),
    )
}

fn bind(root: &Node) -> TemplateDecl {
    let (decl, diags) = parse_template(root, &BindOptions::default());
    assert!(!diags.has_errors(), "unexpected errors: {diags}");
    assert!(check_component(&decl).is_empty());
    decl
}

fn webapp_template() -> Node {
    obj(vec![
        ("name", Node::string("webapp")),
        ("description", Node::string("A load balanced web app")),
        (
            "configuration",
            obj(vec![
                (
                    "name",
                    obj(vec![("type", Node::string("String")), ("default", Node::string("dev"))]),
                ),
                ("instances", obj(vec![("type", Node::string("Number"))])),
                (
                    "password",
                    obj(vec![("type", Node::string("String")), ("secret", Node::boolean(true))]),
                ),
                ("debug", obj(vec![("default", Node::boolean(false))])),
            ]),
        ),
        (
            "resources",
            obj(vec![(
                "lb",
                obj(vec![("type", Node::string("aws:lb:LoadBalancer"))]),
            )]),
        ),
        ("outputs", obj(vec![("url", Node::string("http://${lb.dnsName}"))])),
    ])
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[test]
fn test_string_default_end_to_end() {
    let root = obj(vec![
        ("name", Node::string("app")),
        (
            "configuration",
            obj(vec![(
                "name",
                obj(vec![("type", Node::string("String")), ("default", Node::string("dev"))]),
            )]),
        ),
    ]);
    let package = schema(&bind(&root)).unwrap();
    let resource = &package.resources["app:index:Component"];
    let input = &resource.input_properties["name"];

    assert_eq!(input.type_spec, TypeSpec::primitive("string"));
    assert_eq!(input.default, Some(serde_json::json!("dev")));
    assert_eq!(input.default_info.as_ref().unwrap().environment, vec!["name"]);
    assert!(!resource.required_inputs.contains(&"name".to_string()));
}

#[test]
fn test_webapp_schema() {
    let package = schema(&bind(&webapp_template())).unwrap();
    assert!(validate_package(&package).is_empty());

    let resource = &package.resources["webapp:index:Component"];
    assert_eq!(resource.description, "A load balanced web app");
    assert_eq!(resource.required_inputs, vec!["instances", "password"]);
    assert!(resource.input_properties["password"].secret);
    assert_eq!(
        resource.input_properties["debug"].type_spec,
        TypeSpec::primitive("boolean")
    );
    assert!(resource.properties["url"].type_spec.is_any());
}

#[test]
fn test_schema_wire_format() {
    let package = schema(&bind(&webapp_template())).unwrap();
    let json = serde_json::to_value(&package).unwrap();
    let component = &json["resources"]["webapp:index:Component"];

    assert_eq!(json["name"], "webapp");
    assert_eq!(component["isComponent"], true);
    assert_eq!(
        component["inputProperties"]["name"],
        serde_json::json!({
            "type": "string",
            "default": "dev",
            "defaultInfo": {"environment": ["name"]}
        })
    );
    assert_eq!(
        component["properties"]["url"],
        serde_json::json!({"$ref": "pulumi.json#/Any"})
    );
}

#[test]
fn test_synthesis_is_deterministic() {
    let decl = bind(&webapp_template());
    let first = serde_json::to_string(&schema(&decl).unwrap()).unwrap();
    let second = serde_json::to_string(&schema(&decl).unwrap()).unwrap();
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Rejected templates
// ---------------------------------------------------------------------------

#[test]
fn test_list_default_is_rejected_before_synthesis() {
    let root = obj(vec![
        ("name", Node::string("app")),
        (
            "configuration",
            obj(vec![(
                "zones",
                obj(vec![
                    ("type", Node::string("List<String>")),
                    ("default", Node::list(vec![Node::string("a"), Node::string("b")])),
                ]),
            )]),
        ),
    ]);
    let (decl, diags) = parse_template(&root, &BindOptions::default());
    assert!(diags.is_empty(), "{diags}");

    let diags = check_component(&decl);
    assert!(diags.has_errors());
    assert_eq!(diags.as_slice()[0].detail, "found a list");
    assert!(schema(&decl).is_err());
}

#[test]
fn test_all_problems_reported_together() {
    let root = obj(vec![
        ("Name", Node::string("app")),
        ("outptus", Node::null()),
        (
            "configuration",
            obj(vec![
                ("a", obj(vec![("type", Node::string("Strng"))])),
                (
                    "b",
                    obj(vec![
                        ("type", Node::string("Number")),
                        ("default", Node::string("ten")),
                    ]),
                ),
            ]),
        ),
    ]);
    let (_, diags) = parse_template(&root, &BindOptions::default());
    let errors = diags.iter().filter(|d| d.is_error()).count();
    assert_eq!(diags.len(), 4);
    assert_eq!(errors, 2);
}
