//! Schema structure validation tests.
//!
//! Schema-level properties (`id`, `name`, `description`, `attributes`) and
//! the way a schema's violations are gathered into one error.

use serde_json::{Map, Value, json};

use crate::common::{
    builders::{AttributeBuilder, SchemaBuilder},
    schema, schema_error,
};
use scim_schema::error::{SchemaError, ScimError};
use scim_schema::schema::{Schema, SchemaRole};

fn document(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("schema document must be an object"),
    }
}

fn invalid_properties(error: &SchemaError) -> Vec<&'static str> {
    error
        .violations()
        .into_iter()
        .filter_map(|v| match v {
            SchemaError::InvalidProperty { property, .. } => Some(*property),
            _ => None,
        })
        .collect()
}

#[test]
fn test_minimal_schema() {
    let schema = schema(json!({"id": "urn:example:params:scim:schemas:Empty"}));
    assert_eq!(schema.id(), "urn:example:params:scim:schemas:Empty");
    assert!(schema.attributes().is_empty());
    assert!(schema.name().is_none());
    assert_eq!(schema.role(), SchemaRole::Resource);
    assert!(schema.validate(&json!({"anything": "goes"})).is_ok());
}

#[test]
fn test_schema_accessors() {
    let schema = schema(json!({
        "id": "urn:example:params:scim:schemas:Printer",
        "externalId": "printer-1",
        "meta": {"resourceType": "Schema"},
        "name": "Office Printer",
        "description": "A networked printer",
        "attributes": [
            {"name": "model", "type": "string", "required": true},
            {"name": "trays", "type": "integer", "multiValued": true}
        ]
    }));
    assert_eq!(schema.name(), Some("Office Printer"));
    assert_eq!(schema.description(), Some("A networked printer"));
    assert_eq!(schema.external_id(), Some(&json!("printer-1")));
    assert_eq!(schema.meta().unwrap()["resourceType"], "Schema");
    assert_eq!(schema.attributes().len(), 2);
    assert!(schema.attribute("model").unwrap().is_required());
    assert!(schema.attribute("trays").unwrap().is_multi_valued());
    assert!(schema.attribute("colour").is_none());
}

#[test]
fn test_id_is_mandatory() {
    for id in [json!(null), json!(""), json!(42)] {
        let error = schema_error(json!({"id": id, "name": "Printer"}));
        assert_eq!(invalid_properties(&error), vec!["id"], "id {id}");
    }

    let error = schema_error(json!({"name": "Printer"}));
    assert!(error.to_string().starts_with("Invalid SCIM schema null:"));
}

#[test]
fn test_resource_schema_names() {
    for name in ["User", "Enterprise User", "Group2", "Device_"] {
        schema(SchemaBuilder::new("urn:example:params:scim:schemas:Named").name(name).build());
    }
    for name in ["2User", "User!", "", " User"] {
        let error = schema_error(
            SchemaBuilder::new("urn:example:params:scim:schemas:Named").name(name).build(),
        );
        assert_eq!(invalid_properties(&error), vec!["name"], "name {name:?}");
        assert!(error.to_string().contains("a valid name - must be ALPHA"));
    }

    let error = schema_error(
        SchemaBuilder::new("urn:example:params:scim:schemas:Named")
            .property("name", json!(["User"]))
            .build(),
    );
    assert_eq!(invalid_properties(&error), vec!["name"]);
}

#[test]
fn test_description_must_be_a_string() {
    let error = schema_error(
        SchemaBuilder::new("urn:example:params:scim:schemas:Described")
            .property("description", json!({"en": "Described"}))
            .build(),
    );
    assert_eq!(invalid_properties(&error), vec!["description"]);
}

#[test]
fn test_service_provider_role_requires_name_and_description() {
    let bare = document(json!({"id": "urn:ietf:params:scim:schemas:core:2.0:ServiceProviderConfig"}));
    let error = Schema::with_role(bare, SchemaRole::ServiceProvider).unwrap_err();
    assert_eq!(invalid_properties(&error), vec!["name", "description"]);
    let message = error.to_string();
    assert!(message.contains("a service provider name"));
    assert!(message.contains("service providers must specify the description"));
    assert!(message.contains("rfc7643#section-6"));

    let named = document(json!({
        "id": "urn:ietf:params:scim:schemas:core:2.0:ServiceProviderConfig",
        "name": "Service_Provider_Configuration",
        "description": "Schema for representing the service provider's configuration"
    }));
    let schema = Schema::with_role(named, SchemaRole::ServiceProvider).unwrap();
    assert_eq!(schema.role(), SchemaRole::ServiceProvider);
}

#[test]
fn test_service_provider_name_pattern_differs_from_resource_pattern() {
    let spaced = document(json!({
        "id": "urn:example:params:scim:schemas:Config",
        "name": "Service Provider Configuration",
        "description": "Configuration"
    }));
    assert!(Schema::new(spaced.clone()).is_ok());
    let error = Schema::with_role(spaced, SchemaRole::ServiceProvider).unwrap_err();
    assert_eq!(invalid_properties(&error), vec!["name"]);

    let leading_digit = document(json!({
        "id": "urn:example:params:scim:schemas:Config",
        "name": "2Config",
        "description": "Configuration"
    }));
    assert!(Schema::with_role(leading_digit.clone(), SchemaRole::ServiceProvider).is_ok());
    assert!(Schema::new(leading_digit).is_err());
}

#[test]
fn test_unexpected_schema_properties() {
    let error = schema_error(
        SchemaBuilder::new("urn:example:params:scim:schemas:Extra")
            .property("schemas", json!(["urn:ietf:params:scim:schemas:core:2.0:Schema"]))
            .property("version", json!(2))
            .build(),
    );
    let violations = error.violations();
    let [SchemaError::UnexpectedProperties { schema_id, keys }] = violations.as_slice() else {
        panic!("expected unexpected properties, got {error}");
    };
    assert_eq!(schema_id, "urn:example:params:scim:schemas:Extra");
    assert_eq!(keys, &vec!["schemas".to_string(), "version".to_string()]);
}

#[test]
fn test_attributes_must_be_a_list_of_objects() {
    let error = schema_error(json!({
        "id": "urn:example:params:scim:schemas:Broken",
        "attributes": {"name": "model"}
    }));
    assert_eq!(invalid_properties(&error), vec!["attributes"]);

    let error = schema_error(json!({
        "id": "urn:example:params:scim:schemas:Broken",
        "attributes": [{"name": "model"}, "serial"]
    }));
    assert_eq!(invalid_properties(&error), vec!["attributes"]);
    assert!(error.to_string().contains("but got \"serial\""));
}

#[test]
fn test_unknown_attribute_type_lists_registered_types() {
    let error = schema_error(
        SchemaBuilder::new("urn:example:params:scim:schemas:Typed")
            .attribute(AttributeBuilder::new("model", "text"))
            .build(),
    );
    assert_eq!(
        error.violations()[0].to_string(),
        "Attribute type 'text' (path: urn:example:params:scim:schemas:Typed/model) is not a valid type - \
         expected one of these: (binary, boolean, datetime, decimal, complex, integer, reference, string)"
    );
}

#[test]
fn test_capitalised_datetime_is_not_a_type() {
    let error = schema_error(
        SchemaBuilder::new("urn:example:params:scim:schemas:Typed")
            .attribute(AttributeBuilder::new("created", "dateTime"))
            .build(),
    );
    assert!(matches!(
        error.violations().as_slice(),
        [SchemaError::UnknownAttributeType { .. }]
    ));
}

#[test]
fn test_every_schema_violation_is_collected() {
    let error = schema_error(json!({
        "id": "urn:example:params:scim:schemas:Messy",
        "name": "9lives",
        "colour": "red",
        "attributes": [
            {"name": "first", "type": "integer", "mutability": "sometimes"},
            {"name": "second", "type": "uuid"},
            {"name": "third", "type": "boolean", "uniqueness": "global", "caseExact": true}
        ]
    }));

    let message = error.to_string();
    assert!(message.starts_with("Invalid SCIM schema urn:example:params:scim:schemas:Messy:"));
    assert!(message.contains("2 aggregated exceptions found"));
    assert_eq!(error.violations().len(), 6);
    assert!(error.violations().iter().any(|v| matches!(v, SchemaError::UnexpectedProperties { .. })));
    assert!(error.violations().iter().any(|v| matches!(v, SchemaError::UnknownAttributeType { .. })));
}

#[test]
fn test_constructors_agree() {
    let text = r#"{
        "id": "urn:example:params:scim:schemas:Badge",
        "name": "Badge",
        "attributes": [{"name": "number", "type": "integer", "required": true}]
    }"#;

    let from_str = Schema::from_json_str(text).unwrap();
    let from_reader = Schema::load(text.as_bytes()).unwrap();
    let from_serde: Schema = serde_json::from_str(text).unwrap();
    for schema in [&from_str, &from_reader, &from_serde] {
        assert_eq!(schema.id(), "urn:example:params:scim:schemas:Badge");
        assert!(schema.validate(&json!({"number": 7})).is_ok());
        assert!(schema.validate(&json!({})).is_err());
    }
}

#[test]
fn test_constructor_failures() {
    assert!(matches!(Schema::from_json_str("{not json"), Err(ScimError::Json(_))));
    assert!(matches!(
        Schema::from_json_str(r#"{"id": ""}"#),
        Err(ScimError::Schema(SchemaError::Aggregated { .. }))
    ));
    assert!(Schema::from_value(json!(["urn:example"])).is_err());

    let error = serde_json::from_str::<Schema>(r#"{"id": "urn:x", "name": "1x"}"#).unwrap_err();
    assert!(error.to_string().contains("Invalid SCIM schema urn:x"));
}

#[test]
fn test_schema_location_is_stated_once() {
    let error = schema_error(
        SchemaBuilder::new("urn:example:params:scim:schemas:Named")
            .name("2User")
            .build(),
    );
    let message = error.to_string();
    assert!(message.starts_with("Invalid SCIM schema urn:example:params:scim:schemas:Named: 1 aggregated exceptions found:"));
    assert_eq!(message.matches("Invalid SCIM schema urn:example:params:scim:schemas:Named").count(), 1, "{message}");
    let SchemaError::Aggregated { errors, .. } = &error else {
        panic!("expected an aggregated error");
    };
    assert!(matches!(errors.as_slice(), [SchemaError::InvalidProperty { property: "name", .. }]));
}
