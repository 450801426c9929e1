//! Response routing tests.
//!
//! A payload's `schemas` list must resolve to exactly one core schema plus any
//! number of known extensions; each extension validates its own section.

use serde_json::json;

use crate::common::{
    builders::{ENTERPRISE_USER_SCHEMA, GROUP_SCHEMA, GroupBuilder, USER_SCHEMA, UserBuilder},
    fixtures::{rfc_examples, test_fixtures},
    init_logging, schema, violation_paths,
};
use crate::{assert_error_message_contains, assert_validation_success, assert_violation};
use scim_schema::error::{ScimError, ValidationError};
use scim_schema::{SchemaRegistry, ScimResponse};

struct Registries {
    core: SchemaRegistry,
    extensions: SchemaRegistry,
}

fn registries() -> Registries {
    init_logging();
    let mut extensions = SchemaRegistry::extension_schemas().expect("bundled extensions load");
    extensions.add_schema(schema(test_fixtures::account_extension()));
    Registries {
        core: SchemaRegistry::core_schemas().expect("bundled core schemas load"),
        extensions,
    }
}

impl Registries {
    fn validate(&self, payload: &serde_json::Value) -> Result<(), ValidationError> {
        ScimResponse::new(payload, &self.core, &self.extensions)?.validate()
    }
}

#[test]
fn test_missing_or_empty_schemas() {
    let registries = registries();
    for payload in [
        UserBuilder::new().without_schemas().build(),
        UserBuilder::new().with_schemas(&[]).build(),
        json!({"schemas": "urn:ietf:params:scim:schemas:core:2.0:User"}),
    ] {
        let result = registries.validate(&payload);
        assert!(matches!(result, Err(ValidationError::MissingSchemas)), "{payload}");
    }
    assert_error_message_contains!(
        registries.validate(&json!({})),
        "Response has no specified schema"
    );
}

#[test]
fn test_exactly_one_core_schema() {
    let registries = registries();

    let both = UserBuilder::new().with_schemas(&[USER_SCHEMA, GROUP_SCHEMA]).build();
    assert_error_message_contains!(
        registries.validate(&both),
        "Response must specify exactly one core schema - found [urn:ietf:params:scim:schemas:core:2.0:User, urn:ietf:params:scim:schemas:core:2.0:Group]"
    );

    let extension_only = UserBuilder::new().with_schemas(&[ENTERPRISE_USER_SCHEMA]).build();
    assert!(matches!(
        registries.validate(&extension_only),
        Err(ValidationError::CoreSchemaCount { schemas }) if schemas.is_empty()
    ));
}

#[test]
fn test_unknown_schema_uri() {
    let registries = registries();
    let payload = UserBuilder::new()
        .with_schemas(&[USER_SCHEMA, "urn:example:params:scim:schemas:extension:Unknown"])
        .build();
    let Err(ValidationError::UnknownSchemaUri { uri }) = registries.validate(&payload) else {
        panic!("expected an unknown schema uri");
    };
    assert_eq!(uri, "urn:example:params:scim:schemas:extension:Unknown");
}

#[test]
fn test_non_string_schema_entries_are_unknown() {
    let registries = registries();
    for (schemas, rendered) in [
        (json!([USER_SCHEMA, 5]), "5"),
        (json!([5]), "5"),
        (json!([{"id": USER_SCHEMA}]), "{\"id\":\"urn:ietf:params:scim:schemas:core:2.0:User\"}"),
    ] {
        let payload = json!({"schemas": schemas, "userName": "bjensen"});
        let Err(ValidationError::UnknownSchemaUri { uri }) = registries.validate(&payload) else {
            panic!("expected an unknown schema uri for {payload}");
        };
        assert_eq!(uri, rendered);
    }
}

#[test]
fn test_resolution_exposes_schemas() {
    let registries = registries();
    let payload = UserBuilder::new()
        .with_enterprise(rfc_examples::enterprise_section())
        .build();
    let response = ScimResponse::new(&payload, &registries.core, &registries.extensions).unwrap();
    assert_eq!(response.core_schema().id(), USER_SCHEMA);
    let extension_ids: Vec<&str> = response.extension_schemas().iter().map(|s| s.id()).collect();
    assert_eq!(extension_ids, vec![ENTERPRISE_USER_SCHEMA]);
}

#[test]
fn test_rfc_resources_validate() {
    let registries = registries();

    let mut full = rfc_examples::user_full();
    full["schemas"] = json!([USER_SCHEMA, ENTERPRISE_USER_SCHEMA]);
    full[ENTERPRISE_USER_SCHEMA] = rfc_examples::enterprise_section();
    assert_validation_success!(registries.validate(&full));

    assert_validation_success!(registries.validate(&rfc_examples::group()));
    assert_validation_success!(registries.validate(
        &GroupBuilder::new()
            .with_member("2819c223-7f76-453a-919d-413861904646", "User")
            .with_member("6c5bb468-14b2-4183-baf2-06d523e03bd3", "Group")
            .build()
    ));
}

#[test]
fn test_extension_section_is_validated() {
    let registries = registries();
    let payload = UserBuilder::new()
        .with_enterprise(json!({"employeeNumber": 701984, "manager": {"value": 26118915}}))
        .build();

    let error = registries.validate(&payload).unwrap_err();
    assert_eq!(
        violation_paths(&error),
        vec![
            format!("{ENTERPRISE_USER_SCHEMA}/employeeNumber"),
            format!("{ENTERPRISE_USER_SCHEMA}/manager/value"),
        ]
    );
    assert!(error.to_string().starts_with("Found 1 aggregated exceptions at Scim response"));
}

#[test]
fn test_absent_extension_section_validates_as_empty() {
    let registries = registries();
    let payload = UserBuilder::new()
        .with_schemas(&[USER_SCHEMA, test_fixtures::ACCOUNT_SCHEMA])
        .build();
    assert_validation_success!(registries.validate(&payload));

    let mut payload = payload;
    payload[test_fixtures::ACCOUNT_SCHEMA] = json!({"package": {}});
    assert_error_message_contains!(
        registries.validate(&payload),
        "'Single-value attribute:accountPackage' is required at the following location 'urn:huddle:params:scim:schemas:extension:2.0:Account/package/accountPackage' but found '{}'"
    );

    payload[test_fixtures::ACCOUNT_SCHEMA] = json!({"package": {"accountPackage": "Business", "seats": 5}});
    assert_validation_success!(registries.validate(&payload));
}

#[test]
fn test_extension_and_core_errors_are_reported_together() {
    let registries = registries();
    let payload = UserBuilder::new()
        .without_username()
        .with_schemas(&[USER_SCHEMA, test_fixtures::ACCOUNT_SCHEMA])
        .build();
    let mut payload = payload;
    payload[test_fixtures::ACCOUNT_SCHEMA] = json!({"package": {"accountPackage": "gold"}});

    let result = registries.validate(&payload);
    assert_violation!(&result, ValidationError::ValueNotFound { .. });
    assert_violation!(&result, ValidationError::InvalidType { .. });
    let error = result.unwrap_err();
    assert!(error.to_string().starts_with("Found 2 aggregated exceptions at Scim response"));
    assert_eq!(
        violation_paths(&error),
        vec![
            format!("{}/package/accountPackage", test_fixtures::ACCOUNT_SCHEMA),
            format!("{USER_SCHEMA}/userName"),
        ]
    );
}

#[test]
fn test_crate_level_validate() {
    let extensions = SchemaRegistry::extension_schemas().unwrap();

    let user = UserBuilder::new()
        .with_name("Barbara", "Jensen")
        .with_active(json!(true))
        .with_enterprise(rfc_examples::enterprise_section())
        .build();
    assert!(scim_schema::validate(&user, &extensions).is_ok());

    let user = UserBuilder::new().with_username(json!(42)).build();
    let Err(ScimError::Validation(error)) = scim_schema::validate(&user, &extensions) else {
        panic!("expected a validation error");
    };
    assert_eq!(
        violation_paths(&error),
        vec![format!("{USER_SCHEMA}/userName")]
    );

    let user = UserBuilder::new().with_created("2010-01-23").build();
    assert_error_message_contains!(
        scim_schema::validate(&user, &extensions),
        "urn:ietf:params:scim:schemas:core:2.0:User/meta/created"
    );

    let user = UserBuilder::new()
        .with_schemas(&[USER_SCHEMA, test_fixtures::ACCOUNT_SCHEMA])
        .build();
    assert!(matches!(
        scim_schema::validate(&user, &SchemaRegistry::empty()),
        Err(ScimError::Validation(ValidationError::UnknownSchemaUri { .. }))
    ));
}
