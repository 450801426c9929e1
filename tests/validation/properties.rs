//! Property-based tests for payload validation.
//!
//! Uses proptest to generate attribute definitions and payloads and checks the
//! invariants every validation run must keep.

use proptest::prelude::*;
use serde_json::{Value, json};

use crate::common::{attribute, builders::AttributeBuilder, schema};

/// Attribute types that hold a plain JSON scalar
fn simple_type_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "string", "boolean", "decimal", "integer", "datetime", "binary", "reference",
    ])
}

prop_compose! {
    fn attribute_name_strategy()
        (name in "[a-z][A-Za-z0-9_]{0,12}")
        -> String {
        name
    }
}

/// JSON values of every shape
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::from),
    ];
    leaf.prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn property_absent_optional_attribute_is_accepted(
        name in attribute_name_strategy(),
        attribute_type in simple_type_strategy(),
        multi_valued in any::<bool>(),
    ) {
        let mut builder = AttributeBuilder::new(&name, attribute_type);
        if multi_valued {
            builder = builder.multi_valued();
        }
        let definition = attribute(builder.build(), "urn:test");
        let payload = json!({});
        prop_assert!(definition.validate(&payload).is_ok());
    }

    #[test]
    fn property_absent_required_attribute_is_reported_at_its_path(
        name in attribute_name_strategy(),
        attribute_type in simple_type_strategy(),
    ) {
        let definition = attribute(AttributeBuilder::new(&name, attribute_type).required().build(), "urn:test");
        let error = definition.validate(&json!({})).unwrap_err();
        let path = error.path().map(ToString::to_string);
        prop_assert_eq!(path, Some(format!("urn:test/{name}")));
    }

    #[test]
    fn property_every_integer_is_accepted(value in any::<i64>()) {
        let definition = attribute(AttributeBuilder::new("count", "integer").build(), "urn:test");
        let payload = json!({"count": value});
        prop_assert!(definition.validate(&payload).is_ok());
    }

    #[test]
    fn property_fractional_numbers_are_not_integers(value in -1.0e9f64..1.0e9) {
        prop_assume!(value.fract() != 0.0);
        let definition = attribute(AttributeBuilder::new("count", "integer").build(), "urn:test");
        let payload = json!({"count": value});
        prop_assert!(definition.validate(&payload).is_err());
    }

    #[test]
    fn property_distinct_values_satisfy_uniqueness(
        values in prop::collection::btree_set("[a-z]{1,8}", 1..8),
    ) {
        let definition = attribute(
            AttributeBuilder::new("tags", "string").multi_valued().uniqueness("server").build(),
            "urn:test",
        );
        let tags: Vec<&String> = values.iter().collect();
        let payload = json!({"tags": tags});
        prop_assert!(definition.validate(&payload).is_ok());
    }

    #[test]
    fn property_repeated_value_breaks_uniqueness(
        values in prop::collection::btree_set("[a-z]{1,8}", 1..8),
        repeat in any::<prop::sample::Index>(),
    ) {
        let definition = attribute(
            AttributeBuilder::new("tags", "string").multi_valued().uniqueness("global").build(),
            "urn:test",
        );
        let mut tags: Vec<&String> = values.iter().collect();
        let repeated = *repeat.get(&tags);
        tags.push(repeated);
        let result = definition.validate(&json!({"tags": tags}));
        prop_assert!(result.is_err());
    }

    #[test]
    fn property_validation_never_mutates_the_payload(
        payload in prop::collection::btree_map("[a-z]{1,8}", json_value_strategy(), 0..6),
    ) {
        let widget = schema(crate::common::fixtures::test_fixtures::every_type());
        let payload = Value::Object(payload.into_iter().collect());
        let snapshot = payload.clone();
        let _ = widget.validate(&payload);
        prop_assert_eq!(payload, snapshot);
    }

    #[test]
    fn property_every_violation_is_located_under_the_schema(
        label in json_value_strategy(),
        count in json_value_strategy(),
        built in json_value_strategy(),
    ) {
        let widget = schema(crate::common::fixtures::test_fixtures::every_type());
        if let Err(error) = widget.validate(&json!({"label": label, "count": count, "built": built})) {
            for violation in error.violations() {
                let path = violation.path().map(ToString::to_string).unwrap_or_default();
                prop_assert!(path.starts_with("urn:example:params:scim:schemas:Widget/"), "{}", path);
            }
        }
    }
}
