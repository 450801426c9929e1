//! Common test utilities for SCIM schema and payload validation testing.
//!
//! This module provides assertion macros, builders, fixtures and small helpers
//! shared by every validation category.

use scim_schema::error::{SchemaError, ValidationError};
use scim_schema::schema::{AttributeDefinition, AttributeFactory, LocatorPath, Schema};
use serde_json::Value;


/// Initialise `env_logger` once so `RUST_LOG=debug cargo test` shows library logs.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a schema from a JSON document, panicking with the aggregated error on failure.
pub fn schema(document: Value) -> Schema {
    init_logging();
    serde_json::from_value(document).unwrap_or_else(|e| panic!("schema should build: {e}"))
}

/// Build a schema from a JSON document, expecting the shape check to fail.
pub fn schema_error(document: Value) -> SchemaError {
    init_logging();
    let Value::Object(document) = document else {
        panic!("schema document must be an object");
    };
    match Schema::new(document) {
        Ok(schema) => panic!("expected schema {} to be rejected", schema.id()),
        Err(error) => error,
    }
}

/// Build one attribute rooted at `root`.
pub fn attribute(fragment: Value, root: &str) -> AttributeDefinition {
    let Value::Object(fragment) = fragment else {
        panic!("attribute fragment must be an object");
    };
    AttributeFactory::create(&fragment, &LocatorPath::root(root), None, false, false)
        .unwrap_or_else(|e| panic!("attribute should build: {e}"))
}

/// Rendered paths of every leaf violation, in reporting order.
pub fn violation_paths(error: &ValidationError) -> Vec<String> {
    error
        .violations()
        .into_iter()
        .filter_map(|violation| violation.path().map(ToString::to_string))
        .collect()
}

/// Custom assertion macro for specific error messages
#[macro_export]
macro_rules! assert_error_message_contains {
    ($result:expr, $substring:expr) => {
        match $result {
            Err(err) => assert!(
                err.to_string().contains($substring),
                "Error message '{}' does not contain '{}'",
                err.to_string(),
                $substring
            ),
            Ok(_) => panic!(
                "Expected error containing '{}', but validation passed",
                $substring
            ),
        }
    };
}

/// Custom assertion macro for successful validation
#[macro_export]
macro_rules! assert_validation_success {
    ($result:expr) => {
        match $result {
            Ok(_) => {
                // Success as expected
            }
            Err(err) => panic!("Expected validation to succeed, but got error: {}", err),
        }
    };
}

/// Custom assertion macro for a leaf violation somewhere beneath an aggregated error
#[macro_export]
macro_rules! assert_violation {
    ($result:expr, $violation:pat) => {
        match $result {
            Ok(_) => panic!("Expected validation error, but validation passed"),
            Err(err) => assert!(
                err.violations().into_iter().any(|v| matches!(v, $violation)),
                "Expected violation {} in {}",
                stringify!($violation),
                err
            ),
        }
    };
}
