//! Error types for SCIM schema loading and payload validation.
//!
//! Errors fall into two families that mirror the two validation passes:
//! [`SchemaError`] for schema documents that are themselves malformed, and
//! [`ValidationError`] for payloads that do not conform to a well-formed
//! schema. Both families carry an `Aggregated` variant so that every violation
//! found beneath one validation boundary is reported together, each one
//! pinned to the [`LocatorPath`] where it occurred.

use crate::schema::types::LocatorPath;
use serde_json::Value;
use std::fmt::Display;

/// Reference attached to attribute characteristic violations.
pub const CHARACTERISTICS_REFERENCE: &str = "https://tools.ietf.org/html/rfc7643#section-2.1";

/// Main error type for loading schemas and validating resources.
///
/// This wraps the two validation families together with the I/O and JSON
/// failures that can occur while reading schema documents.
#[derive(Debug, thiserror::Error)]
pub enum ScimError {
    /// A schema document failed its shape check
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A payload failed validation against its schema
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a schema document failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema not found in a registry
    #[error("Schema not found: {schema_id}")]
    SchemaNotFound { schema_id: String },

    /// A schema file could not be loaded
    #[error("Failed to load schema from {path}: {source}")]
    SchemaLoad {
        path: String,
        #[source]
        source: Box<ScimError>,
    },
}

/// Schema-shape errors.
///
/// These are structural problems with a schema document: malformed attribute
/// characteristics, unknown attribute types, unrecognised properties, or an
/// invalid schema `id`/`name`/`description`. A schema that produces any of
/// them is refused at construction.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A schema-level property is missing or malformed
    #[error(
        "Model schema id {schema_id} has property {property} which is expected to be {expected} but got \"{actual}\" ({reference})"
    )]
    InvalidProperty {
        schema_id: String,
        property: &'static str,
        expected: String,
        actual: String,
        reference: &'static str,
    },

    /// An attribute characteristic holds a value outside its accepted set
    #[error(
        "Attribute \"{path}\" has '{characteristic}' property which must be {expected} but got '{actual}' ({})",
        CHARACTERISTICS_REFERENCE
    )]
    CharacteristicNotAllowed {
        path: LocatorPath,
        characteristic: &'static str,
        expected: String,
        actual: String,
    },

    /// A complex attribute declared as a sub-attribute of another complex attribute
    #[error(
        "Attribute \"{path}\" must be a simple type sub-attribute but is a complex type sub-attribute on a complex parent (https://tools.ietf.org/html/rfc7643#section-2.3.8)"
    )]
    NestedComplex { path: LocatorPath },

    /// An attribute definition carries properties the parser does not recognise
    #[error("Unknown properties {keys:?} on attribute '{attribute}' (path: '{path}')")]
    UnknownProperties {
        attribute: String,
        path: LocatorPath,
        keys: Vec<String>,
    },

    /// A schema document carries top-level properties the parser does not recognise
    #[error("Unexpected properties found on schema '{schema_id}': {keys:?}")]
    UnexpectedProperties { schema_id: String, keys: Vec<String> },

    /// The attribute `type` is not one of the registered attribute types
    #[error(
        "Attribute type '{attribute_type}' (path: {path}) is not a valid type - expected one of these: ({})",
        .expected.join(", ")
    )]
    UnknownAttributeType {
        attribute_type: String,
        path: LocatorPath,
        expected: Vec<&'static str>,
    },

    /// Every shape violation found beneath one location
    #[error(
        "Invalid SCIM schema {location}: {} aggregated exceptions found:{}",
        .errors.len(),
        render_nested(.errors)
    )]
    Aggregated {
        location: String,
        errors: Vec<SchemaError>,
    },
}

/// Data-validation errors.
///
/// These occur when a payload doesn't conform to a schema. They are
/// recoverable by the caller and are typically reported back to whoever sent
/// the payload.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A required attribute is absent from the payload
    #[error(
        "'{}:{attribute}' is required at the following location '{path}' but found '{found}'",
        cardinality(.multi_valued)
    )]
    ValueNotFound {
        attribute: String,
        path: LocatorPath,
        multi_valued: bool,
        found: String,
    },

    /// A value does not match the type (or canonical values) its attribute expects
    #[error(
        "'{}: '{value}' (at path: {path}) is expected to be '{expected}'{}",
        cardinality(.multi_valued),
        see_also(.reference)
    )]
    InvalidType {
        path: LocatorPath,
        value: String,
        multi_valued: bool,
        expected: String,
        reference: Option<&'static str>,
        /// The attribute definition that set the expectation
        definition: Value,
    },

    /// A multi-valued attribute repeats a significant value
    #[error(
        "'Multi-value attribute: '{}' (at path: {path}) is not unique as required",
        .values.join(", ")
    )]
    DuplicateValue {
        path: LocatorPath,
        values: Vec<String>,
    },

    /// The payload declares no `schemas`
    #[error("Response has no specified schema")]
    MissingSchemas,

    /// The payload does not resolve to exactly one core schema
    #[error("Response must specify exactly one core schema - found [{}]", .schemas.join(", "))]
    CoreSchemaCount { schemas: Vec<String> },

    /// The payload declares a schema that no registry knows
    #[error("Unknown schema URI: {uri}")]
    UnknownSchemaUri { uri: String },

    /// Every data violation found beneath one location
    #[error(
        "Found {} aggregated exceptions at {location}:{}",
        .errors.len(),
        render_nested(.errors)
    )]
    Aggregated {
        location: String,
        errors: Vec<ValidationError>,
    },
}

fn cardinality(multi_valued: &bool) -> &'static str {
    if *multi_valued {
        "Multi-value attribute"
    } else {
        "Single-value attribute"
    }
}

fn see_also(reference: &Option<&'static str>) -> String {
    reference
        .map(|link| format!(" (see: {link})"))
        .unwrap_or_default()
}

/// Render child errors one per line, indenting their own nested lines.
fn render_nested<E: Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(|error| format!("\n\t{}", error.to_string().replace('\n', "\n\t")))
        .collect()
}

impl SchemaError {
    /// Fold collected violations into `Ok(())` or one aggregated error.
    pub fn aggregate(location: impl Into<String>, errors: Vec<SchemaError>) -> SchemaResult<()> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::Aggregated {
                location: location.into(),
                errors,
            })
        }
    }

    /// Every non-aggregated error beneath this one, depth first.
    pub fn violations(&self) -> Vec<&SchemaError> {
        match self {
            Self::Aggregated { errors, .. } => errors.iter().flat_map(Self::violations).collect(),
            other => vec![other],
        }
    }
}

impl ValidationError {
    /// Fold collected violations into `Ok(())` or one aggregated error.
    pub fn aggregate(
        location: impl Into<String>,
        errors: Vec<ValidationError>,
    ) -> ValidationResult<()> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::Aggregated {
                location: location.into(),
                errors,
            })
        }
    }

    /// Every non-aggregated error beneath this one, depth first.
    pub fn violations(&self) -> Vec<&ValidationError> {
        match self {
            Self::Aggregated { errors, .. } => errors.iter().flat_map(Self::violations).collect(),
            other => vec![other],
        }
    }

    /// Location path of a leaf violation, if it has one.
    pub fn path(&self) -> Option<&LocatorPath> {
        match self {
            Self::ValueNotFound { path, .. }
            | Self::InvalidType { path, .. }
            | Self::DuplicateValue { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl ScimError {
    /// Create a schema not found error
    pub fn schema_not_found(schema_id: impl Into<String>) -> Self {
        Self::SchemaNotFound {
            schema_id: schema_id.into(),
        }
    }

    /// Attach the path of the file being loaded
    pub fn while_loading(path: impl Into<String>, source: ScimError) -> Self {
        Self::SchemaLoad {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

// Result type aliases for convenience
pub type ScimResult<T> = Result<T, ScimError>;
pub type SchemaResult<T> = Result<T, SchemaError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
