//! Routing a SCIM payload to the schemas it declares.
//!
//! A payload names its schemas in a `schemas` list. Exactly one of them must
//! be a core resource schema; the rest must be known extensions, each of
//! which validates the sub-object stored under its own id.

use super::model::Schema;
use super::registry::SchemaRegistry;
use super::types::render_value;
use crate::error::{ValidationError, ValidationResult};
use log::debug;
use serde_json::{Map, Value};

const RESPONSE_LOCATION: &str = "Scim response";

/// A payload resolved against a core and an extension registry.
#[derive(Debug)]
pub struct ScimResponse<'a> {
    payload: &'a Value,
    core_schema: &'a Schema,
    extension_schemas: Vec<&'a Schema>,
}

impl<'a> ScimResponse<'a> {
    /// Resolve the payload's declared `schemas`.
    pub fn new(
        payload: &'a Value,
        core_schemas: &'a SchemaRegistry,
        extension_schemas: &'a SchemaRegistry,
    ) -> ValidationResult<Self> {
        let declared: &[Value] = payload
            .get("schemas")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        if declared.is_empty() {
            return Err(ValidationError::MissingSchemas);
        }

        let mut cores = Vec::new();
        let mut extensions = Vec::new();
        for entry in declared {
            let Some(uri) = entry.as_str() else {
                return Err(ValidationError::UnknownSchemaUri {
                    uri: render_value(entry),
                });
            };
            if let Some(schema) = core_schemas.get_schema(uri) {
                cores.push(schema);
            } else if let Some(schema) = extension_schemas.get_schema(uri) {
                extensions.push(schema);
            } else {
                return Err(ValidationError::UnknownSchemaUri {
                    uri: uri.to_string(),
                });
            }
        }

        let core_schema = match cores.as_slice() {
            [core] => *core,
            _ => {
                return Err(ValidationError::CoreSchemaCount {
                    schemas: cores.iter().map(|s| s.id().to_string()).collect(),
                });
            }
        };
        debug!(
            "Resolved response to core schema {} with {} extensions",
            core_schema.id(),
            extensions.len()
        );

        Ok(Self {
            payload,
            core_schema,
            extension_schemas: extensions,
        })
    }

    pub fn core_schema(&self) -> &Schema {
        self.core_schema
    }

    pub fn extension_schemas(&self) -> &[&'a Schema] {
        &self.extension_schemas
    }

    /// Validate the payload against its core schema and every extension.
    ///
    /// An extension whose sub-object is absent validates against `{}`.
    pub fn validate(&self) -> ValidationResult<()> {
        let empty = Value::Object(Map::new());
        let mut errors: Vec<ValidationError> = self
            .extension_schemas
            .iter()
            .filter_map(|schema| {
                let section = self.payload.get(schema.id()).unwrap_or(&empty);
                schema.validate(section).err()
            })
            .collect();
        errors.extend(self.core_schema.validate(self.payload).err());
        ValidationError::aggregate(RESPONSE_LOCATION, errors)
    }
}
