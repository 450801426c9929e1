//! The schema model: one named schema and its top-level attributes.

use super::attribute::AttributeDefinition;
use super::factory::AttributeFactory;
use super::types::{Declared, LocatorPath, render_value};
use crate::error::{SchemaError, SchemaResult, ScimResult, ValidationError, ValidationResult};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::io::Read;

static RESOURCE_SCHEMA_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z\s]*[$\-_\w]$").expect("schema name pattern compiles")
});

static SERVICE_PROVIDER_SCHEMA_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w*[$\-_\w]$").expect("service provider name pattern compiles")
});

const SCHEMA_REFERENCE: &str = "https://tools.ietf.org/html/rfc7643#section-7";
const SERVICE_PROVIDER_REFERENCE: &str = "https://tools.ietf.org/html/rfc7643#section-6";

const SCHEMA_PROPERTIES: &[&str] = &["id", "externalId", "meta", "name", "description", "attributes"];

/// Which set of schema-level rules a schema is held to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaRole {
    /// Resource schemas: `name` and `description` are optional.
    #[default]
    Resource,
    /// Service provider meta-schemas: `name` and `description` are mandatory.
    ServiceProvider,
}

/// A shape-checked SCIM schema.
///
/// A `Schema` can only be obtained through a constructor that has already
/// run [`validate_schema`](Schema::validate_schema) successfully, so every
/// instance in circulation is usable for payload validation.
#[derive(Debug, Clone)]
pub struct Schema {
    id: Declared<String>,
    external_id: Option<Value>,
    meta: Option<Value>,
    name: Declared<Option<String>>,
    description: Declared<Option<String>>,
    attributes: Vec<AttributeDefinition>,
    role: SchemaRole,
}

impl Schema {
    /// Build a resource schema from a parsed schema document.
    pub fn new(document: Map<String, Value>) -> SchemaResult<Self> {
        Self::with_role(document, SchemaRole::Resource)
    }

    /// Build a schema held to the rules of `role`.
    pub fn with_role(document: Map<String, Value>, role: SchemaRole) -> SchemaResult<Self> {
        let id = Declared::<String>::mandatory(document.get("id"));
        let location = location_of(&id);
        let root = LocatorPath::root(location.clone());

        let mut errors = Vec::new();
        let mut attributes = Vec::new();
        match document.get("attributes") {
            None | Some(Value::Null) => {}
            Some(Value::Array(fragments)) => {
                for fragment in fragments {
                    let built = match fragment.as_object() {
                        Some(fragment) => AttributeFactory::create(fragment, &root, None, false, false),
                        None => Err(SchemaError::InvalidProperty {
                            schema_id: location.clone(),
                            property: "attributes",
                            expected: "a list of attribute definitions".to_string(),
                            actual: render_value(fragment),
                            reference: SCHEMA_REFERENCE,
                        }),
                    };
                    match built {
                        Ok(attribute) => attributes.push(attribute),
                        Err(error) => errors.push(error),
                    }
                }
            }
            Some(other) => errors.push(SchemaError::InvalidProperty {
                schema_id: location.clone(),
                property: "attributes",
                expected: "a list of attribute definitions".to_string(),
                actual: render_value(other),
                reference: SCHEMA_REFERENCE,
            }),
        }

        let schema = Self {
            id,
            external_id: document.get("externalId").cloned(),
            meta: document.get("meta").cloned(),
            name: Declared::parse(document.get("name"), None),
            description: Declared::parse(document.get("description"), None),
            attributes,
            role,
        };

        match schema.validate_schema() {
            Ok(()) => {}
            Err(SchemaError::Aggregated { errors: found, .. }) => errors.extend(found),
            Err(error) => errors.push(error),
        }

        let unexpected: Vec<String> = document
            .keys()
            .filter(|key| !SCHEMA_PROPERTIES.contains(&key.as_str()))
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            errors.push(SchemaError::UnexpectedProperties {
                schema_id: location.clone(),
                keys: unexpected,
            });
        }

        SchemaError::aggregate(location, errors)?;
        debug!(
            "Loaded schema {} with {} attributes",
            schema.location(),
            schema.attributes.len()
        );
        Ok(schema)
    }

    /// Parse and build a resource schema from JSON text.
    pub fn from_json_str(json: &str) -> ScimResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(value)?)
    }

    /// Parse and build a resource schema from a reader, e.g. an open file.
    pub fn load<R: Read>(reader: R) -> ScimResult<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Ok(Self::from_value(value)?)
    }

    /// Build a resource schema from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> SchemaResult<Self> {
        match value {
            Value::Object(document) => Self::new(document),
            other => Err(SchemaError::InvalidProperty {
                schema_id: "null".to_string(),
                property: "id",
                expected: "a schema document object".to_string(),
                actual: render_value(&other),
                reference: SCHEMA_REFERENCE,
            }),
        }
    }

    /// The schema's identifier. Empty only if construction would have failed.
    pub fn id(&self) -> &str {
        self.id.valid().map(String::as_str).unwrap_or_default()
    }

    pub fn external_id(&self) -> Option<&Value> {
        self.external_id.as_ref()
    }

    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.valid().and_then(|name| name.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.valid().and_then(|d| d.as_deref())
    }

    pub fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }

    /// Look up a top-level attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|a| a.name() == Some(name))
    }

    pub fn role(&self) -> SchemaRole {
        self.role
    }

    fn location(&self) -> String {
        location_of(&self.id)
    }

    /// Check the schema's own properties and every top-level attribute.
    ///
    /// Failures are aggregated under the schema id.
    pub fn validate_schema(&self) -> SchemaResult<()> {
        let mut errors = Vec::new();
        errors.extend(self.check_id());
        errors.extend(self.check_name());
        errors.extend(self.check_description());
        errors.extend(
            self.attributes
                .iter()
                .filter_map(|attribute| attribute.validate_schema().err()),
        );
        SchemaError::aggregate(self.location(), errors)
    }

    /// Validate a payload against every top-level attribute.
    ///
    /// All attribute failures are collected into one error keyed by the
    /// schema id. The payload is only read.
    pub fn validate(&self, payload: &Value) -> ValidationResult<()> {
        if !payload.is_object() {
            return Err(ValidationError::InvalidType {
                path: LocatorPath::root(self.location()),
                value: render_value(payload),
                multi_valued: false,
                expected: "object".to_string(),
                reference: None,
                definition: Value::Null,
            });
        }
        let errors = self
            .attributes
            .iter()
            .filter_map(|attribute| attribute.validate(payload).err())
            .collect();
        ValidationError::aggregate(self.location(), errors)
    }

    fn invalid_property(
        &self,
        property: &'static str,
        expected: &str,
        actual: String,
        reference: &'static str,
    ) -> SchemaError {
        SchemaError::InvalidProperty {
            schema_id: self.location(),
            property,
            expected: expected.to_string(),
            actual,
            reference,
        }
    }

    fn check_id(&self) -> Option<SchemaError> {
        match &self.id {
            Declared::Valid(id) if !id.is_empty() => None,
            Declared::Valid(id) => {
                Some(self.invalid_property("id", "not empty", id.clone(), SCHEMA_REFERENCE))
            }
            Declared::Invalid(raw) => {
                Some(self.invalid_property("id", "a non-empty string", render_value(raw), SCHEMA_REFERENCE))
            }
        }
    }

    fn check_name(&self) -> Option<SchemaError> {
        match (self.role, &self.name) {
            (_, Declared::Invalid(raw)) => Some(self.name_error(render_value(raw))),
            (SchemaRole::Resource, Declared::Valid(None)) => None,
            (SchemaRole::Resource, Declared::Valid(Some(name))) => {
                (!RESOURCE_SCHEMA_NAME.is_match(name)).then(|| self.name_error(name.clone()))
            }
            (SchemaRole::ServiceProvider, Declared::Valid(name)) => {
                let accepted = name
                    .as_deref()
                    .is_some_and(|name| SERVICE_PROVIDER_SCHEMA_NAME.is_match(name));
                (!accepted).then(|| self.name_error(name.clone().unwrap_or_else(|| "null".to_string())))
            }
        }
    }

    fn name_error(&self, actual: String) -> SchemaError {
        match self.role {
            SchemaRole::Resource => self.invalid_property(
                "name",
                "a valid name - must be ALPHA * {nameChar} where nameChar = \"$\" / \"-\" / \"_\" / DIGIT / ALPHA",
                actual,
                SCHEMA_REFERENCE,
            ),
            SchemaRole::ServiceProvider => self.invalid_property(
                "name",
                "a service provider name - must be ALPHA * {nameChar} where nameChar = \"$\" / \"-\" / \"_\" / DIGIT / ALPHA",
                actual,
                SERVICE_PROVIDER_REFERENCE,
            ),
        }
    }

    fn check_description(&self) -> Option<SchemaError> {
        match (self.role, &self.description) {
            (_, Declared::Invalid(raw)) => Some(self.description_error(render_value(raw))),
            (SchemaRole::ServiceProvider, Declared::Valid(None)) => {
                Some(self.description_error("null".to_string()))
            }
            _ => None,
        }
    }

    fn description_error(&self, actual: String) -> SchemaError {
        match self.role {
            SchemaRole::Resource => {
                self.invalid_property("description", "a string", actual, SCHEMA_REFERENCE)
            }
            SchemaRole::ServiceProvider => self.invalid_property(
                "description",
                "a string - service providers must specify the description",
                actual,
                SERVICE_PROVIDER_REFERENCE,
            ),
        }
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let document = Map::<String, Value>::deserialize(deserializer)?;
        Schema::new(document).map_err(serde::de::Error::custom)
    }
}

fn location_of(id: &Declared<String>) -> String {
    match id {
        Declared::Valid(id) => id.clone(),
        Declared::Invalid(raw) => render_value(raw),
    }
}

// Shared schemas are validated from many threads without locking.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Schema>();
};
