//! SCIM 2.0 schema definitions and payload validation for Rust.
//!
//! Checks SCIM schema documents against the RFC 7643 meta-rules and validates
//! resource payloads against the resulting schemas. Neither pass stops at the
//! first problem: every violation beneath a validation boundary is collected
//! into one aggregated error, each pinned to the path of the attribute where
//! it occurred.
//!
//! # Core Components
//!
//! - [`Schema`] - A shape-checked schema and the payload validation entry point
//! - [`AttributeDefinition`] - The closed set of attribute variants
//! - [`SchemaRegistry`] - Schemas keyed by id, bundled or loaded from disk
//! - [`ScimResponse`] - Routes a payload to its core and extension schemas
//!
//! # Quick Start
//!
//! ```rust
//! use scim_schema::{SchemaRegistry, validate};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extensions = SchemaRegistry::extension_schemas()?;
//! let user = json!({
//!     "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User"],
//!     "userName": "bjensen",
//!     "emails": [{"value": "bjensen@example.com", "type": "work", "primary": true}]
//! });
//! validate(&user, &extensions)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod schema;

// Re-export commonly used types for convenience
pub use error::{
    SchemaError, SchemaResult, ScimError, ScimResult, ValidationError, ValidationResult,
};
pub use schema::{
    AttributeDefinition, AttributeFactory, AttributeType, LocatorPath, Schema, SchemaRegistry,
    SchemaRole, ScimResponse,
};

use serde_json::Value;

/// Validate a payload against the bundled core schemas and the given extensions.
///
/// The payload's `schemas` list must name exactly one of the bundled User or
/// Group schemas; every other entry must be registered in `extension_schemas`.
pub fn validate(payload: &Value, extension_schemas: &SchemaRegistry) -> ScimResult<()> {
    let core_schemas = SchemaRegistry::core_schemas()?;
    ScimResponse::new(payload, &core_schemas, extension_schemas)?.validate()?;
    Ok(())
}
