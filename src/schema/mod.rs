//! Schema definitions and validation for SCIM resources.
//!
//! This module provides the attribute model, the schema model built on it,
//! the schema registry and the response router.
//!
//! # Key Types
//!
//! - [`Schema`] - SCIM schema definition with attributes and metadata
//! - [`AttributeDefinition`] - Individual attribute specifications and constraints
//! - [`AttributeFactory`] - Resolves a schema fragment to its attribute variant
//! - [`SchemaRegistry`] - Registry for managing and accessing schemas
//!
//! # Examples
//!
//! ```rust
//! use scim_schema::schema::Schema;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema: Schema = serde_json::from_value(json!({
//!     "id": "urn:example:params:scim:schemas:Invoice",
//!     "name": "Invoice",
//!     "attributes": [{"name": "amount", "type": "integer", "required": true}]
//! }))?;
//! assert!(schema.validate(&json!({"amount": -1})).is_ok());
//! assert!(schema.validate(&json!({"amount": true})).is_err());
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod embedded;
pub mod factory;
pub mod model;
pub mod registry;
pub mod response;
pub mod types;


// Re-export the main types for convenience
pub use attribute::{
    AttributeCore, AttributeDefinition, ComplexAttribute, MultiValuedAttribute,
    ReferenceAttribute,
};
pub use factory::AttributeFactory;
pub use model::{Schema, SchemaRole};
pub use registry::{SchemaRegistry, SchemaRegistryBuilder};
pub use response::ScimResponse;
pub use types::{AttributeType, Declared, LocatorPath, Mutability, Returned, Uniqueness};
