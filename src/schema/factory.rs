//! Builds attribute definitions from schema document fragments.

use super::attribute::{
    AttributeCore, AttributeDefinition, ComplexAttribute, MultiValuedAttribute,
    ReferenceAttribute,
};
use super::types::{AttributeType, LocatorPath, render_value};
use crate::error::{SchemaError, SchemaResult};
use log::trace;
use serde_json::{Map, Value};

/// Selects and constructs the [`AttributeDefinition`] variant for a fragment.
pub struct AttributeFactory;

impl AttributeFactory {
    /// Build the attribute described by `fragment`.
    ///
    /// `attribute_type` overrides the fragment's own `type` and is used when
    /// building the element of a multi-valued attribute. Without an override a
    /// fragment with `multiValued: true` becomes a multi-valued wrapper.
    pub fn create(
        fragment: &Map<String, Value>,
        locator_path: &LocatorPath,
        attribute_type: Option<&str>,
        is_parent_multi_valued: bool,
        is_parent_complex: bool,
    ) -> SchemaResult<AttributeDefinition> {
        let multi_valued = fragment.get("multiValued").and_then(Value::as_bool) == Some(true);
        if multi_valued && attribute_type.is_none() {
            trace!(
                "Creating multi-valued attribute {} under {}",
                display_name(fragment),
                locator_path
            );
            return MultiValuedAttribute::new(fragment, locator_path, is_parent_complex)
                .map(AttributeDefinition::MultiValued);
        }

        let kind = Self::resolve_type(fragment, attribute_type, locator_path)?;
        trace!(
            "Creating {} attribute {} under {}",
            kind,
            display_name(fragment),
            locator_path
        );

        let core = |kind| {
            AttributeCore::parse(
                kind,
                fragment,
                locator_path,
                is_parent_multi_valued,
                is_parent_complex,
            )
        };
        let attribute = match kind {
            AttributeType::Binary => AttributeDefinition::Binary(core(kind)),
            AttributeType::Boolean => AttributeDefinition::Boolean(core(kind)),
            AttributeType::Datetime => AttributeDefinition::Datetime(core(kind)),
            AttributeType::Decimal => AttributeDefinition::Decimal(core(kind)),
            AttributeType::Integer => AttributeDefinition::Integer(core(kind)),
            AttributeType::String => AttributeDefinition::String(core(kind)),
            AttributeType::Reference => AttributeDefinition::Reference(ReferenceAttribute::new(
                fragment,
                locator_path,
                is_parent_multi_valued,
                is_parent_complex,
            )),
            AttributeType::Complex => AttributeDefinition::Complex(ComplexAttribute::new(
                fragment,
                locator_path,
                is_parent_multi_valued,
                is_parent_complex,
            )?),
        };
        Ok(attribute)
    }

    /// Resolve the registered type named by `attribute_type` or the fragment's `type`.
    ///
    /// A fragment without a `type` is a string attribute.
    pub fn resolve_type(
        fragment: &Map<String, Value>,
        attribute_type: Option<&str>,
        locator_path: &LocatorPath,
    ) -> SchemaResult<AttributeType> {
        let declared = match attribute_type {
            Some(name) => Value::String(name.to_string()),
            None => match fragment.get("type") {
                None => return Ok(AttributeType::default()),
                Some(declared) => declared.clone(),
            },
        };

        declared
            .as_str()
            .and_then(AttributeType::from_name)
            .ok_or_else(|| SchemaError::UnknownAttributeType {
                attribute_type: render_value(&declared),
                path: locator_path.child(display_name(fragment)),
                expected: AttributeType::names(),
            })
    }
}

fn display_name(fragment: &Map<String, Value>) -> String {
    fragment
        .get("name")
        .map(render_value)
        .unwrap_or_else(|| "null".to_string())
}
