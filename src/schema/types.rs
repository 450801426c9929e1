//! Core type definitions shared by the attribute model.
//!
//! This module contains the closed vocabulary of RFC 7643 attribute types and
//! characteristics, the [`Declared`] wrapper that keeps a schema document's
//! raw value around when it does not parse, and the [`LocatorPath`] threaded
//! through every attribute for error reporting.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// SCIM attribute data types.
///
/// Represents the registered attribute types as written in a schema
/// document's `type` property.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// Base64 encoded binary data
    Binary,
    /// Boolean value
    Boolean,
    /// DateTime in `YYYY-MM-DDTHH:MM:SSZ` form
    Datetime,
    /// Real number
    Decimal,
    /// Attribute with sub-attributes
    Complex,
    /// Integer number
    Integer,
    /// URI reference
    Reference,
    /// String value
    String,
}

impl AttributeType {
    /// Every registered type, in registry order.
    pub const ALL: [AttributeType; 8] = [
        Self::Binary,
        Self::Boolean,
        Self::Datetime,
        Self::Decimal,
        Self::Complex,
        Self::Integer,
        Self::Reference,
        Self::String,
    ];

    /// Look up a type by the name used in schema documents.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// The name used for this type in schema documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Boolean => "boolean",
            Self::Datetime => "datetime",
            Self::Decimal => "decimal",
            Self::Complex => "complex",
            Self::Integer => "integer",
            Self::Reference => "reference",
            Self::String => "string",
        }
    }

    /// Names of every registered type.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.into_iter().map(Self::as_str).collect()
    }

    /// RFC 7643 section defining the type.
    pub fn reference(self) -> &'static str {
        match self {
            Self::String => "https://tools.ietf.org/html/rfc7643#section-2.3.1",
            Self::Boolean => "https://tools.ietf.org/html/rfc7643#section-2.3.2",
            Self::Decimal => "https://tools.ietf.org/html/rfc7643#section-2.3.3",
            Self::Integer => "https://tools.ietf.org/html/rfc7643#section-2.3.4",
            Self::Datetime => "https://tools.ietf.org/html/rfc7643#section-2.3.5",
            Self::Binary => "https://tools.ietf.org/html/rfc7643#section-2.3.6",
            Self::Reference => "https://tools.ietf.org/html/rfc7643#section-2.3.7",
            Self::Complex => "https://tools.ietf.org/html/rfc7643#section-2.3.8",
        }
    }

    /// `caseExact` values this type accepts.
    pub fn accepted_case_exact(self) -> &'static [bool] {
        match self {
            Self::Binary | Self::Boolean | Self::Datetime | Self::Decimal => &[false],
            Self::Complex | Self::Integer | Self::Reference | Self::String => &[true, false],
        }
    }

    /// `uniqueness` values this type accepts.
    pub fn accepted_uniqueness(self) -> &'static [Uniqueness] {
        match self {
            Self::Binary | Self::Boolean | Self::Datetime => &[Uniqueness::None],
            _ => &Uniqueness::ALL,
        }
    }

    /// Schema properties recognised only on this type.
    pub(crate) fn extra_properties(self) -> &'static [&'static str] {
        match self {
            Self::Reference => &["referenceTypes"],
            Self::Complex => &["subAttributes"],
            _ => &[],
        }
    }
}

impl Default for AttributeType {
    fn default() -> Self {
        Self::String
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute mutability characteristics.
///
/// Defines whether and how an attribute can be modified.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Mutability {
    /// Read-write attribute (can be modified by clients)
    ReadWrite,
    /// Read-only attribute (managed by server)
    ReadOnly,
    /// Immutable attribute (set once, never modified)
    Immutable,
    /// Write-only attribute (passwords, etc.)
    WriteOnly,
}

impl Mutability {
    pub const ALL: [Mutability; 4] = [
        Self::ReadWrite,
        Self::ReadOnly,
        Self::Immutable,
        Self::WriteOnly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadWrite => "readWrite",
            Self::ReadOnly => "readOnly",
            Self::Immutable => "immutable",
            Self::WriteOnly => "writeOnly",
        }
    }
}

impl Default for Mutability {
    fn default() -> Self {
        Self::ReadWrite
    }
}

/// When an attribute is returned in a response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Returned {
    Default,
    Always,
    Never,
    Request,
}

impl Returned {
    pub const ALL: [Returned; 4] = [Self::Default, Self::Always, Self::Never, Self::Request];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Always => "always",
            Self::Never => "never",
            Self::Request => "request",
        }
    }
}

impl Default for Returned {
    fn default() -> Self {
        Self::Default
    }
}

/// Attribute uniqueness constraints.
///
/// Defines the scope of uniqueness for attribute values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Uniqueness {
    /// No uniqueness constraint
    None,
    /// Unique within the server
    Server,
    /// Globally unique
    Global,
}

impl Uniqueness {
    pub const ALL: [Uniqueness; 3] = [Self::None, Self::Server, Self::Global];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Server => "server",
            Self::Global => "global",
        }
    }
}

impl Default for Uniqueness {
    fn default() -> Self {
        Self::None
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Mutability, Returned, Uniqueness);

/// A property as declared in a schema document.
///
/// Schema documents are checked for shape after they are parsed, so a
/// property that does not deserialize into its expected type is kept as the
/// raw JSON it was written as and reported by the shape check.
#[derive(Debug, Clone, PartialEq)]
pub enum Declared<T> {
    Valid(T),
    Invalid(Value),
}

impl<T: DeserializeOwned> Declared<T> {
    /// Parse an optional property, falling back to `default` when it is absent.
    pub(crate) fn parse(raw: Option<&Value>, default: T) -> Self {
        match raw {
            None => Self::Valid(default),
            Some(value) => Self::from_value(value),
        }
    }

    /// Parse a property that must be present.
    pub(crate) fn mandatory(raw: Option<&Value>) -> Self {
        raw.map(Self::from_value)
            .unwrap_or(Self::Invalid(Value::Null))
    }

    fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone())
            .map(Self::Valid)
            .unwrap_or_else(|_| Self::Invalid(value.clone()))
    }
}

impl<T> Declared<T> {
    pub fn valid(&self) -> Option<&T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Render a JSON value for messages: strings without quotes, everything else as JSON.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Get the type name of a JSON value for error messages.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "decimal",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The chain of attribute names from a schema id down to one attribute.
///
/// Paths only ever grow by producing a new, longer path with [`child`], so a
/// path handed to one branch of the attribute tree can never be observed
/// changing by a sibling.
///
/// [`child`]: LocatorPath::child
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LocatorPath(Vec<String>);

impl LocatorPath {
    pub fn root(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }

    /// A new path extending this one by `segment`.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn ends_with(&self, suffix: &[&str]) -> bool {
        suffix.len() <= self.0.len()
            && self.0[self.0.len() - suffix.len()..]
                .iter()
                .zip(suffix)
                .all(|(segment, expected)| segment == expected)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LocatorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl From<&str> for LocatorPath {
    fn from(segment: &str) -> Self {
        Self::root(segment)
    }
}

impl From<Vec<String>> for LocatorPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}
