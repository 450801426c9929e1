//! Attribute definitions and the recursive validation algorithm.
//!
//! An [`AttributeDefinition`] is one of a closed set of variants: the seven
//! primitive types, the complex type with its sub-attributes, and the
//! multi-valued wrapper around a single element attribute. Every variant
//! answers the same two questions:
//!
//! - [`validate_schema`](AttributeDefinition::validate_schema): is the schema
//!   fragment this attribute was built from well formed?
//! - [`validate`](AttributeDefinition::validate): does a payload carry an
//!   acceptable value for this attribute?
//!
//! Neither question stops at the first problem. Each level collects the
//! violations of its children and folds them into one aggregated error keyed
//! by its own [`LocatorPath`]. Payloads are only ever borrowed.

use super::factory::AttributeFactory;
use super::types::{
    AttributeType, Declared, LocatorPath, Mutability, Returned, Uniqueness, render_value,
    value_type_name,
};
use crate::error::{SchemaError, SchemaResult, ValidationError, ValidationResult};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// ALPHA *(nameChar) where nameChar = "$" / "-" / "_" / DIGIT / ALPHA
static ATTRIBUTE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][$\-_\w]*$").expect("attribute name pattern compiles"));

const ATTRIBUTE_NAME_RULE: &str = "a valid name e.g. must be ALPHA * {nameChar} where nameChar = \"$\" / \"-\" / \"_\" / DIGIT / ALPHA";

/// YYYY-MM-DDTHH:MM:SSZ with ASCII digits only; chrono checks the calendar.
static DATETIME_LAYOUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}Z$")
        .expect("datetime layout pattern compiles")
});

const SCIM_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const SCIM_DATETIME_EXAMPLE: &str = "2008-01-23T04:56:22Z";

const MULTI_VALUED_REFERENCE: &str = "https://tools.ietf.org/html/rfc7643#section-2.4";

/// Properties every attribute definition recognises.
const COMMON_PROPERTIES: &[&str] = &[
    "name",
    "id",
    "type",
    "description",
    "required",
    "canonicalValues",
    "caseExact",
    "mutability",
    "returned",
    "uniqueness",
    "multiValued",
];

/// Companion properties consumed by the multi-valued wrapper.
const MULTI_VALUED_PROPERTIES: &[&str] = &["primary", "display", "value", "ref"];

/// Characteristics shared by every attribute variant.
///
/// Each characteristic is kept as it was declared; values outside their
/// accepted set are reported by the shape check rather than at parse time.
#[derive(Debug, Clone)]
pub struct AttributeCore {
    name: Declared<String>,
    id: Option<Value>,
    declared_type: Declared<String>,
    description: Declared<Option<String>>,
    required: Declared<bool>,
    canonical_values: Declared<Option<Vec<String>>>,
    case_exact: Declared<bool>,
    mutability: Declared<Mutability>,
    returned: Declared<Returned>,
    uniqueness: Declared<Uniqueness>,
    multi_valued: Declared<bool>,
    path: LocatorPath,
    is_parent_multi_valued: bool,
    is_parent_complex: bool,
    definition: Value,
    unknown_properties: Vec<String>,
}

impl AttributeCore {
    pub(crate) fn parse(
        kind: AttributeType,
        fragment: &Map<String, Value>,
        parent_path: &LocatorPath,
        is_parent_multi_valued: bool,
        is_parent_complex: bool,
    ) -> Self {
        let name = Declared::<String>::mandatory(fragment.get("name"));
        let path = parent_path.child(path_segment(&name));
        let unknown_properties = fragment
            .keys()
            .filter(|key| {
                !COMMON_PROPERTIES.contains(&key.as_str())
                    && !kind.extra_properties().contains(&key.as_str())
            })
            .cloned()
            .collect();

        Self {
            name,
            id: fragment.get("id").cloned(),
            declared_type: Declared::parse(fragment.get("type"), "string".to_string()),
            description: Declared::parse(fragment.get("description"), None),
            required: Declared::parse(fragment.get("required"), false),
            canonical_values: Declared::parse(fragment.get("canonicalValues"), None),
            case_exact: Declared::parse(fragment.get("caseExact"), false),
            mutability: Declared::parse(fragment.get("mutability"), Mutability::default()),
            returned: Declared::parse(fragment.get("returned"), Returned::default()),
            uniqueness: Declared::parse(fragment.get("uniqueness"), Uniqueness::default()),
            multi_valued: Declared::parse(fragment.get("multiValued"), false),
            path,
            is_parent_multi_valued,
            is_parent_complex,
            definition: Value::Object(fragment.clone()),
            unknown_properties,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.valid().map(String::as_str)
    }

    pub fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.valid().and_then(|d| d.as_deref())
    }

    pub fn is_required(&self) -> bool {
        matches!(self.required, Declared::Valid(true))
    }

    pub fn canonical_values(&self) -> Option<&[String]> {
        self.canonical_values.valid().and_then(|cv| cv.as_deref())
    }

    pub fn is_case_exact(&self) -> bool {
        matches!(self.case_exact, Declared::Valid(true))
    }

    pub fn mutability(&self) -> Option<Mutability> {
        self.mutability.valid().copied()
    }

    pub fn returned(&self) -> Option<Returned> {
        self.returned.valid().copied()
    }

    pub fn uniqueness(&self) -> Option<Uniqueness> {
        self.uniqueness.valid().copied()
    }

    pub fn is_multi_valued(&self) -> bool {
        matches!(self.multi_valued, Declared::Valid(true))
    }

    pub fn path(&self) -> &LocatorPath {
        &self.path
    }

    pub fn is_parent_multi_valued(&self) -> bool {
        self.is_parent_multi_valued
    }

    pub fn is_parent_complex(&self) -> bool {
        self.is_parent_complex
    }

    /// The schema fragment this attribute was built from.
    pub fn definition(&self) -> &Value {
        &self.definition
    }

    fn name_label(&self) -> String {
        path_segment(&self.name)
    }

    /// Check every characteristic independently, collecting each failure.
    fn shape_violations(&self, kind: AttributeType) -> Vec<SchemaError> {
        let mut errors = Vec::new();

        let name_exempt = kind == AttributeType::Reference && self.name() == Some("$ref");
        let name_ok = self.name().is_some_and(|name| ATTRIBUTE_NAME.is_match(name));
        if !name_exempt && !name_ok {
            errors.push(self.not_allowed("name", ATTRIBUTE_NAME_RULE, self.raw_name()));
        }

        if let Declared::Invalid(raw) = &self.required {
            errors.push(self.not_allowed("required", "boolean", render_value(raw)));
        }

        if let Declared::Invalid(raw) = &self.canonical_values {
            errors.push(self.not_allowed("canonicalValues", "none or valid list", render_value(raw)));
        }

        match &self.case_exact {
            Declared::Valid(flag) if kind.accepted_case_exact().contains(flag) => {}
            Declared::Valid(flag) => errors.push(self.not_allowed(
                "caseExact",
                &one_of(kind.accepted_case_exact()),
                flag.to_string(),
            )),
            Declared::Invalid(raw) => errors.push(self.not_allowed(
                "caseExact",
                &one_of(kind.accepted_case_exact()),
                render_value(raw),
            )),
        }

        if let Declared::Invalid(raw) = &self.mutability {
            errors.push(self.not_allowed("mutability", &one_of(&Mutability::ALL), render_value(raw)));
        }

        if let Declared::Invalid(raw) = &self.returned {
            errors.push(self.not_allowed("returned", &one_of(&Returned::ALL), render_value(raw)));
        }

        match &self.uniqueness {
            Declared::Valid(uniqueness) if kind.accepted_uniqueness().contains(uniqueness) => {}
            Declared::Valid(uniqueness) => errors.push(self.not_allowed(
                "uniqueness",
                &one_of(kind.accepted_uniqueness()),
                uniqueness.to_string(),
            )),
            Declared::Invalid(raw) => errors.push(self.not_allowed(
                "uniqueness",
                &one_of(kind.accepted_uniqueness()),
                render_value(raw),
            )),
        }

        if let Declared::Invalid(raw) = &self.declared_type {
            errors.push(self.not_allowed("type", "a string", value_type_name(raw).to_string()));
        }

        if let Declared::Invalid(raw) = &self.description {
            errors.push(self.not_allowed("description", "a string", render_value(raw)));
        }

        if let Declared::Invalid(raw) = &self.multi_valued {
            errors.push(self.not_allowed("multiValued", "boolean", render_value(raw)));
        }

        if !self.unknown_properties.is_empty() {
            errors.push(SchemaError::UnknownProperties {
                attribute: self.name_label(),
                path: self.path.clone(),
                keys: self.unknown_properties.clone(),
            });
        }

        errors
    }

    fn raw_name(&self) -> String {
        match &self.name {
            Declared::Valid(name) => name.clone(),
            Declared::Invalid(raw) => render_value(raw),
        }
    }

    fn not_allowed(&self, characteristic: &'static str, expected: &str, actual: String) -> SchemaError {
        SchemaError::CharacteristicNotAllowed {
            path: self.path.clone(),
            characteristic,
            expected: expected.to_string(),
            actual,
        }
    }

    fn type_mismatch(&self, value: &Value, expected: impl Into<String>, reference: &'static str) -> ValidationError {
        ValidationError::InvalidType {
            path: self.path.clone(),
            value: format!("({}){}", value_type_name(value), render_value(value)),
            multi_valued: self.is_multi_valued(),
            expected: expected.into(),
            reference: Some(reference),
            definition: self.definition.clone(),
        }
    }

    fn not_found(&self, found: &Value) -> ValidationError {
        ValidationError::ValueNotFound {
            attribute: self.name_label(),
            path: self.path.clone(),
            multi_valued: self.is_multi_valued(),
            found: found.to_string(),
        }
    }

    /// Absence is tolerated unless the attribute is required.
    fn absent(&self, found: &Value) -> ValidationResult<()> {
        if self.is_required() {
            Err(self.not_found(found))
        } else {
            Ok(())
        }
    }

    fn require_type(&self, kind: AttributeType, value: &Value, accepted: bool, expected: &str) -> ValidationResult<()> {
        if accepted {
            Ok(())
        } else {
            Err(self.type_mismatch(value, expected, kind.reference()))
        }
    }

    fn validate_string(&self, value: &Value) -> ValidationResult<()> {
        let Some(text) = value.as_str() else {
            return Err(self.type_mismatch(value, "type string", AttributeType::String.reference()));
        };
        let Some(canonical) = self.canonical_values().filter(|cv| !cv.is_empty()) else {
            return Ok(());
        };

        let fold = |s: &str| if self.is_case_exact() { s.to_string() } else { s.to_lowercase() };
        let allowed: Vec<String> = canonical.iter().map(|cv| fold(cv)).collect();
        if allowed.contains(&fold(text)) {
            Ok(())
        } else {
            Err(self.type_mismatch(
                value,
                format!("one of {}", allowed.join(", ")),
                AttributeType::String.reference(),
            ))
        }
    }
}

/// A reference attribute and the resource kinds it may point at.
#[derive(Debug, Clone)]
pub struct ReferenceAttribute {
    core: AttributeCore,
    reference_types: Declared<Option<Vec<String>>>,
}

impl ReferenceAttribute {
    pub(crate) fn new(
        fragment: &Map<String, Value>,
        parent_path: &LocatorPath,
        is_parent_multi_valued: bool,
        is_parent_complex: bool,
    ) -> Self {
        Self {
            core: AttributeCore::parse(
                AttributeType::Reference,
                fragment,
                parent_path,
                is_parent_multi_valued,
                is_parent_complex,
            ),
            reference_types: Declared::parse(fragment.get("referenceTypes"), None),
        }
    }

    pub fn reference_types(&self) -> Option<&[String]> {
        self.reference_types.valid().and_then(|rt| rt.as_deref())
    }

    fn validate_schema(&self) -> SchemaResult<()> {
        let mut errors = self.core.shape_violations(AttributeType::Reference);
        if let Declared::Invalid(raw) = &self.reference_types {
            errors.push(self.core.not_allowed(
                "referenceTypes",
                "none or a list of resource kinds",
                render_value(raw),
            ));
        }
        SchemaError::aggregate(self.core.path.to_string(), errors)
    }
}

/// A complex attribute and its (simple) sub-attributes.
#[derive(Debug, Clone)]
pub struct ComplexAttribute {
    core: AttributeCore,
    sub_attributes: Vec<AttributeDefinition>,
}

impl ComplexAttribute {
    pub(crate) fn new(
        fragment: &Map<String, Value>,
        parent_path: &LocatorPath,
        is_parent_multi_valued: bool,
        is_parent_complex: bool,
    ) -> SchemaResult<Self> {
        let core = AttributeCore::parse(
            AttributeType::Complex,
            fragment,
            parent_path,
            is_parent_multi_valued,
            is_parent_complex,
        );

        let mut errors = Vec::new();
        let entries: &[Value] = match fragment.get("subAttributes") {
            None => &[],
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                errors.push(core.not_allowed(
                    "subAttributes",
                    "a list of attribute definitions",
                    render_value(other),
                ));
                &[]
            }
        };

        let mut sub_attributes = Vec::with_capacity(entries.len());
        for entry in entries {
            let built = match entry.as_object() {
                Some(sub_fragment) => AttributeFactory::create(
                    sub_fragment,
                    &core.path,
                    None,
                    is_parent_multi_valued,
                    true,
                ),
                None => Err(core.not_allowed(
                    "subAttributes",
                    "a list of attribute definitions",
                    render_value(entry),
                )),
            };
            match built {
                Ok(sub_attribute) => sub_attributes.push(sub_attribute),
                Err(error) => errors.push(error),
            }
        }

        // A failed build never reaches validate_schema, so the parent's own checks run here.
        if !errors.is_empty() {
            let mut violations = Self::own_violations(&core);
            violations.append(&mut errors);
            return Err(SchemaError::Aggregated {
                location: core.path.to_string(),
                errors: violations,
            });
        }

        Ok(Self {
            core,
            sub_attributes,
        })
    }

    pub fn sub_attributes(&self) -> &[AttributeDefinition] {
        &self.sub_attributes
    }

    /// Look up a sub-attribute by name.
    pub fn sub_attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.sub_attributes.iter().find(|sa| sa.name() == Some(name))
    }

    /// Violations of the complex attribute itself, sub-attributes aside.
    fn own_violations(core: &AttributeCore) -> Vec<SchemaError> {
        let mut errors = Vec::new();
        if core.is_parent_complex {
            errors.push(SchemaError::NestedComplex {
                path: core.path.clone(),
            });
        }
        errors.extend(core.shape_violations(AttributeType::Complex));
        errors
    }

    fn validate_schema(&self) -> SchemaResult<()> {
        let mut errors = Self::own_violations(&self.core);
        errors.extend(
            self.sub_attributes
                .iter()
                .filter_map(|sa| sa.validate_schema().err()),
        );
        SchemaError::aggregate(self.core.path.to_string(), errors)
    }

    fn validate_value(&self, value: &Value) -> ValidationResult<()> {
        if !value.is_object() {
            return Err(self.core.type_mismatch(value, "complex", AttributeType::Complex.reference()));
        }
        let errors = self
            .sub_attributes
            .iter()
            .filter_map(|sa| sa.validate(value).err())
            .collect();
        ValidationError::aggregate(self.core.path.to_string(), errors)
    }
}

/// A multi-valued wrapper around one element attribute.
///
/// The wrapper has no characteristics of its own: its name, requiredness,
/// uniqueness and the rest are those of the element it wraps.
#[derive(Debug, Clone)]
pub struct MultiValuedAttribute {
    element: Box<AttributeDefinition>,
    primary: Option<Value>,
    display: Option<Value>,
    value: Option<Value>,
    reference: Option<Value>,
}

impl MultiValuedAttribute {
    pub(crate) fn new(
        fragment: &Map<String, Value>,
        parent_path: &LocatorPath,
        is_parent_complex: bool,
    ) -> SchemaResult<Self> {
        let kind = AttributeFactory::resolve_type(fragment, None, parent_path)?;
        let element_fragment: Map<String, Value> = fragment
            .iter()
            .filter(|(key, _)| !MULTI_VALUED_PROPERTIES.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let element = AttributeFactory::create(
            &element_fragment,
            parent_path,
            Some(kind.as_str()),
            true,
            is_parent_complex,
        )?;

        Ok(Self {
            element: Box::new(element),
            primary: fragment.get("primary").cloned(),
            display: fragment.get("display").cloned(),
            value: fragment.get("value").cloned(),
            reference: fragment.get("ref").cloned(),
        })
    }

    /// The attribute every list member is validated against.
    pub fn element(&self) -> &AttributeDefinition {
        &self.element
    }

    pub fn primary(&self) -> Option<&Value> {
        self.primary.as_ref()
    }

    pub fn display(&self) -> Option<&Value> {
        self.display.as_ref()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn reference(&self) -> Option<&Value> {
        self.reference.as_ref()
    }

    fn core(&self) -> &AttributeCore {
        self.element.core()
    }

    fn validate_value(&self, value: &Value) -> ValidationResult<()> {
        let Value::Array(items) = value else {
            return Err(self.core().type_mismatch(value, "list", MULTI_VALUED_REFERENCE));
        };

        let elements: Vec<&Value> = items.iter().filter(|item| !is_placeholder(item)).collect();
        if elements.is_empty() {
            return self.core().absent(value);
        }

        let mut errors = Vec::new();
        if let Some(duplicate) = self.duplicate_values(&elements) {
            errors.push(duplicate);
        }
        errors.extend(
            elements
                .iter()
                .filter_map(|item| self.element.validate_value(item).err()),
        );
        ValidationError::aggregate(self.core().path.to_string(), errors)
    }

    fn duplicate_values(&self, elements: &[&Value]) -> Option<ValidationError> {
        let enforced = matches!(
            self.core().uniqueness(),
            Some(Uniqueness::Server | Uniqueness::Global)
        );
        if !enforced {
            return None;
        }

        let mut counts: Vec<(&Value, usize)> = Vec::new();
        for significant in elements.iter().filter_map(|item| self.significant_value(item)) {
            match counts.iter_mut().find(|(seen, _)| *seen == significant) {
                Some((_, count)) => *count += 1,
                None => counts.push((significant, 1)),
            }
        }

        let values: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(value, _)| render_value(value))
            .collect();
        (!values.is_empty()).then(|| ValidationError::DuplicateValue {
            path: self.core().path.clone(),
            values,
        })
    }

    /// The `value` sub-attribute for complex elements, the element itself otherwise.
    fn significant_value<'a>(&self, item: &'a Value) -> Option<&'a Value> {
        let significant = match self.element.as_ref() {
            AttributeDefinition::Complex(_) => item.get("value")?,
            _ => item,
        };
        (!significant.is_null()).then_some(significant)
    }
}

/// Definition of a SCIM attribute.
///
/// The variant is chosen by [`AttributeFactory::create`] from the fragment's
/// `type` and `multiValued` properties.
#[derive(Debug, Clone)]
pub enum AttributeDefinition {
    Binary(AttributeCore),
    Boolean(AttributeCore),
    Datetime(AttributeCore),
    Decimal(AttributeCore),
    Integer(AttributeCore),
    String(AttributeCore),
    Reference(ReferenceAttribute),
    Complex(ComplexAttribute),
    MultiValued(MultiValuedAttribute),
}

impl AttributeDefinition {
    /// Characteristics of this attribute (of its element, for multi-valued attributes).
    pub fn core(&self) -> &AttributeCore {
        match self {
            Self::Binary(core)
            | Self::Boolean(core)
            | Self::Datetime(core)
            | Self::Decimal(core)
            | Self::Integer(core)
            | Self::String(core) => core,
            Self::Reference(reference) => &reference.core,
            Self::Complex(complex) => &complex.core,
            Self::MultiValued(multi) => multi.core(),
        }
    }

    /// The attribute type, looking through the multi-valued wrapper.
    pub fn kind(&self) -> AttributeType {
        match self {
            Self::Binary(_) => AttributeType::Binary,
            Self::Boolean(_) => AttributeType::Boolean,
            Self::Datetime(_) => AttributeType::Datetime,
            Self::Decimal(_) => AttributeType::Decimal,
            Self::Integer(_) => AttributeType::Integer,
            Self::String(_) => AttributeType::String,
            Self::Reference(_) => AttributeType::Reference,
            Self::Complex(_) => AttributeType::Complex,
            Self::MultiValued(multi) => multi.element.kind(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.core().name()
    }

    pub fn path(&self) -> &LocatorPath {
        self.core().path()
    }

    pub fn is_required(&self) -> bool {
        self.core().is_required()
    }

    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Self::MultiValued(_))
    }

    /// Sub-attributes of a complex attribute (or of a multi-valued complex element).
    pub fn sub_attributes(&self) -> &[AttributeDefinition] {
        match self {
            Self::Complex(complex) => complex.sub_attributes(),
            Self::MultiValued(multi) => multi.element.sub_attributes(),
            _ => &[],
        }
    }

    /// Check the schema fragment this attribute was built from.
    ///
    /// Every characteristic is checked; all failures are returned together as
    /// one aggregated error keyed by this attribute's path.
    pub fn validate_schema(&self) -> SchemaResult<()> {
        match self {
            Self::MultiValued(multi) => multi.element.validate_schema(),
            Self::Complex(complex) => complex.validate_schema(),
            Self::Reference(reference) => reference.validate_schema(),
            Self::Binary(core)
            | Self::Boolean(core)
            | Self::Datetime(core)
            | Self::Decimal(core)
            | Self::Integer(core)
            | Self::String(core) => {
                SchemaError::aggregate(core.path.to_string(), core.shape_violations(self.kind()))
            }
        }
    }

    /// Validate this attribute's value within `payload`.
    ///
    /// An absent value is an error only when the attribute is required.
    pub fn validate(&self, payload: &Value) -> ValidationResult<()> {
        match self.name().and_then(|name| payload.get(name)) {
            Some(value) => self.validate_value(value),
            None => self.core().absent(payload),
        }
    }

    /// Validate a value already extracted from its payload.
    pub fn validate_value(&self, value: &Value) -> ValidationResult<()> {
        match self {
            Self::Binary(core) => core.require_type(AttributeType::Binary, value, value.is_string(), "binary"),
            Self::Boolean(core) => core.require_type(AttributeType::Boolean, value, value.is_boolean(), "boolean"),
            Self::Integer(core) => core.require_type(AttributeType::Integer, value, is_integer(value), "integer"),
            Self::Decimal(core) => core.require_type(
                AttributeType::Decimal,
                value,
                is_decimal(value),
                "must be a real number with at least one digit to the left and right of the period",
            ),
            Self::Datetime(core) => core.require_type(
                AttributeType::Datetime,
                value,
                value.as_str().is_some_and(is_datetime),
                &format!("datetime with format {SCIM_DATETIME_EXAMPLE}"),
            ),
            Self::String(core) => core.validate_string(value),
            Self::Reference(reference) => reference.core.require_type(
                AttributeType::Reference,
                value,
                value.is_string(),
                "type reference",
            ),
            Self::Complex(complex) => complex.validate_value(value),
            Self::MultiValued(multi) => multi.validate_value(value),
        }
    }
}

fn path_segment(name: &Declared<String>) -> String {
    match name {
        Declared::Valid(name) => name.clone(),
        Declared::Invalid(raw) => render_value(raw),
    }
}

fn one_of<T: ToString>(accepted: &[T]) -> String {
    let names: Vec<String> = accepted.iter().map(ToString::to_string).collect();
    format!("{{{}}}", names.join(", "))
}

/// List members that stand in for "no value".
fn is_placeholder(item: &Value) -> bool {
    item.is_null() || item.as_object().is_some_and(Map::is_empty)
}

/// Integral JSON numbers; booleans are never numbers in JSON.
fn is_integer(value: &Value) -> bool {
    value.as_number().is_some_and(|n| n.is_i64() || n.is_u64())
}

/// Real numbers rendered with a digit on both sides of the decimal point.
fn is_decimal(value: &Value) -> bool {
    let Some(number) = value.as_number().filter(|n| n.is_f64()) else {
        return false;
    };
    let text = number.to_string();
    text.split_once('.').is_some_and(|(whole, fraction)| {
        whole.ends_with(|c: char| c.is_ascii_digit())
            && fraction.starts_with(|c: char| c.is_ascii_digit())
    })
}

fn is_datetime(text: &str) -> bool {
    DATETIME_LAYOUT.is_match(text)
        && NaiveDateTime::parse_from_str(text, SCIM_DATETIME_FORMAT).is_ok()
}
