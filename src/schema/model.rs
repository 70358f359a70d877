//! Schema data model
//!
//! A [`Schema`] is a closed sum type: every node is exactly one of the
//! primitive shapes, an array, an object or a `oneOf` union. Nodes are plain
//! value trees with no identity and no back references.

use indexmap::IndexMap;
use std::fmt;

/// Documentation attached to any node. Only the type-literal generator reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// A string node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringSchema {
    pub meta: Metadata,
    /// Regular expression that must match somewhere in the value
    pub pattern: Option<String>,
    pub enum_values: Option<Vec<String>>,
    pub const_value: Option<String>,
}

/// A whole-number node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegerSchema {
    pub meta: Metadata,
    pub enum_values: Option<Vec<i64>>,
    pub const_value: Option<i64>,
}

/// A node accepting any finite number
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberSchema {
    pub meta: Metadata,
    pub enum_values: Option<Vec<f64>>,
    pub const_value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanSchema {
    pub meta: Metadata,
    pub const_value: Option<bool>,
}

/// A list node. Without `items` the elements are unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArraySchema {
    pub meta: Metadata,
    pub items: Option<Box<Schema>>,
}

/// A record node.
///
/// Without `properties` the object is opaque and passes validation unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub meta: Metadata,
    pub properties: Option<IndexMap<String, Schema>>,
    pub required: Option<Required>,
}

/// A union node; valid when any alternative is valid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OneOfSchema {
    pub meta: Metadata,
    pub one_of: Vec<Schema>,
}

/// Which object properties must be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Required {
    /// Applies uniformly to every declared property
    All(bool),
    /// Named properties, in declaration order
    Keys(Vec<String>),
}

impl Required {
    /// Is the property `name` required?
    pub fn is_required(&self, name: &str) -> bool {
        match self {
            Required::All(all) => *all,
            Required::Keys(keys) => keys.iter().any(|k| k == name),
        }
    }

    /// Resolve to the ordered list of required names.
    ///
    /// `All(true)` expands to every declared property. Explicit keys are
    /// returned as written, including names with no declared property.
    pub fn resolve<'a>(&'a self, properties: Option<&'a IndexMap<String, Schema>>) -> Vec<&'a str> {
        match self {
            Required::All(false) => Vec::new(),
            Required::All(true) => properties
                .map(|props| props.keys().map(String::as_str).collect())
                .unwrap_or_default(),
            Required::Keys(keys) => keys.iter().map(String::as_str).collect(),
        }
    }
}

/// Variant tag of a [`Schema`], also the `type` keyword of typed nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    OneOf,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Array => "array",
            SchemaKind::Object => "object",
            SchemaKind::OneOf => "oneOf",
        }
    }

    /// Parse a `type` keyword. `oneOf` is a separate key, never a type.
    pub fn from_type_keyword(s: &str) -> Option<Self> {
        match s {
            "string" => Some(SchemaKind::String),
            "integer" => Some(SchemaKind::Integer),
            "number" => Some(SchemaKind::Number),
            "boolean" => Some(SchemaKind::Boolean),
            "array" => Some(SchemaKind::Array),
            "object" => Some(SchemaKind::Object),
            _ => None,
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schema node
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String(StringSchema),
    Integer(IntegerSchema),
    Number(NumberSchema),
    Boolean(BooleanSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
    OneOf(OneOfSchema),
}

impl Schema {
    pub fn string() -> Self {
        Schema::String(StringSchema::default())
    }

    pub fn integer() -> Self {
        Schema::Integer(IntegerSchema::default())
    }

    pub fn number() -> Self {
        Schema::Number(NumberSchema::default())
    }

    pub fn boolean() -> Self {
        Schema::Boolean(BooleanSchema::default())
    }

    /// An array with unconstrained elements
    pub fn array() -> Self {
        Schema::Array(ArraySchema::default())
    }

    pub fn array_of(items: Schema) -> Self {
        Schema::Array(ArraySchema {
            items: Some(Box::new(items)),
            ..Default::default()
        })
    }

    /// An opaque object (no `properties`)
    pub fn object() -> Self {
        Schema::Object(ObjectSchema::default())
    }

    pub fn one_of(alternatives: Vec<Schema>) -> Self {
        Schema::OneOf(OneOfSchema {
            one_of: alternatives,
            ..Default::default()
        })
    }

    pub fn kind(&self) -> SchemaKind {
        match self {
            Schema::String(_) => SchemaKind::String,
            Schema::Integer(_) => SchemaKind::Integer,
            Schema::Number(_) => SchemaKind::Number,
            Schema::Boolean(_) => SchemaKind::Boolean,
            Schema::Array(_) => SchemaKind::Array,
            Schema::Object(_) => SchemaKind::Object,
            Schema::OneOf(_) => SchemaKind::OneOf,
        }
    }

    pub fn meta(&self) -> &Metadata {
        match self {
            Schema::String(s) => &s.meta,
            Schema::Integer(s) => &s.meta,
            Schema::Number(s) => &s.meta,
            Schema::Boolean(s) => &s.meta,
            Schema::Array(s) => &s.meta,
            Schema::Object(s) => &s.meta,
            Schema::OneOf(s) => &s.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut Metadata {
        match self {
            Schema::String(s) => &mut s.meta,
            Schema::Integer(s) => &mut s.meta,
            Schema::Number(s) => &mut s.meta,
            Schema::Boolean(s) => &mut s.meta,
            Schema::Array(s) => &mut s.meta,
            Schema::Object(s) => &mut s.meta,
            Schema::OneOf(s) => &mut s.meta,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.meta_mut().title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.meta_mut().description = Some(description.into());
        self
    }

    /// Set the `pattern` of a string node; other nodes are returned unchanged.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        if let Schema::String(s) = &mut self {
            s.pattern = Some(pattern.into());
        }
        self
    }
}

impl StringSchema {
    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_const(mut self, value: impl Into<String>) -> Self {
        self.const_value = Some(value.into());
        self
    }
}

impl IntegerSchema {
    pub fn with_enum(mut self, values: impl IntoIterator<Item = i64>) -> Self {
        self.enum_values = Some(values.into_iter().collect());
        self
    }

    pub fn with_const(mut self, value: i64) -> Self {
        self.const_value = Some(value);
        self
    }
}

impl NumberSchema {
    pub fn with_enum(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.enum_values = Some(values.into_iter().collect());
        self
    }

    pub fn with_const(mut self, value: f64) -> Self {
        self.const_value = Some(value);
        self
    }
}

impl BooleanSchema {
    pub fn with_const(mut self, value: bool) -> Self {
        self.const_value = Some(value);
        self
    }
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property, keeping insertion order
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), schema);
        self
    }

    pub fn required_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(Required::Keys(keys.into_iter().map(Into::into).collect()));
        self
    }

    pub fn required_all(mut self, all: bool) -> Self {
        self.required = Some(Required::All(all));
        self
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required
            .as_ref()
            .map(|r| r.is_required(name))
            .unwrap_or(false)
    }

    /// Required property names in check order
    pub fn required_names(&self) -> Vec<&str> {
        self.required
            .as_ref()
            .map(|r| r.resolve(self.properties.as_ref()))
            .unwrap_or_default()
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Schema {
                fn from(s: $ty) -> Self {
                    Schema::$variant(s)
                }
            }
        )*
    };
}

impl_from_variant!(
    String(StringSchema),
    Integer(IntegerSchema),
    Number(NumberSchema),
    Boolean(BooleanSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
    OneOf(OneOfSchema),
);
