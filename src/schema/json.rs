//! Conversion between [`Schema`] and in-memory `serde_json::Value` documents
//!
//! The JSON shape is the familiar JSON-Schema subset: typed nodes carry a
//! `type` keyword, unions carry a `oneOf` list, and no node may carry both.
//! Nothing here touches the filesystem; callers hand over values they have
//! already built.

use indexmap::IndexMap;
use miette::Diagnostic;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::{DataPath, PathSegment};
use crate::schema::model::{
    ArraySchema, BooleanSchema, IntegerSchema, Metadata, NumberSchema, ObjectSchema,
    OneOfSchema, Required, Schema, SchemaKind, StringSchema,
};

/// A JSON document that does not describe a schema node
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum SchemaError {
    #[error("unrecognized schema type at {path}: {found}")]
    #[diagnostic(
        code(sdt::schema::unrecognized_type),
        help("use one of string, integer, number, boolean, array, object, or a 'oneOf' list")
    )]
    UnrecognizedType { path: DataPath, found: String },

    #[error("ambiguous schema node at {path}: has both 'type' and 'oneOf'")]
    #[diagnostic(code(sdt::schema::ambiguous_node))]
    Ambiguous { path: DataPath },

    #[error("expected {expected} for '{keyword}' at {path}")]
    #[diagnostic(code(sdt::schema::invalid_keyword))]
    InvalidKeyword {
        path: DataPath,
        keyword: &'static str,
        expected: &'static str,
    },

    #[error("schema node is not an object at {path}")]
    #[diagnostic(code(sdt::schema::not_an_object))]
    NotAnObject { path: DataPath },
}

impl Schema {
    /// Build a schema from a JSON document
    pub fn from_value(value: &Value) -> Result<Schema, SchemaError> {
        parse_node(value, &mut DataPath::root())
    }

    /// Render this schema as a JSON document
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        if self.kind() != SchemaKind::OneOf {
            out.insert("type".into(), Value::from(self.kind().as_str()));
        }
        let meta = self.meta();
        if let Some(title) = &meta.title {
            out.insert("title".into(), Value::from(title.as_str()));
        }
        if let Some(description) = &meta.description {
            out.insert("description".into(), Value::from(description.as_str()));
        }

        match self {
            Schema::String(s) => {
                if let Some(pattern) = &s.pattern {
                    out.insert("pattern".into(), Value::from(pattern.as_str()));
                }
                if let Some(values) = &s.enum_values {
                    out.insert("enum".into(), Value::from(values.clone()));
                }
                if let Some(c) = &s.const_value {
                    out.insert("const".into(), Value::from(c.as_str()));
                }
            }
            Schema::Integer(s) => {
                if let Some(values) = &s.enum_values {
                    out.insert("enum".into(), Value::from(values.clone()));
                }
                if let Some(c) = s.const_value {
                    out.insert("const".into(), Value::from(c));
                }
            }
            Schema::Number(s) => {
                if let Some(values) = &s.enum_values {
                    out.insert("enum".into(), Value::from(values.clone()));
                }
                if let Some(c) = s.const_value {
                    out.insert("const".into(), Value::from(c));
                }
            }
            Schema::Boolean(s) => {
                if let Some(c) = s.const_value {
                    out.insert("const".into(), Value::from(c));
                }
            }
            Schema::Array(s) => {
                if let Some(items) = &s.items {
                    out.insert("items".into(), items.to_value());
                }
            }
            Schema::Object(s) => {
                if let Some(props) = &s.properties {
                    let props: Map<String, Value> = props
                        .iter()
                        .map(|(name, prop)| (name.clone(), prop.to_value()))
                        .collect();
                    out.insert("properties".into(), Value::Object(props));
                }
                match &s.required {
                    Some(Required::All(all)) => {
                        out.insert("required".into(), Value::from(*all));
                    }
                    Some(Required::Keys(keys)) => {
                        out.insert("required".into(), Value::from(keys.clone()));
                    }
                    None => {}
                }
            }
            Schema::OneOf(s) => {
                let alternatives = s.one_of.iter().map(Schema::to_value).collect();
                out.insert("oneOf".into(), Value::Array(alternatives));
            }
        }

        Value::Object(out)
    }
}

impl TryFrom<&Value> for Schema {
    type Error = SchemaError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Schema::from_value(value)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Schema::from_value(&value).map_err(D::Error::custom)
    }
}

/// Read a JSON number as a whole number, accepting `2.0` as well as `2`
fn as_whole_number(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
        .map(|f| f as i64)
}

fn parse_node(value: &Value, path: &mut DataPath) -> Result<Schema, SchemaError> {
    let obj = value
        .as_object()
        .ok_or_else(|| SchemaError::NotAnObject { path: path.clone() })?;

    let meta = Metadata {
        title: opt_string(obj, "title", path)?,
        description: opt_string(obj, "description", path)?,
    };

    if let Some(one_of) = obj.get("oneOf") {
        if obj.contains_key("type") {
            return Err(SchemaError::Ambiguous { path: path.clone() });
        }
        let alternatives = one_of
            .as_array()
            .filter(|arr| !arr.is_empty())
            .ok_or_else(|| invalid(path, "oneOf", "a non-empty array of schemas"))?;
        let one_of = path.descend(key("oneOf"), |p| {
            alternatives
                .iter()
                .enumerate()
                .map(|(i, alt)| p.descend(PathSegment::Index(i), |p| parse_node(alt, p)))
                .collect::<Result<Vec<_>, _>>()
        })?;
        return Ok(Schema::OneOf(OneOfSchema { meta, one_of }));
    }

    let kind = match obj.get("type") {
        Some(Value::String(s)) => SchemaKind::from_type_keyword(s),
        _ => None,
    };
    let Some(kind) = kind else {
        let found = obj
            .get("type")
            .map(|t| t.as_str().map(String::from).unwrap_or_else(|| t.to_string()))
            .unwrap_or_else(|| "(missing)".to_string());
        return Err(SchemaError::UnrecognizedType {
            path: path.clone(),
            found,
        });
    };

    let schema = match kind {
        SchemaKind::String => Schema::String(StringSchema {
            meta,
            pattern: opt_string(obj, "pattern", path)?,
            enum_values: opt_enum(obj, path, "a non-empty array of strings", |v| {
                v.as_str().map(String::from)
            })?,
            const_value: opt_const(obj, path, "a string", |v| v.as_str().map(String::from))?,
        }),
        SchemaKind::Integer => Schema::Integer(IntegerSchema {
            meta,
            enum_values: opt_enum(obj, path, "a non-empty array of integers", as_whole_number)?,
            const_value: opt_const(obj, path, "an integer", as_whole_number)?,
        }),
        SchemaKind::Number => Schema::Number(NumberSchema {
            meta,
            enum_values: opt_enum(obj, path, "a non-empty array of numbers", Value::as_f64)?,
            const_value: opt_const(obj, path, "a number", Value::as_f64)?,
        }),
        SchemaKind::Boolean => Schema::Boolean(BooleanSchema {
            meta,
            const_value: opt_const(obj, path, "a boolean", Value::as_bool)?,
        }),
        SchemaKind::Array => {
            let items = match obj.get("items") {
                Some(items) => Some(Box::new(path.descend(key("items"), |p| parse_node(items, p))?)),
                None => None,
            };
            Schema::Array(ArraySchema { meta, items })
        }
        SchemaKind::Object => Schema::Object(ObjectSchema {
            meta,
            properties: parse_properties(obj, path)?,
            required: parse_required(obj, path)?,
        }),
        SchemaKind::OneOf => {
            return Err(SchemaError::UnrecognizedType {
                path: path.clone(),
                found: kind.to_string(),
            })
        }
    };

    Ok(schema)
}

fn parse_properties(
    obj: &Map<String, Value>,
    path: &mut DataPath,
) -> Result<Option<IndexMap<String, Schema>>, SchemaError> {
    let Some(props) = obj.get("properties") else {
        return Ok(None);
    };
    let props = props
        .as_object()
        .ok_or_else(|| invalid(path, "properties", "an object of schemas"))?;

    path.descend(key("properties"), |p| {
        props
            .iter()
            .map(|(name, prop)| {
                let schema = p.descend(key(name), |p| parse_node(prop, p))?;
                Ok((name.clone(), schema))
            })
            .collect::<Result<IndexMap<_, _>, SchemaError>>()
    })
    .map(Some)
}

fn parse_required(obj: &Map<String, Value>, path: &DataPath) -> Result<Option<Required>, SchemaError> {
    match obj.get("required") {
        None => Ok(None),
        Some(Value::Bool(all)) => Ok(Some(Required::All(*all))),
        Some(Value::Array(keys)) => keys
            .iter()
            .map(|k| k.as_str().map(String::from))
            .collect::<Option<Vec<_>>>()
            .map(|keys| Some(Required::Keys(keys)))
            .ok_or_else(|| invalid(path, "required", "a boolean or an array of property names")),
        Some(_) => Err(invalid(path, "required", "a boolean or an array of property names")),
    }
}

fn opt_string(
    obj: &Map<String, Value>,
    keyword: &'static str,
    path: &DataPath,
) -> Result<Option<String>, SchemaError> {
    match obj.get(keyword) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(path, keyword, "a string")),
    }
}

fn opt_enum<T>(
    obj: &Map<String, Value>,
    path: &DataPath,
    expected: &'static str,
    read: impl Fn(&Value) -> Option<T>,
) -> Result<Option<Vec<T>>, SchemaError> {
    let Some(values) = obj.get("enum") else {
        return Ok(None);
    };
    values
        .as_array()
        .filter(|arr| !arr.is_empty())
        .and_then(|arr| arr.iter().map(&read).collect::<Option<Vec<_>>>())
        .map(Some)
        .ok_or_else(|| invalid(path, "enum", expected))
}

fn opt_const<T>(
    obj: &Map<String, Value>,
    path: &DataPath,
    expected: &'static str,
    read: impl Fn(&Value) -> Option<T>,
) -> Result<Option<T>, SchemaError> {
    match obj.get("const") {
        None => Ok(None),
        Some(value) => read(value)
            .map(Some)
            .ok_or_else(|| invalid(path, "const", expected)),
    }
}

fn invalid(path: &DataPath, keyword: &'static str, expected: &'static str) -> SchemaError {
    SchemaError::InvalidKeyword {
        path: path.clone(),
        keyword,
        expected,
    }
}

fn key(name: &str) -> PathSegment {
    PathSegment::Key(name.to_string())
}
