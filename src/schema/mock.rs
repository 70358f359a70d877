//! Minimal example values for fixtures

use serde_json::{Map, Value};

use crate::schema::model::Schema;

/// Produce one small value that satisfies `schema`.
///
/// Per node: `const` if set, else the first `enum` entry, else a type default
/// (`false`, `1`, `""`, `[]`). Objects contain only their required
/// properties, each mocked recursively; `oneOf` mocks its first alternative.
/// A required name with no declared property becomes `null`.
pub fn auto_mock(schema: &Schema) -> Value {
    match schema {
        Schema::Boolean(s) => Value::from(s.const_value.unwrap_or(false)),
        Schema::Integer(s) => {
            let first = s.enum_values.as_ref().and_then(|vs| vs.first().copied());
            Value::from(s.const_value.or(first).unwrap_or(1))
        }
        Schema::Number(s) => {
            let first = s.enum_values.as_ref().and_then(|vs| vs.first().copied());
            s.const_value
                .or(first)
                .map(Value::from)
                .unwrap_or_else(|| Value::from(1))
        }
        Schema::String(s) => {
            let first = s.enum_values.as_ref().and_then(|vs| vs.first());
            Value::from(s.const_value.as_ref().or(first).map(String::as_str).unwrap_or(""))
        }
        Schema::Array(_) => Value::Array(Vec::new()),
        Schema::Object(obj) => {
            let mut out = Map::new();
            for name in obj.required_names() {
                let value = match obj.properties.as_ref().and_then(|p| p.get(name)) {
                    Some(property) => auto_mock(property),
                    None => {
                        tracing::debug!(property = name, "required property has no schema, mocking as null");
                        Value::Null
                    }
                };
                out.insert(name.to_string(), value);
            }
            Value::Object(out)
        }
        Schema::OneOf(union) => union.one_of.first().map(auto_mock).unwrap_or(Value::Null),
    }
}
