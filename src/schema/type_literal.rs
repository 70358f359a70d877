//! TypeScript type-literal rendering
//!
//! Pure text production: the generator never fails and degrades any shape it
//! has no rule for to `any`.

use serde_json::Value;

use crate::schema::model::{ObjectSchema, Schema};

const NEVER: &str = "never";
const ANY: &str = "any";

/// Render `schema` as a structural TypeScript type; `None` renders `never`.
pub fn create_ts_type_literal(schema: Option<&Schema>) -> String {
    let Some(schema) = schema else {
        return NEVER.to_string();
    };

    match schema {
        Schema::OneOf(union) => union
            .one_of
            .iter()
            .map(|alt| create_ts_type_literal(Some(alt)))
            .collect::<Vec<_>>()
            .join(" | "),
        Schema::String(s) => match &s.enum_values {
            Some(values) => values
                .iter()
                .map(|v| Value::from(v.as_str()).to_string())
                .collect::<Vec<_>>()
                .join(" | "),
            None => "string".to_string(),
        },
        Schema::Integer(s) => match &s.enum_values {
            Some(values) => join_numbers(values),
            None => "number".to_string(),
        },
        Schema::Number(s) => match &s.enum_values {
            Some(values) => join_numbers(values),
            None => "number".to_string(),
        },
        Schema::Array(arr) => format!("Array<{}>", create_ts_type_literal(arr.items.as_deref())),
        Schema::Object(obj) => render_object(obj),
        Schema::Boolean(_) => ANY.to_string(),
    }
}

fn join_numbers<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// `{`, one line per property joined with `;`, `}`. No properties renders `any`.
fn render_object(obj: &ObjectSchema) -> String {
    let Some(properties) = &obj.properties else {
        return ANY.to_string();
    };

    let lines: Vec<String> = properties
        .iter()
        .map(|(name, property)| {
            let optional = if obj.is_required(name) { "" } else { "?" };
            let doc = doc_comment(property)
                .map(|doc| format!("\n/** {} */\n", doc))
                .unwrap_or_default();
            format!(
                "{}{}{}: {}",
                doc,
                name,
                optional,
                create_ts_type_literal(Some(property))
            )
        })
        .collect();

    format!("{{\n{}\n}}", lines.join(";\n"))
}

/// `title(description)`, either half possibly empty. Empty strings count as unset.
fn doc_comment(schema: &Schema) -> Option<String> {
    let meta = schema.meta();
    let title = meta.title.as_deref().filter(|t| !t.is_empty());
    let description = meta.description.as_deref().filter(|d| !d.is_empty());
    if title.is_none() && description.is_none() {
        return None;
    }
    Some(format!(
        "{}({})",
        title.unwrap_or_default(),
        description.unwrap_or_default()
    ))
}
