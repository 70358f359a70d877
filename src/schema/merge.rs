//! Deep merge of partial schemas
//!
//! Later fragments win for scalar fields. List fields (`enum`, `required`
//! keys, `oneOf`) are concatenated, earlier elements first and duplicates
//! kept. `properties` and `items` merge recursively.

use indexmap::IndexMap;

use crate::schema::model::{Metadata, ObjectSchema, Required, Schema};

/// Combine `partials` left to right into one schema.
///
/// An empty input yields an empty object schema.
pub fn merge<I>(partials: I) -> Schema
where
    I: IntoIterator<Item = Schema>,
{
    let mut partials = partials.into_iter();
    let Some(mut merged) = partials.next() else {
        return Schema::object();
    };
    for partial in partials {
        merged.merge_from(partial);
    }
    merged
}

impl Schema {
    /// Merge `other` into `self`; `other` takes precedence.
    ///
    /// Nodes of different variants do not combine: `other` replaces `self`.
    pub fn merge_from(&mut self, other: Schema) {
        if self.kind() != other.kind() {
            tracing::debug!(
                from = %self.kind(),
                to = %other.kind(),
                "merging schemas of different kinds, later one replaces earlier"
            );
            *self = other;
            return;
        }

        match (self, other) {
            (Schema::String(dst), Schema::String(src)) => {
                dst.meta.merge_from(src.meta);
                overwrite(&mut dst.pattern, src.pattern);
                concat(&mut dst.enum_values, src.enum_values);
                overwrite(&mut dst.const_value, src.const_value);
            }
            (Schema::Integer(dst), Schema::Integer(src)) => {
                dst.meta.merge_from(src.meta);
                concat(&mut dst.enum_values, src.enum_values);
                overwrite(&mut dst.const_value, src.const_value);
            }
            (Schema::Number(dst), Schema::Number(src)) => {
                dst.meta.merge_from(src.meta);
                concat(&mut dst.enum_values, src.enum_values);
                overwrite(&mut dst.const_value, src.const_value);
            }
            (Schema::Boolean(dst), Schema::Boolean(src)) => {
                dst.meta.merge_from(src.meta);
                overwrite(&mut dst.const_value, src.const_value);
            }
            (Schema::Array(dst), Schema::Array(src)) => {
                dst.meta.merge_from(src.meta);
                match (&mut dst.items, src.items) {
                    (Some(items), Some(src_items)) => items.merge_from(*src_items),
                    (items, Some(src_items)) => *items = Some(src_items),
                    (_, None) => {}
                }
            }
            (Schema::Object(dst), Schema::Object(src)) => merge_object(dst, src),
            (Schema::OneOf(dst), Schema::OneOf(src)) => {
                dst.meta.merge_from(src.meta);
                dst.one_of.extend(src.one_of);
            }
            // kinds were compared above
            _ => {}
        }
    }
}

impl Metadata {
    fn merge_from(&mut self, other: Metadata) {
        overwrite(&mut self.title, other.title);
        overwrite(&mut self.description, other.description);
    }
}

fn merge_object(dst: &mut ObjectSchema, src: ObjectSchema) {
    dst.meta.merge_from(src.meta);

    if let Some(src_props) = src.properties {
        let props = dst.properties.get_or_insert_with(IndexMap::new);
        for (name, schema) in src_props {
            match props.get_mut(&name) {
                Some(existing) => existing.merge_from(schema),
                None => {
                    props.insert(name, schema);
                }
            }
        }
    }

    match (&mut dst.required, src.required) {
        (Some(Required::Keys(keys)), Some(Required::Keys(src_keys))) => keys.extend(src_keys),
        (required, Some(src_required)) => *required = Some(src_required),
        (_, None) => {}
    }
}

fn overwrite<T>(dst: &mut Option<T>, src: Option<T>) {
    if src.is_some() {
        *dst = src;
    }
}

fn concat<T>(dst: &mut Option<Vec<T>>, src: Option<Vec<T>>) {
    if let Some(src) = src {
        dst.get_or_insert_with(Vec::new).extend(src);
    }
}
