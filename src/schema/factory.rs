//! Convenience constructors for common collection shapes

use crate::schema::model::{ArraySchema, ObjectSchema, Schema};

/// "List of T": an array whose elements all match `item`
pub fn create_list(item: Schema) -> Schema {
    Schema::Array(ArraySchema {
        items: Some(Box::new(item)),
        ..Default::default()
    })
}

/// "Paginated list of T".
///
/// An object with required integer `total`, `pageSize` and `pageNum` plus a
/// required `list` of `item`.
pub fn create_pagination(item: Schema) -> Schema {
    ObjectSchema::new()
        .property("total", Schema::integer())
        .property("pageSize", Schema::integer())
        .property("pageNum", Schema::integer())
        .property("list", create_list(item))
        .required_keys(["total", "pageSize", "pageNum", "list"])
        .into()
}
