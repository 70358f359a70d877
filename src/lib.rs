//! SDT: Schema Description Toolkit
//!
//! Describe the shape of values with a small [`Schema`] tree, then validate
//! data against it, merge partial schemas, synthesize a minimal example value,
//! or render the equivalent TypeScript type literal.

pub mod core;
pub mod schema;

pub use crate::core::{DataPath, PathSegment, ValidatorConfig};
pub use crate::schema::{
    auto_mock, create_list, create_pagination, create_ts_type_literal, merge, validate,
    validate_at, Required, Schema, SchemaError, SchemaKind, ValidationError, Validator,
};
