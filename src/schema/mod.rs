//! Schema system - data model, validation, merging, mocking and type-literal generation

pub mod factory;
pub mod json;
pub mod merge;
pub mod mock;
pub mod model;
pub mod type_literal;
pub mod validator;

pub use factory::{create_list, create_pagination};
pub use json::SchemaError;
pub use merge::merge;
pub use mock::auto_mock;
pub use model::{
    ArraySchema, BooleanSchema, IntegerSchema, Metadata, NumberSchema, ObjectSchema,
    OneOfSchema, Required, Schema, SchemaKind, StringSchema,
};
pub use type_literal::create_ts_type_literal;
pub use validator::{validate, validate_at, ValidationError, Validator};
