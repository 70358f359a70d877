//! Core module - fundamental types shared by the schema operations

pub mod config;
pub mod path;

pub use config::ValidatorConfig;
pub use path::{DataPath, PathSegment};
