//! Structural validation with path-tracked error reporting
//!
//! Validation is a recursive descent over the schema. The first violation in
//! traversal order aborts the whole call; `oneOf` alternatives are the only
//! place where failures are absorbed.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use miette::Diagnostic;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::{DataPath, PathSegment, ValidatorConfig};
use crate::schema::model::{ObjectSchema, Schema, SchemaKind, StringSchema};

/// Data rejected by a schema
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("type mismatch at {path}: is not {expected}, found {found}")]
    #[diagnostic(code(sdt::validate::type_mismatch))]
    TypeMismatch {
        path: DataPath,
        expected: SchemaKind,
        found: &'static str,
    },

    #[error("const mismatch at {path}: expected {expected}")]
    #[diagnostic(code(sdt::validate::const_mismatch))]
    ConstMismatch { path: DataPath, expected: Value },

    #[error("enum mismatch at {path}: must be one of {}", format_options(.allowed))]
    #[diagnostic(code(sdt::validate::enum_mismatch))]
    EnumMismatch { path: DataPath, allowed: Vec<Value> },

    #[error("pattern mismatch at {path}: does not match pattern {pattern}")]
    #[diagnostic(code(sdt::validate::pattern_mismatch))]
    PatternMismatch { path: DataPath, pattern: String },

    #[error("invalid pattern at {path}: {reason}")]
    #[diagnostic(
        code(sdt::validate::invalid_pattern),
        help("the schema's 'pattern' must be a valid regular expression")
    )]
    InvalidPattern {
        path: DataPath,
        pattern: String,
        reason: String,
    },

    #[error("missing required key '{key}' at {path}")]
    #[diagnostic(code(sdt::validate::missing_required))]
    MissingRequired { path: DataPath, key: String },

    #[error("no alternative matched at {path}")]
    #[diagnostic(code(sdt::validate::no_alternative))]
    NoAlternativeMatched {
        path: DataPath,
        /// Failure of each alternative, in order. Empty when the validator
        /// is configured to keep `oneOf` failures opaque.
        #[related]
        alternatives: Vec<ValidationError>,
    },

    #[error("maximum depth {max} exceeded at {path}")]
    #[diagnostic(code(sdt::validate::depth_exceeded))]
    DepthExceeded { path: DataPath, max: usize },
}

impl ValidationError {
    /// Path of the offending value
    pub fn path(&self) -> &DataPath {
        match self {
            ValidationError::TypeMismatch { path, .. }
            | ValidationError::ConstMismatch { path, .. }
            | ValidationError::EnumMismatch { path, .. }
            | ValidationError::PatternMismatch { path, .. }
            | ValidationError::InvalidPattern { path, .. }
            | ValidationError::MissingRequired { path, .. }
            | ValidationError::NoAlternativeMatched { path, .. }
            | ValidationError::DepthExceeded { path, .. } => path,
        }
    }
}

fn format_options(options: &[Value]) -> String {
    options
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Name of the JSON shape of a value, for diagnostics
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Schema validator
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `data` against `schema`, returning the admitted subset.
    ///
    /// Objects with declared properties are projected onto those properties;
    /// everything else is returned as given.
    pub fn validate(&self, schema: &Schema, data: &Value) -> Result<Value, ValidationError> {
        self.validate_at(schema, data, "")
    }

    /// Like [`Validator::validate`] but reports paths below the dotted prefix `path`
    pub fn validate_at(
        &self,
        schema: &Schema,
        data: &Value,
        path: &str,
    ) -> Result<Value, ValidationError> {
        let mut path = DataPath::parse(path);
        let mut walk = Walk {
            config: &self.config,
            patterns: HashMap::new(),
        };
        let result = walk.check(schema, data, &mut path, 0);
        if let Err(err) = &result {
            tracing::debug!(path = %err.path(), error = %err, "validation failed");
        }
        result
    }
}

/// State for one validation call. Compiled patterns are cached per call,
/// keyed by the pattern text.
struct Walk<'a, 's> {
    config: &'a ValidatorConfig,
    patterns: HashMap<&'s str, Regex>,
}

impl<'s> Walk<'_, 's> {
    fn check(
        &mut self,
        schema: &'s Schema,
        data: &Value,
        path: &mut DataPath,
        depth: usize,
    ) -> Result<Value, ValidationError> {
        if let Some(max) = self.config.max_depth {
            if depth > max {
                return Err(ValidationError::DepthExceeded {
                    path: path.clone(),
                    max,
                });
            }
        }

        check_literals(schema, data, path)?;

        match schema {
            Schema::String(s) => self.check_string(s, data, path),
            Schema::Integer(_) => {
                if is_whole_number(data) {
                    Ok(data.clone())
                } else {
                    Err(type_mismatch(SchemaKind::Integer, data, path))
                }
            }
            Schema::Number(_) => match data {
                Value::Number(_) => Ok(data.clone()),
                _ => Err(type_mismatch(SchemaKind::Number, data, path)),
            },
            Schema::Boolean(_) => match data {
                Value::Bool(_) => Ok(data.clone()),
                _ => Err(type_mismatch(SchemaKind::Boolean, data, path)),
            },
            Schema::Array(arr) => {
                let Value::Array(elements) = data else {
                    return Err(type_mismatch(SchemaKind::Array, data, path));
                };
                let Some(items) = &arr.items else {
                    return Ok(data.clone());
                };
                let validated = elements
                    .iter()
                    .enumerate()
                    .map(|(i, element)| {
                        path.descend(PathSegment::Index(i), |p| {
                            self.check(items, element, p, depth + 1)
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(validated))
            }
            Schema::Object(obj) => self.check_object(obj, data, path, depth),
            Schema::OneOf(union) => {
                let mut failures = Vec::new();
                for (i, alternative) in union.one_of.iter().enumerate() {
                    match self.check(alternative, data, path, depth) {
                        Ok(_) => return Ok(data.clone()),
                        Err(err) => {
                            tracing::trace!(path = %path, alternative = i, error = %err, "oneOf alternative rejected");
                            if self.config.collect_alternative_errors {
                                failures.push(err);
                            }
                        }
                    }
                }
                Err(ValidationError::NoAlternativeMatched {
                    path: path.clone(),
                    alternatives: failures,
                })
            }
        }
    }

    fn check_object(
        &mut self,
        obj: &'s ObjectSchema,
        data: &Value,
        path: &mut DataPath,
        depth: usize,
    ) -> Result<Value, ValidationError> {
        let Value::Object(fields) = data else {
            return Err(type_mismatch(SchemaKind::Object, data, path));
        };

        let projected = match &obj.properties {
            Some(properties) => {
                let mut projected = Map::new();
                for (name, property) in properties {
                    if let Some(value) = fields.get(name) {
                        let value = path.descend(PathSegment::Key(name.clone()), |p| {
                            self.check(property, value, p, depth + 1)
                        })?;
                        projected.insert(name.clone(), value);
                    }
                }
                projected
            }
            None => fields.clone(),
        };

        for key in obj.required_names() {
            if !projected.contains_key(key) {
                return Err(ValidationError::MissingRequired {
                    path: path.clone(),
                    key: key.to_string(),
                });
            }
        }

        Ok(Value::Object(projected))
    }

    fn check_string(
        &mut self,
        s: &'s StringSchema,
        data: &Value,
        path: &DataPath,
    ) -> Result<Value, ValidationError> {
        let Value::String(text) = data else {
            return Err(type_mismatch(SchemaKind::String, data, path));
        };

        if let Some(pattern) = &s.pattern {
            let re = match self.patterns.entry(pattern.as_str()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let re = Regex::new(pattern).map_err(|e| ValidationError::InvalidPattern {
                        path: path.clone(),
                        pattern: pattern.clone(),
                        reason: e.to_string(),
                    })?;
                    entry.insert(re)
                }
            };
            if !re.is_match(text) {
                return Err(ValidationError::PatternMismatch {
                    path: path.clone(),
                    pattern: pattern.clone(),
                });
            }
        }

        Ok(data.clone())
    }
}

/// Validate with the default configuration
pub fn validate(schema: &Schema, data: &Value) -> Result<Value, ValidationError> {
    Validator::default().validate(schema, data)
}

/// Validate with the default configuration, reporting paths below `path`
pub fn validate_at(schema: &Schema, data: &Value, path: &str) -> Result<Value, ValidationError> {
    Validator::default().validate_at(schema, data, path)
}

fn type_mismatch(expected: SchemaKind, data: &Value, path: &DataPath) -> ValidationError {
    ValidationError::TypeMismatch {
        path: path.clone(),
        expected,
        found: value_kind(data),
    }
}

/// `const` first, then `enum`
fn check_literals(schema: &Schema, data: &Value, path: &DataPath) -> Result<(), ValidationError> {
    let (constant, options): (Option<Value>, Option<Vec<Value>>) = match schema {
        Schema::String(s) => (
            s.const_value.as_deref().map(Value::from),
            s.enum_values
                .as_ref()
                .map(|vs| vs.iter().map(|v| Value::from(v.as_str())).collect()),
        ),
        Schema::Integer(s) => (
            s.const_value.map(Value::from),
            s.enum_values
                .as_ref()
                .map(|vs| vs.iter().copied().map(Value::from).collect()),
        ),
        Schema::Number(s) => (
            s.const_value.map(Value::from),
            s.enum_values
                .as_ref()
                .map(|vs| vs.iter().copied().map(Value::from).collect()),
        ),
        Schema::Boolean(s) => (s.const_value.map(Value::from), None),
        Schema::Array(_) | Schema::Object(_) | Schema::OneOf(_) => (None, None),
    };

    if let Some(expected) = constant {
        if !literal_eq(&expected, data) {
            return Err(ValidationError::ConstMismatch {
                path: path.clone(),
                expected,
            });
        }
    }

    if let Some(allowed) = options {
        if !allowed.iter().any(|v| literal_eq(v, data)) {
            return Err(ValidationError::EnumMismatch {
                path: path.clone(),
                allowed,
            });
        }
    }

    Ok(())
}

/// Any JSON number without a fractional part, whatever its magnitude
fn is_whole_number(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => false,
    }
}

/// Value equality where `2` and `2.0` are the same number
fn literal_eq(literal: &Value, data: &Value) -> bool {
    match (literal, data) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => a.as_f64() == b.as_f64(),
        },
        _ => literal == data,
    }
}
