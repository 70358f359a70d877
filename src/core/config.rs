//! Validator configuration

use serde::Deserialize;

/// Knobs for [`crate::schema::Validator`].
///
/// Deserializable so applications can embed it in their own configuration
/// files; every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Keep the failure of every `oneOf` alternative as a related diagnostic
    /// on the aggregate "no alternative matched" error. When false the
    /// aggregate error is fully opaque.
    pub collect_alternative_errors: bool,

    /// Maximum data depth to descend into. `None` means unlimited.
    pub max_depth: Option<usize>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            collect_alternative_errors: true,
            max_depth: None,
        }
    }
}

impl ValidatorConfig {
    /// Configuration that discards per-alternative `oneOf` failures
    pub fn opaque() -> Self {
        Self {
            collect_alternative_errors: false,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Later values take precedence when set
    pub fn merge(&mut self, other: ValidatorConfig) {
        self.collect_alternative_errors = other.collect_alternative_errors;
        if other.max_depth.is_some() {
            self.max_depth = other.max_depth;
        }
    }
}
