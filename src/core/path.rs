//! Data paths used in validation diagnostics

use std::fmt;

/// One step from a parent value into a child value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member
    Key(String),
    /// Array element
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Position inside the data under validation.
///
/// Segments are only joined into text when a diagnostic is rendered. The root
/// path has no segments and renders as an empty string, so `address.provinceCode`
/// never carries a leading separator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DataPath {
    segments: Vec<PathSegment>,
}

impl DataPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted prefix such as `body.items.0`.
    ///
    /// Numeric segments become indices; empty input is the root.
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| match s.parse::<usize>() {
                Ok(index) => PathSegment::Index(index),
                Err(_) => PathSegment::Key(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Return a new path one level deeper
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Run `f` with `segment` pushed, popping it again afterwards.
    ///
    /// The path is restored even when `f` reports a failure, which lets
    /// `oneOf` keep trying alternatives on the same path.
    pub fn descend<T>(&mut self, segment: PathSegment, f: impl FnOnce(&mut Self) -> T) -> T {
        self.segments.push(segment);
        let out = f(self);
        self.segments.pop();
        out
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl From<&str> for DataPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_empty() {
        assert_eq!(DataPath::root().to_string(), "");
        assert!(DataPath::parse("").is_root());
    }

    #[test]
    fn test_child_path_has_no_leading_separator() {
        let path = DataPath::root()
            .child(PathSegment::Key("address".into()))
            .child(PathSegment::Key("provinceCode".into()));
        assert_eq!(path.to_string(), "address.provinceCode");
    }

    #[test]
    fn test_index_segments() {
        let path = DataPath::root()
            .child(PathSegment::Key("list".into()))
            .child(PathSegment::Index(3));
        assert_eq!(path.to_string(), "list.3");
    }

    #[test]
    fn test_parse_roundtrips_display() {
        let path = DataPath::parse("body.items.0.name");
        assert_eq!(path.depth(), 4);
        assert_eq!(path.segments()[2], PathSegment::Index(0));
        assert_eq!(path.to_string(), "body.items.0.name");
    }

    #[test]
    fn test_descend_restores_on_error() {
        let mut path = DataPath::parse("a");
        let result: Result<(), String> =
            path.descend(PathSegment::Key("b".into()), |p| Err(p.to_string()));
        assert_eq!(result.unwrap_err(), "a.b");
        assert_eq!(path.to_string(), "a");
    }
}
