//! Dotted property paths
//!
//! Settings are addressed the way they are written in `protectedProperties`
//! and `blueprint` keys: `hosts.web.needs.1`. A sequence element can be
//! named by a numeric key or by a bracketed index, so `needs.1` and
//! `needs[1]` reach the same node.
//!
//! ```
//! use deploy_tree::path::{parse_path, PathSegment};
//!
//! assert_eq!(parse_path("hosts.web.needs[1]"), vec![
//!     PathSegment::Key("hosts".to_string()),
//!     PathSegment::Key("web".to_string()),
//!     PathSegment::Key("needs".to_string()),
//!     PathSegment::Index(1),
//! ]);
//! ```

use std::fmt;

/// A segment of a path - either a key or a sequence index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A key in a mapping (or a numeric key addressing a sequence element)
    Key(String),
    /// An index in a sequence (e.g., 0 in `needs[0]`)
    Index(usize),
}

impl PathSegment {
    /// The segment as a child key, as understood by [`Node::get`](crate::Node::get).
    pub fn as_key(&self) -> String {
        match self {
            Self::Key(key) => key.clone(),
            Self::Index(idx) => idx.to_string(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(idx) => write!(f, "{idx}"),
        }
    }
}

/// Split a dotted path into segments.
///
/// Each dot-separated part is a key, optionally followed by one or more
/// `[n]` indices. Blank parts (`a..b`, a leading or trailing dot) contribute
/// nothing, and a bracket that does not hold a number is ignored.
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();

    for part in path.split('.') {
        let mut rest = part;
        while !rest.is_empty() {
            if let Some(bracketed) = rest.strip_prefix('[') {
                let (inner, after) = bracketed.split_once(']').unwrap_or((bracketed, ""));
                if let Ok(index) = inner.trim().parse::<usize>() {
                    segments.push(PathSegment::Index(index));
                }
                rest = after;
            } else {
                let end = rest.find('[').unwrap_or(rest.len());
                segments.push(PathSegment::Key(rest[..end].to_string()));
                rest = &rest[end..];
            }
        }
    }

    segments
}

/// Render segments back into dotted form (`a.b.0`).
pub fn join_path(segments: &[PathSegment]) -> String {
    segments
        .iter()
        .map(PathSegment::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_simple() {
        assert_eq!(parse_path("name"), vec![PathSegment::Key("name".to_string())]);
    }

    #[test]
    fn test_parse_path_mixed() {
        let path = parse_path("items[0].name");
        assert_eq!(
            path,
            vec![
                PathSegment::Key("items".to_string()),
                PathSegment::Index(0),
                PathSegment::Key("name".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_path_skips_empty_segments() {
        assert_eq!(parse_path(".a..b."), parse_path("a.b"));
        assert!(parse_path("").is_empty());
    }

    #[test]
    fn test_parse_path_chained_and_invalid_indices() {
        assert_eq!(
            parse_path("matrix[1][2]"),
            vec![
                PathSegment::Key("matrix".to_string()),
                PathSegment::Index(1),
                PathSegment::Index(2),
            ]
        );
        assert_eq!(parse_path("a[x].b"), parse_path("a.b"));
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(&parse_path("a[2].b")), "a.2.b");
    }
}
