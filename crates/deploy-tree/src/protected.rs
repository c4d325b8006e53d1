//! Protected properties
//!
//! A protected property is a dotted path whose value must survive a merge
//! untouched, whatever the overriding layer contains at that path. The list
//! travels inside [`MergeOptions`](crate::MergeOptions); merges snapshot every
//! protected path before they run and write the snapshots back afterwards.

use crate::node::{Node, NodeValue};
use crate::source::Source;
use crate::path::{PathSegment, parse_path};

/// Ordered, de-duplicated list of protected dotted paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectedProperties {
    paths: Vec<String>,
}

impl ProtectedProperties {
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Build from an explicit list of paths.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut protected = Self::new();
        protected.replace(paths.into_iter().map(Into::into));
        protected
    }

    /// Replace the list with the scalar-or-list value found at `settings_key`.
    ///
    /// A missing key clears the list.
    pub fn configure(&mut self, node: &Node, settings_key: &str) {
        let paths: Vec<String> = match node.find(settings_key) {
            None => Vec::new(),
            Some(setting) => match setting.value() {
                NodeValue::Scalar(scalar) => vec![scalar.to_text()],
                NodeValue::Sequence(_) | NodeValue::Mapping(_) => setting
                    .children()
                    .into_iter()
                    .filter_map(|(_, child)| child.as_scalar().map(|s| s.to_text()))
                    .collect(),
            },
        };
        self.replace(paths);
        tracing::debug!(paths = ?self.paths, settings_key, "Configured protected properties");
    }

    /// Forget every protected path.
    pub fn reset(&mut self) {
        self.paths.clear();
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Deep-clone the current value of every protected path present in `node`.
    pub fn save(&self, node: &Node) -> SavedProperties {
        let entries = self
            .paths
            .iter()
            .filter_map(|path| {
                let segments = parse_path(path);
                node.find_segments(&segments)
                    .map(|found| (path.clone(), segments, found.clone()))
            })
            .collect();
        SavedProperties { entries }
    }

    fn replace(&mut self, paths: impl IntoIterator<Item = String>) {
        self.paths.clear();
        for path in paths {
            if !path.trim().is_empty() && !self.paths.contains(&path) {
                self.paths.push(path);
            }
        }
    }
}

/// Snapshots taken by [`ProtectedProperties::save`].
#[derive(Debug, Clone, Default)]
pub struct SavedProperties {
    entries: Vec<(String, Vec<PathSegment>, Node)>,
}

impl SavedProperties {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Write every snapshot back to its path in `node`.
    ///
    /// The path is looked up again, so this works even when the subtree that
    /// used to contain it was replaced. Missing intermediate mappings are
    /// recreated, and an intermediate scalar or list standing in the way is
    /// replaced by a mapping.
    pub fn restore(&self, node: &mut Node) {
        for (path, segments, saved) in &self.entries {
            if let Some(target) = node.find_segments_mut(segments) {
                target.replace_with(saved.clone());
                continue;
            }
            tracing::debug!(path = %path, "Recreating protected property after merge");
            insert_creating(node, segments, saved.clone());
        }
    }
}

fn insert_creating(node: &mut Node, segments: &[PathSegment], value: Node) {
    let Some((last, parents)) = segments.split_last() else {
        node.replace_with(value);
        return;
    };

    let source = value.source().clone();
    let mut current = node;
    for segment in parents {
        let key = segment.as_key();
        make_slot(current, &key, &source);
        let Some(next) = current.get_mut(&key) else {
            return;
        };
        current = next;
    }

    let key = last.as_key();
    make_slot(current, &key, &source);
    if let Some(target) = current.get_mut(&key) {
        target.replace_with(value);
    }
}

/// Make sure `node` is a collection holding a child at `key`.
///
/// Scalars, and sequences that cannot take `key` as an index, become an
/// empty mapping first.
fn make_slot(node: &mut Node, key: &str, source: &Source) {
    if node.is_scalar() {
        node.replace_with(Node::mapping(source));
    }
    if node.has(key) {
        return;
    }
    if node.set(key, Node::mapping(source)).is_err() {
        let mut mapping = Node::mapping(source);
        if let NodeValue::Mapping(map) = mapping.value_mut() {
            map.insert(key.to_string(), Node::mapping(source));
        }
        node.replace_with(mapping);
    }
}
