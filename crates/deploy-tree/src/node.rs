//! The configuration tree primitive
//!
//! A [`Node`] is either a scalar, an ordered sequence of child nodes, or an
//! ordered mapping of string keys to child nodes. Every node carries the
//! [`Source`] it was read from, so diagnostics can point back at the document
//! that introduced a value even after several layers have been merged.
//!
//! Nodes are built from `serde_json::Value` trees and flattened back into
//! them with [`Node::to_value`].

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};
use crate::path::{PathSegment, join_path, parse_path};
use crate::source::Source;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// Convert to the equivalent native value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
        }
    }

    /// Render the scalar as text, the way it would be substituted into a string.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::String(s) => s.clone(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// The shape of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Mapping(IndexMap<String, Node>),
}

/// A configuration value with provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    value: NodeValue,
    source: Source,
}

impl Node {
    /// Wrap a native value, recursively tagging every element with `source`.
    pub fn new(value: Value, source: &Source) -> Self {
        let value = match value {
            Value::Null => NodeValue::Scalar(Scalar::Null),
            Value::Bool(b) => NodeValue::Scalar(Scalar::Bool(b)),
            Value::Number(n) => NodeValue::Scalar(Scalar::Number(n)),
            Value::String(s) => NodeValue::Scalar(Scalar::String(s)),
            Value::Array(items) => NodeValue::Sequence(
                items
                    .into_iter()
                    .map(|item| Node::new(item, source))
                    .collect(),
            ),
            Value::Object(map) => NodeValue::Mapping(
                map.into_iter()
                    .map(|(key, item)| (key, Node::new(item, source)))
                    .collect(),
            ),
        };
        Self {
            value,
            source: source.clone(),
        }
    }

    /// Build a node from an already-shaped value.
    pub fn from_parts(value: NodeValue, source: Source) -> Self {
        Self { value, source }
    }

    /// A scalar leaf.
    pub fn scalar(value: impl Into<Scalar>, source: &Source) -> Self {
        Self::from_parts(NodeValue::Scalar(value.into()), source.clone())
    }

    /// An empty mapping.
    pub fn mapping(source: &Source) -> Self {
        Self::from_parts(NodeValue::Mapping(IndexMap::new()), source.clone())
    }

    /// An empty sequence.
    pub fn sequence(source: &Source) -> Self {
        Self::from_parts(NodeValue::Sequence(Vec::new()), source.clone())
    }

    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut NodeValue {
        &mut self.value
    }

    pub fn set_value(&mut self, value: NodeValue) {
        self.value = value;
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn set_source(&mut self, source: Source) {
        self.source = source;
    }

    /// Re-tag this node and every descendant with `source`.
    pub fn set_source_recursive(&mut self, source: &Source) {
        self.source = source.clone();
        match &mut self.value {
            NodeValue::Scalar(_) => {}
            NodeValue::Sequence(items) => {
                for item in items {
                    item.set_source_recursive(source);
                }
            }
            NodeValue::Mapping(map) => {
                for item in map.values_mut() {
                    item.set_source_recursive(source);
                }
            }
        }
    }

    /// Overwrite both value and source with those of `other`.
    pub fn replace_with(&mut self, other: Node) {
        self.value = other.value;
        self.source = other.source;
    }

    /// Flatten back into a native value.
    pub fn to_value(&self) -> Value {
        match &self.value {
            NodeValue::Scalar(scalar) => scalar.to_value(),
            NodeValue::Sequence(items) => Value::Array(items.iter().map(Node::to_value).collect()),
            NodeValue::Mapping(map) => {
                let mut out = Map::new();
                for (key, item) in map {
                    out.insert(key.clone(), item.to_value());
                }
                Value::Object(out)
            }
        }
    }

    /// True for sequences and mappings.
    pub fn is_array(&self) -> bool {
        !matches!(self.value, NodeValue::Scalar(_))
    }

    /// True for keyed collections only.
    pub fn is_assoc_array(&self) -> bool {
        matches!(self.value, NodeValue::Mapping(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.value, NodeValue::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match &self.value {
            NodeValue::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            NodeValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &self.value {
            NodeValue::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Number of direct children (0 for scalars).
    pub fn len(&self) -> usize {
        match &self.value {
            NodeValue::Scalar(_) => 0,
            NodeValue::Sequence(items) => items.len(),
            NodeValue::Mapping(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child keys in order; sequence elements are keyed by their index.
    pub fn keys(&self) -> Vec<String> {
        self.children().into_iter().map(|(key, _)| key).collect()
    }

    /// Direct children paired with their keys, in order.
    pub fn children(&self) -> Vec<(String, &Node)> {
        match &self.value {
            NodeValue::Scalar(_) => Vec::new(),
            NodeValue::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| (idx.to_string(), item))
                .collect(),
            NodeValue::Mapping(map) => map.iter().map(|(key, item)| (key.clone(), item)).collect(),
        }
    }

    /// Mutable access to every direct child, paired with its key.
    pub(crate) fn children_mut(&mut self) -> Vec<(String, &mut Node)> {
        match &mut self.value {
            NodeValue::Scalar(_) => Vec::new(),
            NodeValue::Sequence(items) => items
                .iter_mut()
                .enumerate()
                .map(|(idx, item)| (idx.to_string(), item))
                .collect(),
            NodeValue::Mapping(map) => map
                .iter_mut()
                .map(|(key, item)| (key.clone(), item))
                .collect(),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        match &self.value {
            NodeValue::Scalar(_) => None,
            NodeValue::Sequence(items) => key.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            NodeValue::Mapping(map) => map.get(key),
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        match &mut self.value {
            NodeValue::Scalar(_) => None,
            NodeValue::Sequence(items) => key
                .parse::<usize>()
                .ok()
                .and_then(move |idx| items.get_mut(idx)),
            NodeValue::Mapping(map) => map.get_mut(key),
        }
    }

    /// Insert or replace the child at `key`.
    ///
    /// Mappings accept any key. Sequences accept an existing index, or the
    /// index one past the end (which appends).
    pub fn set(&mut self, key: &str, node: Node) -> Result<()> {
        match &mut self.value {
            NodeValue::Scalar(_) => Err(Error::NotACollection {
                key: key.to_string(),
                source_name: self.source.to_string(),
            }),
            NodeValue::Sequence(items) => {
                let len = items.len();
                match key.parse::<usize>() {
                    Ok(idx) if idx < len => {
                        items[idx] = node;
                        Ok(())
                    }
                    Ok(idx) if idx == len => {
                        items.push(node);
                        Ok(())
                    }
                    _ => Err(Error::InvalidIndex {
                        key: key.to_string(),
                        len,
                    }),
                }
            }
            NodeValue::Mapping(map) => {
                map.insert(key.to_string(), node);
                Ok(())
            }
        }
    }

    /// Remove and return the child at `key`, preserving the order of the rest.
    pub fn unset(&mut self, key: &str) -> Option<Node> {
        match &mut self.value {
            NodeValue::Scalar(_) => None,
            NodeValue::Sequence(items) => match key.parse::<usize>() {
                Ok(idx) if idx < items.len() => Some(items.remove(idx)),
                _ => None,
            },
            NodeValue::Mapping(map) => map.shift_remove(key),
        }
    }

    /// Return the child at `key`, inserting one built from `default` if it is missing.
    ///
    /// The inserted child inherits this node's source.
    pub fn get_or_create(&mut self, key: &str, default: Value) -> Result<&mut Node> {
        if !self.has(key) {
            let child = Node::new(default, &self.source);
            self.set(key, child)?;
        }
        self.get_mut(key).ok_or_else(|| Error::InvalidArgument {
            path: key.to_string(),
        })
    }

    /// Descend along a dotted path. Returns `None` if any segment is missing.
    pub fn find(&self, path: &str) -> Option<&Node> {
        self.find_segments(&parse_path(path))
    }

    pub fn find_segments(&self, segments: &[PathSegment]) -> Option<&Node> {
        let mut current = self;
        for segment in segments {
            current = current.get(&segment.as_key())?;
        }
        Some(current)
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut Node> {
        self.find_segments_mut(&parse_path(path))
    }

    pub fn find_segments_mut(&mut self, segments: &[PathSegment]) -> Option<&mut Node> {
        let mut current = self;
        for segment in segments {
            current = current.get_mut(&segment.as_key())?;
        }
        Some(current)
    }

    /// Native value at a dotted path.
    pub fn get_property(&self, path: &str) -> Option<Value> {
        self.find(path).map(Node::to_value)
    }

    /// Replace the value at an existing dotted path, keeping that node's source.
    ///
    /// Never creates intermediate structure.
    pub fn set_property(&mut self, path: &str, value: Value) -> Result<()> {
        let segments = parse_path(path);
        let target = self
            .find_segments_mut(&segments)
            .ok_or_else(|| Error::InvalidArgument {
                path: join_path(&segments),
            })?;
        let source = target.source.clone();
        *target = Node::new(value, &source);
        Ok(())
    }

    /// Turn this node into a single-element sequence containing its former self.
    pub fn wrap_into_array(&mut self) {
        let inner = Node::from_parts(
            std::mem::replace(&mut self.value, NodeValue::Sequence(Vec::new())),
            self.source.clone(),
        );
        self.value = NodeValue::Sequence(vec![inner]);
    }

    /// Normalize a scalar into a single-element sequence; collections are left alone.
    pub fn transform_to_array(&mut self) {
        if self.is_scalar() {
            self.wrap_into_array();
        }
    }

    /// Append to a sequence, turning a scalar into a sequence first.
    ///
    /// Pushing onto a mapping inserts under the next free numeric key.
    pub fn push(&mut self, node: Node) {
        let value = std::mem::replace(&mut self.value, NodeValue::Sequence(Vec::new()));
        self.value = match value {
            NodeValue::Scalar(scalar) => {
                let former = Node::from_parts(NodeValue::Scalar(scalar), self.source.clone());
                NodeValue::Sequence(vec![former, node])
            }
            NodeValue::Sequence(mut items) => {
                items.push(node);
                NodeValue::Sequence(items)
            }
            NodeValue::Mapping(mut map) => {
                let mut idx = map.len();
                while map.contains_key(&idx.to_string()) {
                    idx += 1;
                }
                map.insert(idx.to_string(), node);
                NodeValue::Mapping(map)
            }
        };
    }
}

/// Serializes as the plain value, dropping sources.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.value {
            NodeValue::Scalar(scalar) => scalar.to_value().serialize(serializer),
            NodeValue::Sequence(items) => serializer.collect_seq(items),
            NodeValue::Mapping(map) => serializer.collect_map(map),
        }
    }
}
