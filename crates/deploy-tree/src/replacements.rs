//! Placeholder substitution over string leaves

use indexmap::IndexMap;

use crate::node::{Node, NodeValue, Scalar};

/// Table of placeholder → replacement text.
///
/// Longer placeholders are always applied before shorter ones, so a key that
/// is a textual prefix of another (`%slug` vs `%slug.with-hyphens`) can never
/// eat part of the longer placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    entries: IndexMap<String, String>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a placeholder.
    pub fn insert(&mut self, placeholder: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(placeholder.into(), value.into());
    }

    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.entries.get(placeholder).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Substitute every placeholder in `text`.
    pub fn apply(&self, text: &str) -> String {
        apply_ordered(&self.ordered(), text)
    }

    fn ordered(&self) -> Vec<(&str, &str)> {
        let mut ordered: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        // stable: equal lengths keep insertion order
        ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        ordered
    }
}

impl<K, V> FromIterator<(K, V)> for Replacements
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

fn apply_ordered(ordered: &[(&str, &str)], text: &str) -> String {
    let mut result = text.to_string();
    for (placeholder, value) in ordered {
        if result.contains(placeholder) {
            result = result.replace(placeholder, value);
        }
    }
    result
}

impl Node {
    /// Substitute placeholders in every string leaf, in place.
    ///
    /// Subtrees whose key is listed in `ignore_keys` are left untouched.
    pub fn expand_replacements(&mut self, table: &Replacements, ignore_keys: &[&str]) {
        if table.is_empty() {
            return;
        }
        expand_node(self, &table.ordered(), ignore_keys);
    }
}

fn expand_node(node: &mut Node, ordered: &[(&str, &str)], ignore_keys: &[&str]) {
    if let NodeValue::Scalar(Scalar::String(text)) = node.value_mut() {
        let expanded = apply_ordered(ordered, text);
        *text = expanded;
        return;
    }
    for (key, child) in node.children_mut() {
        if ignore_keys.contains(&key.as_str()) {
            continue;
        }
        expand_node(child, ordered, ignore_keys);
    }
}
