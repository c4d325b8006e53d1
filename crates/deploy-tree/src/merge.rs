//! Deep merge of configuration trees
//!
//! Two directions are supported:
//!
//! - [`Node::merge`]: the argument overrides the receiver.
//! - [`Node::base_on_top`]: the receiver wins; the argument only fills gaps.
//!
//! Recursion happens only where both sides hold a mapping at the same key.
//! Any other combination (scalar vs mapping, sequence vs sequence, ...) is a
//! wholesale replacement. Sequences are never concatenated.

use crate::node::{Node, NodeValue};
use crate::protected::ProtectedProperties;

/// Settings threaded through every merge call.
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    protected: ProtectedProperties,
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_protected(protected: ProtectedProperties) -> Self {
        Self { protected }
    }

    pub fn protected(&self) -> &ProtectedProperties {
        &self.protected
    }

    pub fn protected_mut(&mut self) -> &mut ProtectedProperties {
        &mut self.protected
    }
}

impl Node {
    /// Merge `overrides` into this node; values from `overrides` win.
    ///
    /// Protected paths keep the value they had in the receiver.
    pub fn merge(&mut self, overrides: &Node, options: &MergeOptions) {
        let saved = options.protected().save(self);
        merge_recursive(self, overrides);
        saved.restore(self);
    }

    /// Layer `lower` underneath this node; values already present here win.
    ///
    /// Protected paths keep the value they had in the receiver.
    pub fn base_on_top(&mut self, lower: &Node, options: &MergeOptions) {
        let saved = options.protected().save(self);
        base_on_top_recursive(self, lower);
        saved.restore(self);
    }
}

fn merge_recursive(base: &mut Node, overrides: &Node) {
    if !(base.is_assoc_array() && overrides.is_assoc_array()) {
        base.replace_with(overrides.clone());
        return;
    }
    let (NodeValue::Mapping(base_map), NodeValue::Mapping(override_map)) =
        (base.value_mut(), overrides.value())
    else {
        return;
    };

    for (key, override_child) in override_map {
        let recurse = override_child.is_assoc_array()
            && base_map.get(key).is_some_and(Node::is_assoc_array);
        if recurse {
            if let Some(base_child) = base_map.get_mut(key) {
                merge_recursive(base_child, override_child);
            }
        } else {
            base_map.insert(key.clone(), override_child.clone());
        }
    }
}

fn base_on_top_recursive(receiver: &mut Node, lower: &Node) {
    let (NodeValue::Mapping(receiver_map), NodeValue::Mapping(lower_map)) =
        (receiver.value_mut(), lower.value())
    else {
        return;
    };

    for (key, lower_child) in lower_map {
        match receiver_map.get_mut(key) {
            None => {
                receiver_map.insert(key.clone(), lower_child.clone());
            }
            Some(existing) => {
                if existing.is_assoc_array() {
                    base_on_top_recursive(existing, lower_child);
                }
            }
        }
    }
}
