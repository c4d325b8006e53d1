//! Trees from JSON literals.

use deploy_tree::{Node, Source};
use serde_json::Value;

/// Build a tree whose nodes all come from `fabfile.yaml`.
pub fn node(value: Value) -> Node {
    node_from(value, "fabfile.yaml")
}

/// Build a tree whose nodes all come from `origin`.
pub fn node_from(value: Value, origin: &str) -> Node {
    Node::new(value, &Source::new(origin))
}
