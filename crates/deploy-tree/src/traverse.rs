//! Whole-tree traversal helpers

use serde_json::Value;

use crate::node::Node;

/// Pre-order iterator over a tree, yielding each node with its key path.
///
/// Created by [`Node::visit`].
pub struct Visit<'a> {
    stack: Vec<(Vec<String>, &'a Node)>,
}

impl<'a> Iterator for Visit<'a> {
    type Item = (Vec<String>, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        for (key, child) in node.children().into_iter().rev() {
            let mut child_path = path.clone();
            child_path.push(key);
            self.stack.push((child_path, child));
        }
        Some((path, node))
    }
}

impl Node {
    /// Walk the tree in pre-order: this node first (with an empty path), then
    /// each child subtree in order.
    pub fn visit(&self) -> Visit<'_> {
        Visit {
            stack: vec![(Vec::new(), self)],
        }
    }

    /// Every descendant stored under the key `needle`.
    ///
    /// Direct children are always inspected; the search descends one more
    /// level for each unit of `max_depth`.
    pub fn find_nodes(&self, needle: &str, max_depth: usize) -> Vec<&Node> {
        let mut found = Vec::new();
        collect_nodes(self, needle, max_depth, &mut found);
        found
    }

    /// Raw child values, last child first. A scalar yields its own value.
    pub fn iterate_backwards_over_values(&self) -> std::vec::IntoIter<Value> {
        let values: Vec<Value> = if self.is_array() {
            self.children()
                .into_iter()
                .rev()
                .map(|(_, child)| child.to_value())
                .collect()
        } else {
            vec![self.to_value()]
        };
        values.into_iter()
    }
}

fn collect_nodes<'a>(node: &'a Node, needle: &str, depth: usize, found: &mut Vec<&'a Node>) {
    for (key, child) in node.children() {
        if key == needle {
            found.push(child);
        }
        if depth > 0 && child.is_array() {
            collect_nodes(child, needle, depth - 1, found);
        }
    }
}
