//! `inheritsFrom` resolution
//!
//! A configuration may name other configurations of the same kind it builds
//! upon:
//!
//! ```yaml
//! hosts:
//!   base: { user: deploy, port: 22 }
//!   ci:   { port: 2222 }
//!   web:
//!     inheritsFrom: [base, ci]
//!     host: web.example.com
//! ```
//!
//! The configuration's own values always win. Among parents, later entries
//! win over earlier ones (`web.port` above is `2222`). Parents are resolved
//! recursively before they are layered underneath.

use deploy_tree::{MergeOptions, Node};
use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Key listing the parents of a configuration.
pub const INHERITS_FROM: &str = "inheritsFrom";

/// Resolve every configuration in `configs`, preserving their order.
///
/// The `inheritsFrom` key is removed from the results.
pub fn resolve_inheritance(
    configs: &IndexMap<String, Node>,
    options: &MergeOptions,
) -> Result<IndexMap<String, Node>> {
    let mut resolved = IndexMap::new();
    for name in configs.keys() {
        let mut stack = Vec::new();
        resolve_one(name, configs, options, &mut resolved, &mut stack)?;
    }

    let mut ordered = IndexMap::with_capacity(configs.len());
    for name in configs.keys() {
        if let Some(config) = resolved.shift_remove(name) {
            ordered.insert(name.clone(), config);
        }
    }
    Ok(ordered)
}

fn resolve_one(
    name: &str,
    configs: &IndexMap<String, Node>,
    options: &MergeOptions,
    resolved: &mut IndexMap<String, Node>,
    stack: &mut Vec<String>,
) -> Result<Node> {
    if let Some(done) = resolved.get(name) {
        return Ok(done.clone());
    }
    if stack.iter().any(|entry| entry == name) {
        stack.push(name.to_string());
        return Err(Error::InheritanceCycle {
            chain: stack.join(" -> "),
        });
    }

    let Some(config) = configs.get(name) else {
        return Err(Error::HostNotFound {
            name: name.to_string(),
        });
    };

    let mut result = config.clone();
    if let Some(parents) = result.unset(INHERITS_FROM) {
        stack.push(name.to_string());
        for parent in parents.iterate_backwards_over_values() {
            let parent_name = match parent {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            if !configs.contains_key(&parent_name) {
                return Err(Error::UnknownParent {
                    config: name.to_string(),
                    parent: parent_name,
                });
            }
            let parent_config = resolve_one(&parent_name, configs, options, resolved, stack)?;
            tracing::debug!(config = %name, parent = %parent_name, "Layering inherited configuration");
            result.base_on_top(&parent_config, options);
        }
        stack.pop();
    }

    resolved.insert(name.to_string(), result.clone());
    Ok(result)
}
