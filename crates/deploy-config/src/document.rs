//! Parsed configuration documents

use deploy_tree::{Node, SourceRegistry};
use serde_json::Value;

use crate::error::{Error, Result};

/// One YAML document and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub origin: String,
    pub content: String,
}

impl Document {
    pub fn new(origin: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            content: content.into(),
        }
    }

    /// Parse into a tree tagged with this document's interned source.
    ///
    /// An empty document yields an empty mapping.
    pub fn parse(&self, sources: &mut SourceRegistry) -> Result<Node> {
        let value: Value = serde_yaml::from_str(&self.content).map_err(|e| Error::Parse {
            origin: self.origin.clone(),
            message: e.to_string(),
        })?;
        let value = match value {
            Value::Null => Value::Object(Default::default()),
            Value::Object(_) => value,
            _ => {
                return Err(Error::NotAMapping {
                    origin: self.origin.clone(),
                });
            }
        };
        Ok(Node::new(value, &sources.intern(&self.origin)))
    }
}
