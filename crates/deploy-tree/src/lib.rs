//! Configuration tree and merge engine for Deploy Manager
//!
//! This crate provides the data structure every other part of Deploy Manager
//! consumes configuration through:
//!
//! - **Provenance**: every value remembers the document it came from ([`Source`])
//! - **Tree**: [`Node`], a scalar / sequence / mapping value with ordered keys
//! - **Addressing**: dotted paths (`database.password`, `needs[0]`)
//! - **Merging**: override-wins [`Node::merge`] and base-wins [`Node::base_on_top`],
//!   with [`ProtectedProperties`] exempt from being overwritten
//! - **Expansion**: placeholder substitution over string leaves ([`Replacements`])
//!
//! # Example
//!
//! ```
//! use deploy_tree::{MergeOptions, Node, ProtectedProperties, SourceRegistry};
//! use serde_json::json;
//!
//! let mut sources = SourceRegistry::new();
//! let mut base = Node::new(
//!     json!({"database": {"user": "app", "password": "secret"}}),
//!     &sources.intern("fabfile.yaml"),
//! );
//! let local = Node::new(
//!     json!({"database": {"user": "me", "password": "oops"}}),
//!     &sources.intern("fabfile.local.yaml"),
//! );
//!
//! let options = MergeOptions::with_protected(ProtectedProperties::from_paths(["database.password"]));
//! base.merge(&local, &options);
//!
//! assert_eq!(base.get_property("database.user"), Some(json!("me")));
//! assert_eq!(base.get_property("database.password"), Some(json!("secret")));
//! ```

pub mod error;
pub mod merge;
pub mod node;
pub mod path;
pub mod protected;
pub mod replacements;
pub mod source;
pub mod traverse;

pub use error::{Error, Result};
pub use merge::MergeOptions;
pub use node::{Node, NodeValue, Scalar};
pub use path::{PathSegment, parse_path};
pub use protected::{ProtectedProperties, SavedProperties};
pub use replacements::Replacements;
pub use source::{Source, SourceRegistry};
pub use traverse::Visit;
