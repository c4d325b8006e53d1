//! Blueprint templates and variant expansion for Deploy Manager
//!
//! A blueprint is a configuration template with placeholders such as
//! `%slug.with-hyphens%`. Expanding it for a list of identifiers (usually
//! branch names) yields one concrete host configuration per identifier.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use deploy_blueprint::{BlueprintTemplate, ProjectSettings};
//! use deploy_tree::{Node, Source};
//! use serde_json::json;
//!
//! let template = BlueprintTemplate::new(
//!     Node::new(json!({"host": "%project-key%-%slug.with-hyphens%"}), &Source::new("fabfile.yaml")),
//!     Arc::new(ProjectSettings::new("MyShop")),
//! );
//! assert_eq!(
//!     template.expand("develop").to_value(),
//!     json!({"host": "mys-develop"}),
//! );
//! ```

pub mod configuration;
pub mod error;
pub mod project;
pub mod slug;
pub mod template;

pub use configuration::{BlueprintConfiguration, ConfigRegistrar, DEFAULT_SCOPE};
pub use error::{Error, Result};
pub use project::ProjectSettings;
pub use slug::slugify;
pub use template::BlueprintTemplate;
