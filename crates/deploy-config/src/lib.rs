//! Configuration service for Deploy Manager
//!
//! Reads a project's fabfile and its override layers, merges them under the
//! project's protected properties, expands blueprint variants, resolves
//! `inheritsFrom` chains and validates the resulting hosts.
//!
//! # Example
//!
//! ```
//! use deploy_config::{ConfigurationService, Document};
//!
//! let base = Document::new(
//!     "fabfile.yaml",
//!     "name: MyShop\nprotectedProperties: [hosts.prod.rootFolder]\nhosts:\n  prod:\n    type: prod\n    rootFolder: /var/www\n",
//! );
//! let local = Document::new("fabfile.local.yaml", "hosts:\n  prod:\n    rootFolder: /tmp\n");
//!
//! let service = ConfigurationService::from_documents(&base, &[local]).unwrap();
//! assert_eq!(
//!     service.host("prod").unwrap().get_property("rootFolder"),
//!     Some(serde_json::json!("/var/www")),
//! );
//! ```

pub mod document;
pub mod error;
pub mod host;
pub mod inheritance;
pub mod loader;
pub mod service;

pub use document::Document;
pub use error::{Error, Result};
pub use inheritance::{INHERITS_FROM, resolve_inheritance};
pub use loader::{ConfigLoader, FABFILE, LOCAL_OVERRIDES};
pub use service::ConfigurationService;
