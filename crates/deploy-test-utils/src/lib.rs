//! Shared test utilities for the deploy-manager workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`] builder writing fabfiles into a temp dir
//! - [`tree`]: shorthand for building trees from JSON literals

pub mod project;
pub mod tree;

pub use project::TestProject;
pub use tree::{node, node_from};
