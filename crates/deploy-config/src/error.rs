//! Error types for deploy-config

use std::path::PathBuf;

/// Result type for deploy-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or resolving configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The required fabfile is missing
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// A document could not be parsed
    #[error("Failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    /// A document parsed, but its top level is not a mapping
    #[error("Expected a mapping at the top level of {origin}")]
    NotAMapping { origin: String },

    /// Lookup of an unknown host
    #[error("Host not found: {name}")]
    HostNotFound { name: String },

    /// Lookup of an unknown docker host
    #[error("Docker host not found: {name}")]
    DockerHostNotFound { name: String },

    /// `inheritsFrom` names a configuration that does not exist
    #[error("`{config}` inherits from unknown configuration `{parent}`")]
    UnknownParent { config: String, parent: String },

    /// `inheritsFrom` chains loop back on themselves
    #[error("Inheritance cycle detected: {chain}")]
    InheritanceCycle { chain: String },

    // Transparent wrappers for underlying crate errors
    /// Batched validation failure
    #[error(transparent)]
    Validation(#[from] deploy_validation::Error),

    /// Blueprint resolution or expansion error
    #[error(transparent)]
    Blueprint(#[from] deploy_blueprint::Error),

    /// Tree addressing error
    #[error(transparent)]
    Tree(#[from] deploy_tree::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
