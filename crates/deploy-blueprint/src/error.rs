//! Error types for deploy-blueprint

/// Result type for deploy-blueprint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or expanding blueprints
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No host, docker or default template exists for the key
    #[error("Blueprint template not found for `{key}`")]
    TemplateNotFound { key: String },

    /// The `blueprints` list is malformed; carries every problem found
    #[error(transparent)]
    Validation(#[from] deploy_validation::Error),

    /// A registrar refused an expanded variant
    #[error("Failed to register variant `{identifier}` of blueprint `{config_name}`: {message}")]
    Registration {
        config_name: String,
        identifier: String,
        message: String,
    },
}
