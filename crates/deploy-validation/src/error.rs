//! Error types for deploy-validation

use crate::errors::ValidationErrors;

/// Result type for deploy-validation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised once a validation pass has finished
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more checks failed; carries every failure of the pass
    #[error("Validation failed with {count} error(s):\n{bag}", count = .0.len(), bag = .0)]
    ValidationFailed(ValidationErrors),
}
