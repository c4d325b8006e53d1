//! Error types for deploy-tree

/// Result type for deploy-tree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while addressing or mutating a configuration tree
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dotted path that was required to exist could not be found
    #[error("Invalid argument: property path `{path}` does not exist")]
    InvalidArgument { path: String },

    /// A keyed operation was attempted on a node that cannot hold keys
    #[error("Cannot set key `{key}` on a scalar node from {source_name}")]
    NotACollection { key: String, source_name: String },

    /// A sequence was addressed with a key that is not a valid index
    #[error("Invalid sequence index `{key}` (length {len})")]
    InvalidIndex { key: String, len: usize },
}
