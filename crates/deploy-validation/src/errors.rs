//! The validation error bag

use std::fmt;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Errors and warnings collected during one or more validation passes.
///
/// Errors are kept in the order they were recorded, alongside the key each
/// one is about (a key may appear more than once). Warnings are keyed: a
/// later warning for the same key replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<String>,
    keys: Vec<String>,
    warnings: IndexMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.keys.push(key.into());
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.warnings.insert(key.into(), message.into());
    }

    /// True when at least one error has been recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Offending keys, parallel to [`errors`](Self::errors).
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn warnings(&self) -> &IndexMap<String, String> {
        &self.warnings
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Append `other`'s errors after ours and overwrite warnings by key.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
        self.keys.extend(other.keys);
        for (key, message) in other.warnings {
            self.warnings.insert(key, message);
        }
    }

    /// `Ok(self)` if no errors were recorded, otherwise the whole bag as an error.
    pub fn into_result(self) -> Result<ValidationErrors> {
        if self.has_errors() {
            tracing::debug!(errors = self.errors.len(), "Validation failed");
            Err(Error::ValidationFailed(self))
        } else {
            Ok(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, message) in self.errors.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {message}")?;
        }
        Ok(())
    }
}
