//! Provenance handles for configuration values
//!
//! Every [`Node`](crate::Node) carries a [`Source`] naming where its value came
//! from (usually the path of the document it was read from). Sources are
//! interned through a [`SourceRegistry`] so that all values read from the same
//! origin share a single allocation and can be compared by identity.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Interned provenance identifier.
///
/// Cloning a `Source` is cheap: it only bumps a reference count.
#[derive(Clone)]
pub struct Source {
    origin: Arc<str>,
}

impl Source {
    /// Create a standalone source that is not registered anywhere.
    ///
    /// Prefer [`SourceRegistry::intern`] when building trees from documents,
    /// so that equal origins share one handle.
    pub fn new(origin: impl AsRef<str>) -> Self {
        Self {
            origin: Arc::from(origin.as_ref()),
        }
    }

    /// Source used for values synthesized in code rather than read from a document.
    pub fn internal() -> Self {
        Self::new("<internal>")
    }

    /// The origin string (e.g. a file path).
    pub fn as_str(&self) -> &str {
        &self.origin
    }

    /// Identity comparison: true when both handles came from the same interned entry.
    pub fn ptr_eq(&self, other: &Source) -> bool {
        Arc::ptr_eq(&self.origin, &other.origin)
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.origin == other.origin
    }
}

impl Eq for Source {}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Source").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interning table for [`Source`] handles.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    sources: HashMap<String, Source>,
}

impl SourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Return the shared handle for `origin`, creating it on first use.
    pub fn intern(&mut self, origin: &str) -> Source {
        if let Some(source) = self.sources.get(origin) {
            return source.clone();
        }
        let source = Source::new(origin);
        self.sources.insert(origin.to_string(), source.clone());
        source
    }

    /// Number of distinct origins seen so far.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
