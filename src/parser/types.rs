//! Common types for parsers

use std::collections::HashMap;

/// Previously recorded version per import path
pub type BaselineMap = HashMap<String, String>;

/// A version-controlled dependency as declared by the module graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Import path (e.g., "github.com/pkg/errors")
    pub path: String,
    /// Declared version; empty when the dependency is unpinned
    pub version: String,
}

impl Dependency {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
        }
    }

    /// Whether the dependency names a version at all
    pub fn is_pinned(&self) -> bool {
        !self.version.is_empty()
    }
}
