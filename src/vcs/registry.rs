//! Fixed table from VCS command identifier to backend

use std::collections::HashMap;
use std::sync::Arc;

use crate::exec::CommandRunner;
use crate::vcs::backend::Vcs;
use crate::vcs::backends::{BzrVcs, GitVcs, HgVcs};
use crate::vcs::types::VcsKind;

/// Maps each known [`VcsKind`] to the backend that handles it.
pub struct VcsRegistry {
    backends: HashMap<VcsKind, Arc<dyn Vcs>>,
}

impl VcsRegistry {
    /// Create a registry from explicit backends, keyed by their own kind
    pub fn new(backends: Vec<Arc<dyn Vcs>>) -> Self {
        let backends = backends.into_iter().map(|vcs| (vcs.kind(), vcs)).collect();
        Self { backends }
    }

    /// Look up a backend by command identifier (e.g., "git")
    ///
    /// Returns `None` for identifiers with no registered backend.
    pub fn lookup(&self, cmd: &str) -> Option<Arc<dyn Vcs>> {
        let kind = cmd.parse::<VcsKind>().ok()?;
        self.get(kind)
    }

    /// Get the backend for a kind
    pub fn get(&self, kind: VcsKind) -> Option<Arc<dyn Vcs>> {
        self.backends.get(&kind).cloned()
    }
}

/// Create the default registry with every supported VCS kind
pub fn create_default_registry(runner: Arc<dyn CommandRunner>) -> VcsRegistry {
    VcsRegistry::new(vec![
        Arc::new(GitVcs::new(runner)),
        Arc::new(BzrVcs),
        Arc::new(HgVcs),
    ])
}
