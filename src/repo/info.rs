//! Dependency to repository information

use std::sync::Arc;

use crate::parser::types::Dependency;
use crate::repo::discovery::RepoRootDiscovery;
use crate::repo::error::RepoInfoError;
use crate::vcs::backend::Vcs;
use crate::vcs::registry::VcsRegistry;

/// Repository information derived once per dependency
#[derive(Clone)]
pub struct RepoInfo {
    pub dependency: Dependency,
    /// Repository URL reported by discovery
    pub repo_url: String,
    /// Backend that handles the repository's VCS
    pub vcs: Arc<dyn Vcs>,
}

impl std::fmt::Debug for RepoInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoInfo")
            .field("dependency", &self.dependency)
            .field("repo_url", &self.repo_url)
            .field("vcs", &self.vcs.kind())
            .finish()
    }
}

/// Combines repository-root discovery with the VCS registry.
pub struct RepoInfoResolver {
    discovery: Arc<dyn RepoRootDiscovery>,
    registry: Arc<VcsRegistry>,
}

impl RepoInfoResolver {
    pub fn new(discovery: Arc<dyn RepoRootDiscovery>, registry: Arc<VcsRegistry>) -> Self {
        Self {
            discovery,
            registry,
        }
    }

    /// Find the repository and VCS backend for a pinned dependency
    pub async fn resolve(&self, dependency: &Dependency) -> Result<RepoInfo, RepoInfoError> {
        let root = self.discovery.repo_root(&dependency.path).await?;
        let vcs = self
            .registry
            .lookup(&root.vcs)
            .ok_or_else(|| RepoInfoError::UnknownVcs(root.vcs.clone()))?;

        Ok(RepoInfo {
            dependency: dependency.clone(),
            repo_url: root.repo,
            vcs,
        })
    }
}
