//! Backend trait for resolving version names against a repository

#[cfg(test)]
use mockall::automock;

use crate::vcs::error::VcsError;
use crate::vcs::types::VcsKind;

/// Operations a version control system must support
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Vcs: Send + Sync {
    /// Returns the kind of VCS this implementation handles
    fn kind(&self) -> VcsKind;

    /// Resolves a tag name to the full commit identifier it points at
    ///
    /// # Arguments
    /// * `repo_url` - Remote repository location (e.g., "https://github.com/pkg/errors")
    /// * `tag` - Tag name without the `refs/tags/` prefix (e.g., "v0.9.1")
    async fn resolve_tag(&self, repo_url: &str, tag: &str) -> Result<String, VcsError>;
}
