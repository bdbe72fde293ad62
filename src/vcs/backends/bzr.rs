//! Bazaar backend placeholder

use crate::vcs::backend::Vcs;
use crate::vcs::error::VcsError;
use crate::vcs::types::VcsKind;

/// Bazaar backend
///
/// Registered so that discovery results naming bzr map to a known kind; tag
/// resolution is not implemented.
pub struct BzrVcs;

#[async_trait::async_trait]
impl Vcs for BzrVcs {
    fn kind(&self) -> VcsKind {
        VcsKind::Bzr
    }

    async fn resolve_tag(&self, _repo_url: &str, _tag: &str) -> Result<String, VcsError> {
        Err(VcsError::UnsupportedVcs(VcsKind::Bzr))
    }
}
