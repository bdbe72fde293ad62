//! Mercurial backend placeholder

use crate::vcs::backend::Vcs;
use crate::vcs::error::VcsError;
use crate::vcs::types::VcsKind;

/// Mercurial backend
///
/// Tag resolution is not implemented.
pub struct HgVcs;

#[async_trait::async_trait]
impl Vcs for HgVcs {
    fn kind(&self) -> VcsKind {
        VcsKind::Hg
    }

    async fn resolve_tag(&self, _repo_url: &str, _tag: &str) -> Result<String, VcsError> {
        Err(VcsError::UnsupportedVcs(VcsKind::Hg))
    }
}
