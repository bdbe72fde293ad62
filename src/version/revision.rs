//! Declared version to concrete revision

use std::sync::Arc;

use tracing::debug;

use crate::parser::types::Dependency;
use crate::repo::info::RepoInfoResolver;
use crate::vcs::types::VcsKind;
use crate::version::error::ResolveError;
use crate::version::pseudo::{is_pseudo_version, pseudo_version_rev, strip_incompatible};

/// Resolved revision for one pinned dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRecord {
    pub path: String,
    pub vcs_kind: VcsKind,
    /// Commit the declared version points at (full hash, or a prefix for pseudo-versions)
    pub revision: String,
    /// Repository the revision lives in
    pub repo_url: String,
}

/// Turns a dependency's declared version into a commit identifier
pub struct RevisionResolver {
    repo_info: Arc<RepoInfoResolver>,
}

impl RevisionResolver {
    pub fn new(repo_info: Arc<RepoInfoResolver>) -> Self {
        Self { repo_info }
    }

    /// Resolve one dependency
    ///
    /// Pseudo-versions are decoded locally; tagged versions cost one
    /// `resolve_tag` query.
    ///
    /// # Panics
    /// If the version is empty once `+incompatible` is removed. Callers
    /// must filter unpinned dependencies first.
    pub async fn resolve(&self, dependency: &Dependency) -> Result<RevisionRecord, ResolveError> {
        let info = self
            .repo_info
            .resolve(dependency)
            .await
            .map_err(|source| ResolveError::VcsInfo {
                path: dependency.path.clone(),
                source,
            })?;

        let kind = info.vcs.kind();
        if kind != VcsKind::Git {
            return Err(ResolveError::UnsupportedVcs {
                kind,
                path: dependency.path.clone(),
                version: dependency.version.clone(),
            });
        }

        let revision = if is_pseudo_version(&dependency.version) {
            pseudo_version_rev(&dependency.version).map_err(|source| {
                ResolveError::InvalidPseudoVersion {
                    version: dependency.version.clone(),
                    source,
                }
            })?
        } else {
            let tag = strip_incompatible(&dependency.version);
            assert!(
                !tag.is_empty(),
                "empty version for {} (declared {:?})",
                dependency.path,
                dependency.version
            );
            info.vcs
                .resolve_tag(&info.repo_url, tag)
                .await
                .map_err(|source| ResolveError::Tag {
                    tag: tag.to_string(),
                    repo: info.repo_url.clone(),
                    source,
                })?
        };

        debug!(
            "Resolved {}@{} to {}",
            dependency.path, dependency.version, revision
        );

        Ok(RevisionRecord {
            path: dependency.path.clone(),
            vcs_kind: kind,
            revision,
            repo_url: info.repo_url,
        })
    }
}
