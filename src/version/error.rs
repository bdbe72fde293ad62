use thiserror::Error;

use crate::repo::error::RepoInfoError;
use crate::vcs::error::VcsError;
use crate::vcs::types::VcsKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PseudoVersionError {
    #[error("invalid pseudo-version {version:?}: {reason}")]
    InvalidPseudoVersion { version: String, reason: String },
}

/// Failure to turn one dependency's version into a revision
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot get VCS info for {path}: {source}")]
    VcsInfo {
        path: String,
        #[source]
        source: RepoInfoError,
    },

    #[error("unsupported VCS {kind} in module {path}@{version}")]
    UnsupportedVcs {
        kind: VcsKind,
        path: String,
        version: String,
    },

    #[error("cannot get rev from {version:?}: {source}")]
    InvalidPseudoVersion {
        version: String,
        #[source]
        source: PseudoVersionError,
    },

    #[error("cannot resolve {tag:?} in {repo}: {source}")]
    Tag {
        tag: String,
        repo: String,
        #[source]
        source: VcsError,
    },
}
