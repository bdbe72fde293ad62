//! Commit metadata lookup
//!
//! Report generation needs the canonical hash and commit time of both the
//! recorded and the resolved revision. [`CommitDates`] is the seam; the
//! [`git`] backend answers from local clones.

pub mod git;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

use crate::exec::CommandError;

pub use git::GitCommitDates;

/// Canonical identity and timestamp of one commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub hash: String,
    pub time: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error("cannot fetch {repo}: {source}")]
    FetchFailed {
        repo: String,
        #[source]
        source: CommandError,
    },

    #[error("commit {reference:?} not found in {dir}: {source}")]
    CommitNotFound {
        reference: String,
        dir: PathBuf,
        #[source]
        source: CommandError,
    },

    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("unexpected git log output {0:?}")]
    UnexpectedLog(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Looks up commit metadata for a revision of a dependency's repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CommitDates: Send + Sync {
    /// Resolve `reference` (full hash or prefix) in the repository at `repo_url`
    ///
    /// `path` is the dependency's import path and identifies its local clone.
    async fn commit_info(
        &self,
        path: &str,
        repo_url: &str,
        reference: &str,
    ) -> Result<CommitInfo, CommitError>;
}
