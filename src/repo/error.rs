use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot find repository root for {path}: {reason}")]
    RepoRootNotFound { path: String, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum RepoInfoError {
    #[error("cannot find module root: {0}")]
    RepoRootNotFound(#[from] DiscoveryError),

    #[error("unknown VCS kind {0:?}")]
    UnknownVcs(String),
}
