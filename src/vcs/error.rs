use thiserror::Error;

use crate::exec::CommandError;
use crate::vcs::types::VcsKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VcsError {
    #[error("no tag ref for {tag:?} found in {repo:?}")]
    UnresolvedTag { repo: String, tag: String },

    #[error("ambiguous tag for {tag:?} found in {repo:?}: {refs:?}")]
    AmbiguousTag {
        repo: String,
        tag: String,
        refs: Vec<String>,
    },

    #[error("{0} unimplemented")]
    UnsupportedVcs(VcsKind),

    #[error("unexpected ls-remote output {output:?} from repo {repo:?}")]
    UnexpectedOutput { repo: String, output: String },

    #[error(transparent)]
    Command(#[from] CommandError),
}
