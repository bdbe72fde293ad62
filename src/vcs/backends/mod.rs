//! Concrete VCS backends

pub mod bzr;
pub mod git;
pub mod hg;

pub use bzr::BzrVcs;
pub use git::GitVcs;
pub use hg::HgVcs;
