//! Repository lookup for import paths
//!
//! - [`discovery`]: import path to repository root (static hosts, go-get meta tags)
//! - [`info`]: combines discovery with the VCS registry
//! - [`error`]: discovery and lookup errors

pub mod discovery;
pub mod error;
pub mod info;

pub use discovery::{GoImportDiscovery, RepoRoot, RepoRootDiscovery};
pub use info::{RepoInfo, RepoInfoResolver};
