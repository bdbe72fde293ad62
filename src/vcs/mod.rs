//! Version control abstraction
//!
//! - [`backend`]: the [`Vcs`](backend::Vcs) trait every VCS implements
//! - [`backends`]: git (functional), bzr and hg (placeholders)
//! - [`registry`]: command identifier to backend table
//! - [`types`]: [`VcsKind`](types::VcsKind)
//! - [`error`]: tag resolution errors

pub mod backend;
pub mod backends;
pub mod error;
pub mod registry;
pub mod types;

pub use backend::Vcs;
pub use error::VcsError;
pub use registry::{VcsRegistry, create_default_registry};
pub use types::VcsKind;
