//! Version resolution layer
//!
//! Turns each pinned dependency's declared version into the revision it
//! points at.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Batch    │────▶│  Revision   │────▶│   Pseudo    │
//! │ (fan-out)   │     │ (per dep)   │     │  (decode)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │  Vcs tag    │
//!                     │ resolution  │
//!                     └─────────────┘
//! ```
//!
//! - [`pseudo`]: pseudo-version recognition and decoding
//! - [`revision`]: single-dependency resolution
//! - [`batch`]: bounded-concurrency resolution of a dependency list
//! - [`error`]: error types for this layer

pub mod batch;
pub mod error;
pub mod pseudo;
pub mod revision;

pub use batch::{BatchOutcome, ResolutionFailure, resolve_all, resolve_dependencies};
pub use error::{PseudoVersionError, ResolveError};
pub use revision::{RevisionRecord, RevisionResolver};
