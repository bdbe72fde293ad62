//! Parser layer
//! - traits.rs: Parser trait definition
//! - types.rs: Common types (Dependency, BaselineMap)
//! - go_list.rs: `go list -m -json all` output parser
//! - go_mod.rs: go.mod parser
//! - glide_lock.rs: glide.lock parser (baseline)

pub mod glide_lock;
pub mod go_list;
pub mod go_mod;
pub mod traits;
pub mod types;

pub use glide_lock::GlideLockParser;
pub use go_list::GoListParser;
pub use go_mod::GoModParser;
pub use traits::{ParseError, Parser};
pub use types::{BaselineMap, Dependency};
