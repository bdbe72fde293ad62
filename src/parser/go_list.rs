//! `go list -m -json all` output parser
//!
//! The go tool prints one JSON object per module, concatenated without a
//! surrounding array:
//!
//! ```text
//! {
//!     "Path": "example.com/myapp",
//!     "Main": true
//! }
//! {
//!     "Path": "github.com/pkg/errors",
//!     "Version": "v0.9.1"
//! }
//! ```

use serde::Deserialize;

use crate::parser::traits::{ParseError, Parser};
use crate::parser::types::Dependency;

/// Arguments that make `go` print the module graph in the format parsed here
pub const GO_LIST_ARGS: [&str; 4] = ["list", "-m", "-json", "all"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListModule {
    path: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    main: bool,
}

/// Parser for the JSON stream printed by `go list -m -json`
pub struct GoListParser;

impl Parser for GoListParser {
    fn parse(&self, content: &str) -> Result<Vec<Dependency>, ParseError> {
        serde_json::Deserializer::from_str(content)
            .into_iter::<ListModule>()
            .filter_map(|module| match module {
                // The main module is the one being built, not a dependency
                Ok(module) if module.main => None,
                Ok(module) => Some(Ok(Dependency::new(module.path, module.version))),
                Err(e) => Some(Err(ParseError::ParseFailed(e.to_string()))),
            })
            .collect()
    }
}
