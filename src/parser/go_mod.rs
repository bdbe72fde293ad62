//! go.mod parser
//!
//! Reads the `require` directives of a go.mod file. Only direct requirements
//! are listed there; `go list -m -json all` (see [`go_list`](super::go_list))
//! gives the full module graph.
//!
//! Format examples:
//! - Single: `require golang.org/x/text v0.14.0`
//! - Block:
//!   ```text
//!   require (
//!       golang.org/x/text v0.14.0
//!       golang.org/x/net v0.20.0 // indirect
//!   )
//!   ```

use regex::Regex;

use crate::parser::traits::{ParseError, Parser};
use crate::parser::types::Dependency;

/// Parser for go.mod files
pub struct GoModParser {
    /// Regex for single-line require: `require module/path v1.2.3`
    single_require_re: Regex,
    /// Regex for require block start: `require (`
    block_start_re: Regex,
    /// Regex for require spec inside block: `module/path v1.2.3`
    require_spec_re: Regex,
}

impl GoModParser {
    pub fn new() -> Self {
        Self {
            single_require_re: Regex::new(r"^require\s+(\S+)\s+(v[^\s]+)(?:\s*//.*)?$").unwrap(),
            block_start_re: Regex::new(r"^require\s*\(\s*$").unwrap(),
            require_spec_re: Regex::new(r"^\s*(\S+)\s+(v[^\s]+)(?:\s*//.*)?$").unwrap(),
        }
    }

    fn dependency_from(caps: &regex::Captures<'_>) -> Option<Dependency> {
        let path = caps.get(1)?.as_str();
        let version = caps.get(2)?.as_str();
        Some(Dependency::new(path, version))
    }
}

impl Default for GoModParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for GoModParser {
    fn parse(&self, content: &str) -> Result<Vec<Dependency>, ParseError> {
        let mut results = Vec::new();
        let mut in_require_block = false;

        for (line_num, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }

            if in_require_block {
                if trimmed == ")" {
                    in_require_block = false;
                    continue;
                }
                let caps = self.require_spec_re.captures(trimmed).ok_or_else(|| {
                    ParseError::InvalidSyntax(format!(
                        "line {}: malformed requirement {:?}",
                        line_num + 1,
                        trimmed
                    ))
                })?;
                results.extend(Self::dependency_from(&caps));
                continue;
            }

            if self.block_start_re.is_match(trimmed) {
                in_require_block = true;
            } else if let Some(caps) = self.single_require_re.captures(trimmed) {
                results.extend(Self::dependency_from(&caps));
            }
        }

        if in_require_block {
            return Err(ParseError::ParseFailed(
                "unterminated require block".to_string(),
            ));
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extracts_single_require() {
        let parser = GoModParser::new();
        let content = r#"module example.com/myapp

go 1.21

require golang.org/x/text v0.14.0
"#;
        let result = parser.parse(content).unwrap();
        assert_eq!(result, vec![Dependency::new("golang.org/x/text", "v0.14.0")]);
    }

    #[test]
    fn parse_extracts_require_block_with_indirect_comments() {
        let parser = GoModParser::new();
        let content = r#"module example.com/myapp

require (
	golang.org/x/text v0.14.0 // indirect
	github.com/pkg/errors v0.9.1
)
"#;
        let result = parser.parse(content).unwrap();
        assert_eq!(
            result,
            vec![
                Dependency::new("golang.org/x/text", "v0.14.0"),
                Dependency::new("github.com/pkg/errors", "v0.9.1"),
            ]
        );
    }

    #[test]
    fn parse_keeps_incompatible_and_pseudo_versions_verbatim() {
        let parser = GoModParser::new();
        let content = r#"module example.com/myapp

require (
	github.com/some/repo v2.0.0+incompatible
	github.com/other/repo v0.0.0-20210101000000-abcdef123456
)
"#;
        let result = parser.parse(content).unwrap();
        assert_eq!(result[0].version, "v2.0.0+incompatible");
        assert_eq!(result[1].version, "v0.0.0-20210101000000-abcdef123456");
    }

    #[test]
    fn parse_skips_replace_exclude_and_retract_directives() {
        let parser = GoModParser::new();
        let content = r#"module example.com/myapp

go 1.21

require golang.org/x/text v0.14.0

replace golang.org/x/text v0.14.0 => ./local/text

replace (
	golang.org/x/net => ../fork/net
)

exclude golang.org/x/crypto v1.0.0

retract v0.0.1
"#;
        let result = parser.parse(content).unwrap();
        assert_eq!(result, vec![Dependency::new("golang.org/x/text", "v0.14.0")]);
    }

    #[test]
    fn parse_returns_empty_for_no_requires() {
        let parser = GoModParser::new();
        let result = parser.parse("module example.com/myapp\n\ngo 1.21\n").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn parse_rejects_unterminated_block() {
        let parser = GoModParser::new();
        let content = "module example.com/myapp\n\nrequire (\n\tgolang.org/x/text v0.14.0\n";
        let err = parser.parse(content).unwrap_err();
        assert!(matches!(err, ParseError::ParseFailed(_)));
    }

    #[test]
    fn parse_rejects_malformed_block_entry() {
        let parser = GoModParser::new();
        let content = "require (\n\tgolang.org/x/text\n)\n";
        let err = parser.parse(content).unwrap_err();
        assert!(matches!(err, ParseError::InvalidSyntax(_)));
    }
}
