//! glide.lock parser
//!
//! Only the `imports:` sequence is read; each entry's `name` and `version`
//! become one baseline record.
//!
//! ```yaml
//! hash: 1f3a...
//! imports:
//! - name: github.com/pkg/errors
//!   version: 645ef00459ed84a119197bfb8d8205042c6df63d
//!   subpackages:
//!   - errors
//! testImports: []
//! ```

use tracing::warn;

use crate::parser::traits::{ParseError, Parser};
use crate::parser::types::{BaselineMap, Dependency};

/// Parser for glide.lock files
pub struct GlideLockParser;

impl Parser for GlideLockParser {
    fn parse(&self, content: &str) -> Result<Vec<Dependency>, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_yaml::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set YAML language for tree-sitter: {}", e);
            ParseError::TreeSitter(e.to_string())
        })?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            warn!("Failed to parse YAML content");
            ParseError::ParseFailed("Failed to parse YAML".to_string())
        })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(ParseError::InvalidSyntax(
                "glide.lock is not valid YAML".to_string(),
            ));
        }

        let mut results = Vec::new();
        self.find_imports(root, content, &mut results);

        Ok(results)
    }
}

impl GlideLockParser {
    /// Parse a lock file into a path to recorded version map
    pub fn parse_baseline(&self, content: &str) -> Result<BaselineMap, ParseError> {
        Ok(self
            .parse(content)?
            .into_iter()
            .map(|dep| (dep.path, dep.version))
            .collect())
    }

    /// Find the `imports` key and collect its entries
    fn find_imports(&self, node: tree_sitter::Node, content: &str, results: &mut Vec<Dependency>) {
        if node.kind() == "block_mapping_pair"
            && let Some(key_node) = node.child_by_field_name("key")
            && self.get_node_text(key_node, content) == "imports"
        {
            if let Some(value_node) = node.child_by_field_name("value") {
                self.collect_entries(value_node, content, results);
            }
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.find_imports(child, content, results);
        }
    }

    /// Collect every mapping under the sequence that carries a `name`
    fn collect_entries(&self, node: tree_sitter::Node, content: &str, results: &mut Vec<Dependency>) {
        if node.kind() == "block_mapping" {
            if let Some(dep) = self.parse_import_entry(node, content) {
                results.push(dep);
            }
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.collect_entries(child, content, results);
        }
    }

    /// Parse a single `name:`/`version:` mapping
    fn parse_import_entry(&self, node: tree_sitter::Node, content: &str) -> Option<Dependency> {
        let mut name = None;
        let mut version = String::new();

        let mut cursor = node.walk();
        for pair in node.children(&mut cursor) {
            if pair.kind() != "block_mapping_pair" {
                continue;
            }
            let (Some(key_node), Some(value_node)) = (
                pair.child_by_field_name("key"),
                pair.child_by_field_name("value"),
            ) else {
                continue;
            };
            match self.get_node_text(key_node, content).as_str() {
                "name" => name = Some(self.get_node_text(value_node, content)),
                "version" => version = self.get_node_text(value_node, content),
                _ => {}
            }
        }

        name.filter(|n| !n.is_empty())
            .map(|name| Dependency::new(name, version))
    }

    /// Get text content of a node, removing quotes if present
    fn get_node_text(&self, node: tree_sitter::Node, content: &str) -> String {
        let text = &content[node.byte_range()];
        text.trim()
            .trim_start_matches('"')
            .trim_end_matches('"')
            .trim_start_matches('\'')
            .trim_end_matches('\'')
            .to_string()
    }
}
