//! Git backend
//!
//! Tags are resolved with `git ls-remote`, so no local clone is needed.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::exec::{CommandRunner, args};
use crate::vcs::backend::Vcs;
use crate::vcs::error::VcsError;
use crate::vcs::types::VcsKind;

/// Suffix ls-remote appends to the peeled (commit) entry of an annotated tag
const PEELED_SUFFIX: &str = "^{}";

pub struct GitVcs {
    runner: Arc<dyn CommandRunner>,
}

impl GitVcs {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait::async_trait]
impl Vcs for GitVcs {
    fn kind(&self) -> VcsKind {
        VcsKind::Git
    }

    async fn resolve_tag(&self, repo_url: &str, tag: &str) -> Result<String, VcsError> {
        assert!(!tag.is_empty(), "empty tag in {repo_url}");

        // ls-remote matches the pattern against trailing ref components, so a
        // submodule tag like refs/tags/sub/v1.2.3 comes back for "v1.2.3" too.
        let output = self
            .runner
            .run("git", &args(["ls-remote", "-q", "--", repo_url, tag]))
            .await?;

        select_tag(repo_url, tag, &output)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RemoteRef<'a> {
    name: &'a str,
    hash: &'a str,
}

fn select_tag(repo_url: &str, tag: &str, output: &str) -> Result<String, VcsError> {
    let refs = parse_ls_remote(repo_url, output)?;
    let exact = format!("refs/tags/{tag}");

    if let Some(found) = refs.iter().find(|r| r.name == exact) {
        return Ok(found.hash.to_string());
    }

    // No exact match; a single candidate is most likely a submodule tag.
    // TODO: pick among several submodule tags once the module's subdirectory is known.
    match refs.as_slice() {
        [] => Err(VcsError::UnresolvedTag {
            repo: repo_url.to_string(),
            tag: tag.to_string(),
        }),
        [only] => {
            debug!("Using non-exact ref {} for tag {}", only.name, tag);
            Ok(only.hash.to_string())
        }
        many => Err(VcsError::AmbiguousTag {
            repo: repo_url.to_string(),
            tag: tag.to_string(),
            refs: many.iter().map(|r| r.name.to_string()).collect(),
        }),
    }
}

/// Parses `<hash>\t<ref>` lines, folding peeled entries into their tag.
fn parse_ls_remote<'a>(repo_url: &str, output: &'a str) -> Result<Vec<RemoteRef<'a>>, VcsError> {
    let unexpected = || VcsError::UnexpectedOutput {
        repo: repo_url.to_string(),
        output: output.to_string(),
    };

    let mut refs = Vec::new();
    let mut peeled: HashMap<&str, &str> = HashMap::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let &[hash, name] = fields.as_slice() else {
            return Err(unexpected());
        };
        if !is_full_hash(hash) {
            return Err(unexpected());
        }

        match name.strip_suffix(PEELED_SUFFIX) {
            Some(base) => {
                peeled.insert(base, hash);
            }
            None => refs.push(RemoteRef { name, hash }),
        }
    }

    for r in &mut refs {
        if let Some(commit) = peeled.get(r.name) {
            r.hash = *commit;
        }
    }

    Ok(refs)
}

/// SHA-1 or SHA-256 object name
fn is_full_hash(hash: &str) -> bool {
    matches!(hash.len(), 40 | 64) && hash.chars().all(|c| c.is_ascii_hexdigit())
}
