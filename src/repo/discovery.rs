//! Repository root discovery for Go import paths
//!
//! Well-known hosts are recognized offline; any other path is resolved the way
//! the go tool does it, by fetching `https://<path>?go-get=1` and reading the
//! `go-import` meta tag.

use std::collections::HashMap;
use std::sync::LazyLock;

#[cfg(test)]
use mockall::automock;
use regex::Regex;
use tracing::{debug, warn};

use crate::repo::error::DiscoveryError;

/// Default scheme for vanity import lookups
const DEFAULT_SCHEME: &str = "https";

/// Schemes a repository root taken from a meta tag may use
const REPO_SCHEMES: &[&str] = &[
    "https", "http", "git", "ssh", "git+ssh", "bzr", "bzr+ssh", "svn", "svn+ssh",
];

/// Where an import path's code lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRoot {
    /// Repository URL (e.g., "https://github.com/pkg/errors")
    pub repo: String,
    /// VCS command identifier (e.g., "git")
    pub vcs: String,
    /// Import path prefix that corresponds to the repository root
    pub root: String,
}

/// Capability that maps an import path to its repository root
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RepoRootDiscovery: Send + Sync {
    async fn repo_root(&self, import_path: &str) -> Result<RepoRoot, DiscoveryError>;
}

struct HostPattern {
    prefix: &'static str,
    regex: Regex,
    /// Fixed VCS, or `None` when the pattern captures it
    vcs: Option<&'static str>,
}

static HOST_PATTERNS: LazyLock<Vec<HostPattern>> = LazyLock::new(|| {
    let pattern = |prefix, re: &str, vcs| HostPattern {
        prefix,
        regex: Regex::new(re).expect("host pattern is valid"),
        vcs,
    };
    vec![
        pattern(
            "github.com/",
            r"^(?P<root>github\.com/[A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+)(/[A-Za-z0-9_.\-]+)*$",
            Some("git"),
        ),
        pattern(
            "bitbucket.org/",
            r"^(?P<root>bitbucket\.org/[A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+)(/[A-Za-z0-9_.\-]+)*$",
            Some("git"),
        ),
        pattern(
            "launchpad.net/",
            r"^(?P<root>launchpad\.net/([A-Za-z0-9_.\-]+(/[A-Za-z0-9_.\-]+)?|~[A-Za-z0-9_.\-]+/(\+junk|[A-Za-z0-9_.\-]+)/[A-Za-z0-9_.\-]+))(/[A-Za-z0-9_.\-]+)*$",
            Some("bzr"),
        ),
        pattern(
            "git.apache.org/",
            r"^(?P<root>git\.apache\.org/[a-z0-9_.\-]+\.git)(/[A-Za-z0-9_.\-]+)*$",
            Some("git"),
        ),
        // Paths that spell out the VCS, e.g. example.com/repo.git/sub
        pattern(
            "",
            r"^(?P<root>([a-z0-9.\-]+\.)+[a-z0-9.\-]+(:[0-9]+)?/[A-Za-z0-9_.\-/~]*?\.(?P<vcs>bzr|git|hg|svn))(/[A-Za-z0-9_.\-]+)*$",
            None,
        ),
    ]
});

static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\s+([^>]*?)/?>").expect("meta pattern is valid"));

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)([A-Za-z-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("attribute pattern is valid")
});

/// [`RepoRootDiscovery`] following the go tool's import path rules
pub struct GoImportDiscovery {
    client: reqwest::Client,
    scheme: String,
    verbose: bool,
}

impl GoImportDiscovery {
    /// Creates a discovery that fetches vanity paths over `scheme`
    pub fn new(scheme: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("modglide")
                .build()
                .expect("Failed to create HTTP client"),
            scheme: scheme.to_string(),
            verbose: false,
        }
    }

    /// Echo every fetched URL to stderr
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    async fn fetch_go_import(&self, import_path: &str) -> Result<RepoRoot, DiscoveryError> {
        let url = format!("{}://{}?go-get=1", self.scheme, import_path);
        if self.verbose {
            eprintln!("Fetching {url}");
        }

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("go-get lookup returned status {}: {}", status, url);
            return Err(not_found(import_path, &format!("{url} returned {status}")));
        }

        let body = response.text().await?;
        select_go_import(import_path, &body)
    }
}

impl Default for GoImportDiscovery {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEME)
    }
}

#[async_trait::async_trait]
impl RepoRootDiscovery for GoImportDiscovery {
    async fn repo_root(&self, import_path: &str) -> Result<RepoRoot, DiscoveryError> {
        if let Some(root) = match_known_host(import_path) {
            debug!("{} matched static host table: {:?}", import_path, root);
            return Ok(root);
        }
        if import_path.contains("...") || import_path.contains("//") {
            return Err(not_found(import_path, "invalid import path"));
        }
        self.fetch_go_import(import_path).await
    }
}

/// Match an import path against hosts whose layout is known in advance.
fn match_known_host(import_path: &str) -> Option<RepoRoot> {
    HOST_PATTERNS
        .iter()
        .filter(|p| import_path.starts_with(p.prefix))
        .find_map(|p| {
            let caps = p.regex.captures(import_path)?;
            let root = caps.name("root")?.as_str();
            let vcs = p.vcs.or_else(|| caps.name("vcs").map(|m| m.as_str()))?;
            Some(RepoRoot {
                repo: format!("{DEFAULT_SCHEME}://{root}"),
                vcs: vcs.to_string(),
                root: root.to_string(),
            })
        })
}

/// Pick the `go-import` meta tag whose prefix covers `import_path`.
fn select_go_import(import_path: &str, html: &str) -> Result<RepoRoot, DiscoveryError> {
    let candidates: Vec<RepoRoot> = parse_go_imports(html)
        .into_iter()
        .filter(|r| r.vcs != "mod")
        .filter(|r| {
            import_path == r.root
                || import_path
                    .strip_prefix(r.root.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
        .collect();

    match candidates.as_slice() {
        [] => Err(not_found(import_path, "no go-import meta tags")),
        [only] => {
            validate_repo_root(&only.repo).map_err(|reason| not_found(import_path, &reason))?;
            Ok(only.clone())
        }
        _ => Err(not_found(
            import_path,
            &format!("multiple meta tags match: {candidates:?}"),
        )),
    }
}

fn parse_go_imports(html: &str) -> Vec<RepoRoot> {
    META_TAG_RE
        .captures_iter(html)
        .filter_map(|tag| {
            let attrs: HashMap<String, &str> = ATTR_RE
                .captures_iter(tag.get(1)?.as_str())
                .filter_map(|a| {
                    let name = a.get(1)?.as_str().to_ascii_lowercase();
                    let value = a.get(2).or_else(|| a.get(3))?.as_str();
                    Some((name, value))
                })
                .collect();
            if attrs.get("name").copied() != Some("go-import") {
                return None;
            }
            let fields: Vec<&str> = attrs.get("content")?.split_whitespace().collect();
            let &[root, vcs, repo] = fields.as_slice() else {
                return None;
            };
            Some(RepoRoot {
                repo: repo.to_string(),
                vcs: vcs.to_string(),
                root: root.to_string(),
            })
        })
        .collect()
}

/// Repository roots come from remote pages and end up on git command lines
fn validate_repo_root(repo: &str) -> Result<(), String> {
    let url = reqwest::Url::parse(repo).map_err(|e| format!("invalid repo root {repo:?}: {e}"))?;
    if !REPO_SCHEMES.contains(&url.scheme()) {
        return Err(format!(
            "invalid repo root {repo:?}: scheme {:?} not allowed",
            url.scheme()
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("invalid repo root {repo:?}: no host"));
    }
    Ok(())
}

fn not_found(import_path: &str, reason: &str) -> DiscoveryError {
    DiscoveryError::RepoRootNotFound {
        path: import_path.to_string(),
        reason: reason.to_string(),
    }
}
