//! Hand-written collaborators standing in for the network and git

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use modglide::commit::{CommitDates, CommitError, CommitInfo};
use modglide::exec::{CommandError, CommandRunner};
use modglide::repo::error::DiscoveryError;
use modglide::repo::{RepoRoot, RepoRootDiscovery};
use modglide::vcs::{Vcs, VcsError, VcsKind, VcsRegistry};

/// Maps every import path to `https://<path>` over git, except those under `missing/`
pub struct FakeDiscovery;

#[async_trait]
impl RepoRootDiscovery for FakeDiscovery {
    async fn repo_root(&self, import_path: &str) -> Result<RepoRoot, DiscoveryError> {
        if import_path.starts_with("missing/") {
            return Err(DiscoveryError::RepoRootNotFound {
                path: import_path.to_string(),
                reason: "unrecognized import path".to_string(),
            });
        }
        Ok(RepoRoot {
            repo: format!("https://{import_path}"),
            vcs: "git".to_string(),
            root: import_path.to_string(),
        })
    }
}

/// Git backend answering from a tag table and recording peak concurrency
#[derive(Default)]
pub struct FakeVcs {
    tags: HashMap<String, String>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl FakeVcs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: &str, hash: &str) -> Self {
        self.tags.insert(tag.to_string(), hash.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Vcs for FakeVcs {
    fn kind(&self) -> VcsKind {
        VcsKind::Git
    }

    async fn resolve_tag(&self, repo_url: &str, tag: &str) -> Result<String, VcsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.tags
            .get(tag)
            .cloned()
            .ok_or_else(|| VcsError::UnresolvedTag {
                repo: repo_url.to_string(),
                tag: tag.to_string(),
            })
    }
}

pub fn registry_with(vcs: Arc<FakeVcs>) -> Arc<VcsRegistry> {
    Arc::new(VcsRegistry::new(vec![vcs as Arc<dyn Vcs>]))
}

/// Commit metadata keyed by the reference being looked up
#[derive(Default)]
pub struct FakeCommitDates {
    commits: HashMap<String, CommitInfo>,
}

impl FakeCommitDates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commit(mut self, reference: &str, hash: &str, time: DateTime<Utc>) -> Self {
        self.commits.insert(
            reference.to_string(),
            CommitInfo {
                hash: hash.to_string(),
                time,
            },
        );
        self
    }
}

#[async_trait]
impl CommitDates for FakeCommitDates {
    async fn commit_info(
        &self,
        _path: &str,
        _repo_url: &str,
        reference: &str,
    ) -> Result<CommitInfo, CommitError> {
        self.commits
            .get(reference)
            .cloned()
            .ok_or_else(|| CommitError::UnexpectedLog(format!("unknown revision {reference}")))
    }
}

/// Runner that only knows `go list -m -json all`
pub struct GoListRunner {
    output: String,
}

impl GoListRunner {
    pub fn new(output: &str) -> Self {
        Self {
            output: output.to_string(),
        }
    }
}

#[async_trait]
impl CommandRunner for GoListRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<String, CommandError> {
        if program == "go" && args.first().is_some_and(|a| a == "list") {
            return Ok(self.output.clone());
        }
        Err(CommandError::Launch {
            command: program.to_string(),
            reason: "unexpected command in test".to_string(),
        })
    }
}
