//! Bounded-concurrency resolution of a whole dependency list

use std::pin::pin;

use futures::StreamExt;
use futures::stream;
use tracing::{error, info};

use crate::config::MAX_CONCURRENT_RESOLUTIONS;
use crate::parser::types::Dependency;
use crate::version::error::ResolveError;
use crate::version::revision::{RevisionRecord, RevisionResolver};

/// A dependency whose revision could not be resolved
#[derive(Debug)]
pub struct ResolutionFailure {
    pub dependency: Dependency,
    pub error: ResolveError,
}

/// Everything a batch produced, successes sorted by path
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<RevisionRecord>,
    pub failures: Vec<ResolutionFailure>,
}

impl BatchOutcome {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// True when every pinned dependency resolved
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolve every pinned dependency with [`MAX_CONCURRENT_RESOLUTIONS`] in flight
pub async fn resolve_dependencies(
    resolver: &RevisionResolver,
    dependencies: &[Dependency],
) -> BatchOutcome {
    resolve_all(resolver, dependencies, MAX_CONCURRENT_RESOLUTIONS).await
}

/// Resolve every pinned dependency, at most `max_in_flight` at a time
///
/// Unpinned dependencies are skipped. Failures are logged and collected; they
/// never stop the other resolutions. Returns once every resolution finished.
pub async fn resolve_all(
    resolver: &RevisionResolver,
    dependencies: &[Dependency],
    max_in_flight: usize,
) -> BatchOutcome {
    let pinned = dependencies.iter().filter(|dep| dep.is_pinned());
    let mut completed = pin!(
        stream::iter(pinned)
            .map(|dep| async move { (dep, resolver.resolve(dep).await) })
            .buffer_unordered(max_in_flight.max(1))
    );

    let mut outcome = BatchOutcome::default();
    while let Some((dep, result)) = completed.next().await {
        match result {
            Ok(record) => outcome.records.push(record),
            Err(e) => {
                error!(path = %dep.path, version = %dep.version, "cannot resolve: {}", e);
                outcome.failures.push(ResolutionFailure {
                    dependency: dep.clone(),
                    error: e,
                });
            }
        }
    }

    outcome.records.sort_by(|a, b| a.path.cmp(&b.path));
    info!(
        "Resolved {} dependencies, {} failed",
        outcome.records.len(),
        outcome.failure_count()
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::repo::discovery::{MockRepoRootDiscovery, RepoRoot};
    use crate::repo::error::DiscoveryError;
    use crate::repo::info::RepoInfoResolver;
    use crate::vcs::backend::MockVcs;
    use crate::vcs::registry::VcsRegistry;
    use crate::vcs::types::VcsKind;

    fn resolver(discovery: MockRepoRootDiscovery, vcs: MockVcs) -> RevisionResolver {
        RevisionResolver::new(Arc::new(RepoInfoResolver::new(
            Arc::new(discovery),
            Arc::new(VcsRegistry::new(vec![Arc::new(vcs)])),
        )))
    }

    fn github_discovery() -> MockRepoRootDiscovery {
        let mut discovery = MockRepoRootDiscovery::new();
        discovery.expect_repo_root().returning(|path| {
            if path.starts_with("bad/") {
                return Err(DiscoveryError::RepoRootNotFound {
                    path: path.to_string(),
                    reason: "no go-import meta tags".to_string(),
                });
            }
            Ok(RepoRoot {
                repo: format!("https://{path}"),
                vcs: "git".to_string(),
                root: path.to_string(),
            })
        });
        discovery
    }

    fn tagging_vcs() -> MockVcs {
        let mut vcs = MockVcs::new();
        vcs.expect_kind().return_const(VcsKind::Git);
        vcs.expect_resolve_tag()
            .returning(|repo, _| Ok(format!("{:0>40}", repo.len())));
        vcs
    }

    #[tokio::test]
    async fn resolve_all_skips_unpinned_dependencies() {
        let mut vcs = MockVcs::new();
        vcs.expect_kind().return_const(VcsKind::Git);
        vcs.expect_resolve_tag()
            .withf(|repo, _| repo == "https://example.com/pinned")
            .times(1)
            .returning(|_, _| Ok("a".repeat(40)));
        let resolver = resolver(github_discovery(), vcs);

        let deps = vec![
            Dependency::new("example.com/unpinned", ""),
            Dependency::new("example.com/pinned", "v1.0.0"),
        ];
        let outcome = resolve_all(&resolver, &deps, 4).await;

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].path, "example.com/pinned");
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn resolve_all_sorts_records_by_path() {
        let resolver = resolver(github_discovery(), tagging_vcs());

        let deps = vec![
            Dependency::new("example.com/c", "v1.0.0"),
            Dependency::new("example.com/a", "v1.0.0"),
            Dependency::new("example.com/b", "v0.0.0-20210101000000-abcdef123456"),
        ];
        let outcome = resolve_all(&resolver, &deps, 2).await;

        let paths: Vec<&str> = outcome.records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["example.com/a", "example.com/b", "example.com/c"]);
    }

    #[tokio::test]
    async fn resolve_all_collects_failures_without_stopping_siblings() {
        let resolver = resolver(github_discovery(), tagging_vcs());

        let deps = vec![
            Dependency::new("bad/one", "v1.0.0"),
            Dependency::new("example.com/good", "v1.0.0"),
            Dependency::new("bad/two", "v1.0.0"),
        ];
        let outcome = resolve_all(&resolver, &deps, 1).await;

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.failure_count(), 2);
        assert!(!outcome.is_success());
        assert!(
            outcome
                .failures
                .iter()
                .all(|f| matches!(f.error, ResolveError::VcsInfo { .. }))
        );
    }

    #[tokio::test]
    async fn resolve_all_returns_empty_outcome_for_empty_list() {
        let resolver = resolver(MockRepoRootDiscovery::new(), tagging_vcs());
        let outcome = resolve_all(&resolver, &[], 20).await;
        assert!(outcome.records.is_empty());
        assert!(outcome.is_success());
    }
}
