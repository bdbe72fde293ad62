//! Wiring of one reconciliation run
//!
//! Reads the baseline and the dependency list, resolves every pinned
//! dependency, and prints the report.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::commit::{CommitDates, GitCommitDates};
use crate::config::Config;
use crate::exec::{CommandRunner, ProcessRunner, args};
use crate::parser::go_list::GO_LIST_ARGS;
use crate::parser::{BaselineMap, Dependency, GlideLockParser, GoListParser, GoModParser, Parser};
use crate::repo::{GoImportDiscovery, RepoInfoResolver, RepoRootDiscovery};
use crate::report::reconcile;
use crate::vcs::{VcsRegistry, create_default_registry};
use crate::version::{RevisionResolver, resolve_all};

/// Exit status when every pinned dependency resolved
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status when at least one dependency failed to resolve
pub const EXIT_RESOLUTION_FAILED: i32 = 1;

/// Where the dependency list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencySource {
    /// Ask the go tool for the full module graph
    GoList,
    /// Read the `require` directives of a go.mod file
    GoMod(PathBuf),
}

pub struct App {
    config: Config,
    runner: Arc<dyn CommandRunner>,
    resolver: RevisionResolver,
    dates: Arc<dyn CommitDates>,
}

impl App {
    /// Build an app backed by real processes and HTTP discovery
    pub fn new(config: Config, print_commands: bool) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(ProcessRunner::new(print_commands));
        let discovery = Arc::new(GoImportDiscovery::default().verbose(print_commands));
        let registry = Arc::new(create_default_registry(Arc::clone(&runner)));
        let dates = Arc::new(GitCommitDates::new(Arc::clone(&runner), config.clone_root()));

        Self::with_parts(config, runner, discovery, registry, dates)
    }

    /// Build an app from explicit collaborators
    pub fn with_parts(
        config: Config,
        runner: Arc<dyn CommandRunner>,
        discovery: Arc<dyn RepoRootDiscovery>,
        registry: Arc<VcsRegistry>,
        dates: Arc<dyn CommitDates>,
    ) -> Self {
        let repo_info = Arc::new(RepoInfoResolver::new(discovery, registry));
        Self {
            config,
            runner,
            resolver: RevisionResolver::new(repo_info),
            dates,
        }
    }

    /// Run one reconciliation, printing the report to `out`
    ///
    /// Returns the process exit status. Unreadable inputs and non-git
    /// records are errors.
    pub async fn run<W: Write>(&self, source: &DependencySource, out: W) -> anyhow::Result<i32> {
        let baseline = self.read_baseline().await?;
        let dependencies = self.read_dependencies(source).await?;
        info!(
            "Loaded {} dependencies and {} baseline entries",
            dependencies.len(),
            baseline.len()
        );

        let outcome = resolve_all(
            &self.resolver,
            &dependencies,
            self.config.effective_concurrency(),
        )
        .await;

        let report = reconcile(&outcome.records, &baseline, self.dates.as_ref()).await?;
        report.write_to(out).context("cannot write report")?;

        Ok(if outcome.is_success() {
            EXIT_SUCCESS
        } else {
            EXIT_RESOLUTION_FAILED
        })
    }

    async fn read_baseline(&self) -> anyhow::Result<BaselineMap> {
        let path = &self.config.lock_file;
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("cannot read {}", path.display()))?;
        GlideLockParser
            .parse_baseline(&content)
            .with_context(|| format!("cannot parse {}", path.display()))
    }

    async fn read_dependencies(&self, source: &DependencySource) -> anyhow::Result<Vec<Dependency>> {
        match source {
            DependencySource::GoList => {
                let output = self
                    .runner
                    .run("go", &args(GO_LIST_ARGS))
                    .await
                    .context("cannot list modules")?;
                GoListParser
                    .parse(&output)
                    .context("cannot parse go list output")
            }
            DependencySource::GoMod(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("cannot read {}", path.display()))?;
                GoModParser::new()
                    .parse(&content)
                    .with_context(|| format!("cannot parse {}", path.display()))
            }
        }
    }
}
