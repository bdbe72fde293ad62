//! Commit lookups against local git clones
//!
//! Each dependency gets a clone at `<clone_root>/<import path>`, created on
//! first use and fetched again when a revision is missing.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::DateTime;
use tracing::{debug, info};

use crate::commit::{CommitDates, CommitError, CommitInfo};
use crate::exec::{CommandError, CommandRunner, args};

pub struct GitCommitDates {
    runner: Arc<dyn CommandRunner>,
    clone_root: PathBuf,
}

impl GitCommitDates {
    pub fn new(runner: Arc<dyn CommandRunner>, clone_root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            clone_root: clone_root.into(),
        }
    }

    /// Make sure a clone of `repo_url` exists at `dir`
    async fn ensure_clone(&self, dir: &Path, repo_url: &str) -> Result<(), CommitError> {
        match tokio::fs::metadata(dir).await {
            Ok(meta) if meta.is_dir() => return Ok(()),
            Ok(_) => return Err(CommitError::NotADirectory(dir.to_path_buf())),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        if let Some(parent) = dir.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        info!("Cloning {} into {}", repo_url, dir.display());
        let dir_arg = dir.to_string_lossy().into_owned();
        self.runner
            .run("git", &args(["clone", "--quiet", "--", repo_url, dir_arg.as_str()]))
            .await
            .map_err(|source| CommitError::FetchFailed {
                repo: repo_url.to_string(),
                source,
            })?;
        Ok(())
    }

    async fn fetch(&self, dir: &Path, repo_url: &str) -> Result<(), CommitError> {
        info!("Fetching {} in {}", repo_url, dir.display());
        let dir_arg = dir.to_string_lossy().into_owned();
        self.runner
            .run("git", &args(["-C", dir_arg.as_str(), "fetch", "origin"]))
            .await
            .map_err(|source| CommitError::FetchFailed {
                repo: repo_url.to_string(),
                source,
            })?;
        Ok(())
    }

    async fn log(&self, dir: &Path, reference: &str) -> Result<String, CommandError> {
        let dir_arg = dir.to_string_lossy().into_owned();
        self.runner
            .run(
                "git",
                &args([
                    "-C",
                    dir_arg.as_str(),
                    "log",
                    "-1",
                    "--pretty=format:%H %ct",
                    "--end-of-options",
                    reference,
                ]),
            )
            .await
    }
}

#[async_trait::async_trait]
impl CommitDates for GitCommitDates {
    async fn commit_info(
        &self,
        path: &str,
        repo_url: &str,
        reference: &str,
    ) -> Result<CommitInfo, CommitError> {
        let dir = self.clone_root.join(path);
        self.ensure_clone(&dir, repo_url).await?;

        let output = match self.log(&dir, reference).await {
            Ok(output) => output,
            Err(e) => {
                debug!("{} not in {}: {}", reference, dir.display(), e);
                self.fetch(&dir, repo_url).await?;
                self.log(&dir, reference)
                    .await
                    .map_err(|source| CommitError::CommitNotFound {
                        reference: reference.to_string(),
                        dir: dir.clone(),
                        source,
                    })?
            }
        };

        parse_log_line(&output)
    }
}

/// Parse `<hash> <unix seconds>` as printed by `--pretty=format:%H %ct`
fn parse_log_line(output: &str) -> Result<CommitInfo, CommitError> {
    let unexpected = || CommitError::UnexpectedLog(output.to_string());

    let (hash, seconds) = output.trim().split_once(' ').ok_or_else(unexpected)?;
    if hash.is_empty() || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(unexpected());
    }
    let seconds: i64 = seconds.trim().parse().map_err(|_| unexpected())?;
    let time = DateTime::from_timestamp(seconds, 0).ok_or_else(unexpected)?;

    Ok(CommitInfo {
        hash: hash.to_string(),
        time,
    })
}
