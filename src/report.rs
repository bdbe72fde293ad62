//! Reconciliation of resolved revisions against the glide.lock baseline

use std::fmt;
use std::io;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::commit::{CommitDates, CommitInfo};
use crate::config::DISPLAY_HASH_LEN;
use crate::parser::types::BaselineMap;
use crate::vcs::types::VcsKind;
use crate::version::revision::RevisionRecord;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S +0000 UTC";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("cannot compare {path}: {kind} is not supported")]
    NonGitRecord { path: String, kind: VcsKind },
}

/// Outcome of comparing one dependency with its baseline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Unchanged,
    Changed(ChangeEntry),
}

/// One side of a change: the revision and, when known, its commit time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Side {
    pub version: String,
    pub time: Option<DateTime<Utc>>,
}

impl Side {
    fn new(version: &str, info: Option<&CommitInfo>) -> Self {
        Self {
            version: version.to_string(),
            time: info.map(|i| i.time),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)?;
        if let Some(time) = self.time {
            write!(f, " {}", time.format(DATE_FORMAT))?;
        }
        Ok(())
    }
}

/// A dependency whose revision differs from the baseline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub path: String,
    pub old: Side,
    pub new: Side,
    /// The new commit is older than the recorded one
    pub reversion: bool,
}

impl fmt::Display for ChangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.reversion { " reversion" } else { "" };
        write!(f, "{}{}\n\t{}\n\t{}", self.path, marker, self.old, self.new)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub entries: Vec<ChangeEntry>,
    pub unchanged: usize,
}

impl Report {
    pub fn changed(&self) -> usize {
        self.entries.len()
    }

    /// Dependencies that had a baseline entry to compare against
    pub fn compared(&self) -> usize {
        self.changed() + self.unchanged
    }

    pub fn summary(&self) -> String {
        format!("{}/{} changed", self.changed(), self.compared())
    }

    /// Print every change followed by the summary line
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(writer, "{entry}")?;
        }
        writeln!(writer, "{}", self.summary())
    }
}

/// Compare resolved revisions with the baseline
///
/// Records without a baseline entry are skipped. Commit lookups run one at a
/// time, old side first.
pub async fn reconcile(
    records: &[RevisionRecord],
    baseline: &BaselineMap,
    dates: &dyn CommitDates,
) -> Result<Report, ReportError> {
    let mut report = Report::default();

    for record in records {
        if record.vcs_kind != VcsKind::Git {
            return Err(ReportError::NonGitRecord {
                path: record.path.clone(),
                kind: record.vcs_kind,
            });
        }
        let Some(old) = baseline.get(&record.path) else {
            debug!("{} has no baseline entry", record.path);
            continue;
        };

        match classify(record, old, dates).await {
            Classification::Unchanged => report.unchanged += 1,
            Classification::Changed(entry) => report.entries.push(entry),
        }
    }

    Ok(report)
}

async fn classify(record: &RevisionRecord, old: &str, dates: &dyn CommitDates) -> Classification {
    let new = truncate(&record.revision, DISPLAY_HASH_LEN);
    let old = truncate(old, char_len(new));
    // Baselines may hold abbreviated hashes
    let common = char_len(old).min(char_len(new));
    if truncate(old, common) == truncate(new, common) {
        return Classification::Unchanged;
    }

    let old_info = dates.commit_info(&record.path, &record.repo_url, old).await;
    let new_info = dates.commit_info(&record.path, &record.repo_url, new).await;

    let (old_info, new_info) = match (old_info, new_info) {
        (Ok(o), Ok(n)) => (o, n),
        (old_result, new_result) => {
            for e in [old_result.err(), new_result.err()].into_iter().flatten() {
                warn!("cannot read commit info for {}: {}", record.path, e);
            }
            return Classification::Changed(ChangeEntry {
                path: record.path.clone(),
                old: Side::new(old, None),
                new: Side::new(new, None),
                reversion: false,
            });
        }
    };

    // Different prefixes can still name the same commit
    if old_info.hash == new_info.hash {
        return Classification::Unchanged;
    }

    Classification::Changed(ChangeEntry {
        path: record.path.clone(),
        old: Side::new(old, Some(&old_info)),
        new: Side::new(new, Some(&new_info)),
        reversion: new_info.time < old_info.time,
    })
}

/// First `len` characters of `s`
fn truncate(s: &str, len: usize) -> &str {
    s.char_indices().nth(len).map_or(s, |(i, _)| &s[..i])
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
