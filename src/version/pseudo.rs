//! Go pseudo-version codec
//!
//! Pseudo-versions name untagged commits and embed both the commit time and a
//! revision prefix:
//! - `v0.0.0-20210101000000-abcdef123456` (no base version)
//! - `v1.2.4-0.20210101000000-abcdef123456` (after release v1.2.3)
//! - `v1.2.3-pre.0.20210101000000-abcdef123456` (after pre-release v1.2.3-pre)
//!
//! The revision can therefore be recovered without asking the repository.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use semver::Version;

use crate::version::error::PseudoVersionError;

const INCOMPATIBLE_SUFFIX: &str = "+incompatible";

/// Layout of the timestamp segment, always UTC
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

static PSEUDO_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^v[0-9]+\.(0\.0-|\d+\.\d+-([^+]*\.)?0\.)\d{14}-[A-Za-z0-9]+(\+[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?$",
    )
    .expect("pseudo-version pattern is valid")
});

/// Segments of a pseudo-version
struct PseudoParts<'a> {
    timestamp: &'a str,
    revision: &'a str,
}

/// Reports whether `version` is a pseudo-version.
pub fn is_pseudo_version(version: &str) -> bool {
    version.matches('-').count() >= 2
        && version
            .strip_prefix('v')
            .is_some_and(|v| Version::parse(v).is_ok())
        && PSEUDO_VERSION_RE.is_match(version)
}

/// Returns the revision prefix embedded in a pseudo-version.
pub fn pseudo_version_rev(version: &str) -> Result<String, PseudoVersionError> {
    let parts = split_pseudo_version(version)?;
    Ok(parts.revision.to_string())
}

/// Returns the commit time embedded in a pseudo-version.
pub fn pseudo_version_time(version: &str) -> Result<DateTime<Utc>, PseudoVersionError> {
    let parts = split_pseudo_version(version)?;
    parse_timestamp(version, parts.timestamp)
}

/// Removes the `+incompatible` marker Go adds to v2+ modules without a go.mod.
pub fn strip_incompatible(version: &str) -> &str {
    version.strip_suffix(INCOMPATIBLE_SUFFIX).unwrap_or(version)
}

fn split_pseudo_version(version: &str) -> Result<PseudoParts<'_>, PseudoVersionError> {
    if !is_pseudo_version(version) {
        return Err(invalid(version, "syntax error"));
    }

    // Build metadata (including +incompatible) trails the revision
    let without_build = version.split_once('+').map_or(version, |(v, _)| v);

    let (rest, revision) = without_build
        .rsplit_once('-')
        .ok_or_else(|| invalid(version, "missing revision"))?;
    let dash = rest.rfind('-').unwrap_or(0);
    let timestamp = match rest.rfind('.') {
        Some(dot) if dot > dash => &rest[dot + 1..],
        _ => &rest[dash + 1..],
    };

    if revision.is_empty() || !revision.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid(version, "revision must be alphanumeric"));
    }
    parse_timestamp(version, timestamp)?;

    Ok(PseudoParts {
        timestamp,
        revision,
    })
}

fn parse_timestamp(version: &str, timestamp: &str) -> Result<DateTime<Utc>, PseudoVersionError> {
    if timestamp.len() != 14 || !timestamp.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(version, "timestamp must be 14 digits"));
    }
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .map(|t| t.and_utc())
        .map_err(|e| invalid(version, &format!("bad timestamp {timestamp:?}: {e}")))
}

fn invalid(version: &str, reason: &str) -> PseudoVersionError {
    PseudoVersionError::InvalidPseudoVersion {
        version: version.to_string(),
        reason: reason.to_string(),
    }
}
