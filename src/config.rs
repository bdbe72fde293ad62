use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

// =============================================================================
// Resolution constants
// =============================================================================

/// Upper bound on dependency resolutions running at the same time
pub const MAX_CONCURRENT_RESOLUTIONS: usize = 20;

/// Number of hash characters shown for a resolved revision
pub const DISPLAY_HASH_LEN: usize = 12;

/// Lock file read when none is given
pub const DEFAULT_LOCK_FILE: &str = "glide.lock";

/// Tool configuration, read from a JSON file
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Resolutions in flight at once
    pub concurrency: usize,
    /// Path of the glide.lock baseline
    pub lock_file: PathBuf,
    /// Where repositories are cloned for commit lookups
    pub clone_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: MAX_CONCURRENT_RESOLUTIONS,
            lock_file: PathBuf::from(DEFAULT_LOCK_FILE),
            clone_dir: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Config {
    /// Load a config file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Concurrency ceiling actually used; never zero, never above the maximum
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.clamp(1, MAX_CONCURRENT_RESOLUTIONS)
    }

    /// Root directory under which dependencies are cloned
    pub fn clone_root(&self) -> PathBuf {
        clone_root_with_env(
            self.clone_dir.clone(),
            std::env::var_os("GOPATH"),
            dirs::home_dir(),
        )
    }
}

/// Returns the clone root.
/// Uses the configured directory if any, otherwise `$GOPATH/src` for the
/// first GOPATH entry, then `~/go/src`, then `./go/src`.
fn clone_root_with_env(
    clone_dir: Option<PathBuf>,
    gopath: Option<OsString>,
    home_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = clone_dir {
        return dir;
    }

    gopath
        .as_deref()
        .and_then(|paths| std::env::split_paths(paths).find(|p| !p.as_os_str().is_empty()))
        .or_else(|| home_dir.map(|home| home.join("go")))
        .unwrap_or_else(|| PathBuf::from("go"))
        .join("src")
}
