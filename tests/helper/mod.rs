//! Shared fakes for integration tests

#![allow(dead_code)]

mod fakes;

pub use fakes::*;

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use modglide::config::Config;

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// Write a glide.lock with one `imports:` entry per (name, version)
pub fn write_lock(dir: &Path, imports: &[(&str, &str)]) -> PathBuf {
    let mut content = String::from("hash: 0000\nimports:\n");
    for (name, version) in imports {
        content.push_str(&format!("- name: {name}\n  version: {version}\n"));
    }
    let path = dir.join("glide.lock");
    std::fs::write(&path, content).unwrap();
    path
}

/// Write a go.mod requiring every (path, version)
pub fn write_go_mod(dir: &Path, requires: &[(&str, &str)]) -> PathBuf {
    let mut content = String::from("module example.com/app\n\ngo 1.21\n\nrequire (\n");
    for (path, version) in requires {
        content.push_str(&format!("\t{path} {version}\n"));
    }
    content.push_str(")\n");
    let path = dir.join("go.mod");
    std::fs::write(&path, content).unwrap();
    path
}

pub fn test_config(lock_file: PathBuf) -> Config {
    Config {
        lock_file,
        ..Config::default()
    }
}

pub fn workspace() -> TempDir {
    TempDir::new().unwrap()
}
