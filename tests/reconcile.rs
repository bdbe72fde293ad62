//! End-to-end reconciliation runs with faked network and git

mod helper;

use std::sync::Arc;

use helper::{
    FakeCommitDates, FakeDiscovery, FakeVcs, GoListRunner, at, registry_with, test_config,
    workspace, write_go_mod, write_lock,
};
use modglide::app::{App, DependencySource, EXIT_RESOLUTION_FAILED, EXIT_SUCCESS};

const NEW_HASH: &str = "bbbbbbbbbbbbbbbbbbbb";

fn app_with(lock: std::path::PathBuf, dates: FakeCommitDates, runner: GoListRunner) -> App {
    let vcs = Arc::new(FakeVcs::new().with_tag("v1.0.0", NEW_HASH));
    App::with_parts(
        test_config(lock),
        Arc::new(runner),
        Arc::new(FakeDiscovery),
        registry_with(vcs),
        Arc::new(dates),
    )
}

async fn run_go_mod(app: &App, go_mod: std::path::PathBuf) -> (i32, String) {
    let mut out = Vec::new();
    let code = app
        .run(&DependencySource::GoMod(go_mod), &mut out)
        .await
        .unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[tokio::test(flavor = "multi_thread")]
async fn reports_updated_dependency_with_commit_dates() {
    let dir = workspace();
    let lock = write_lock(dir.path(), &[("pkg/x", "aaaaaaaaaaaa")]);
    let go_mod = write_go_mod(dir.path(), &[("pkg/x", "v1.0.0")]);
    let dates = FakeCommitDates::new()
        .with_commit("aaaaaaaaaaaa", "aaaa", at(2020, 1, 1))
        .with_commit("bbbbbbbbbbbb", "bbbb", at(2021, 6, 1));

    let app = app_with(lock, dates, GoListRunner::new(""));
    let (code, out) = run_go_mod(&app, go_mod).await;

    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(
        out,
        "pkg/x\n\
         \taaaaaaaaaaaa 2020-01-01 00:00:00 +0000 UTC\n\
         \tbbbbbbbbbbbb 2021-06-01 00:00:00 +0000 UTC\n\
         1/1 changed\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn marks_older_resolved_commit_as_reversion() {
    let dir = workspace();
    let lock = write_lock(dir.path(), &[("pkg/x", "aaaaaaaaaaaa")]);
    let go_mod = write_go_mod(dir.path(), &[("pkg/x", "v1.0.0")]);
    let dates = FakeCommitDates::new()
        .with_commit("aaaaaaaaaaaa", "aaaa", at(2020, 1, 1))
        .with_commit("bbbbbbbbbbbb", "bbbb", at(2019, 1, 1));

    let app = app_with(lock, dates, GoListRunner::new(""));
    let (code, out) = run_go_mod(&app, go_mod).await;

    assert_eq!(code, EXIT_SUCCESS);
    assert!(out.starts_with("pkg/x reversion\n"));
    assert!(out.ends_with("1/1 changed\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn still_reports_when_some_dependencies_fail() {
    let dir = workspace();
    let lock = write_lock(
        dir.path(),
        &[("pkg/x", "aaaaaaaaaaaa"), ("missing/y", "cccccccccccc")],
    );
    let go_mod = write_go_mod(dir.path(), &[("pkg/x", "v1.0.0"), ("missing/y", "v1.0.0")]);
    let dates = FakeCommitDates::new()
        .with_commit("aaaaaaaaaaaa", "aaaa", at(2020, 1, 1))
        .with_commit("bbbbbbbbbbbb", "bbbb", at(2021, 6, 1));

    let app = app_with(lock, dates, GoListRunner::new(""));
    let (code, out) = run_go_mod(&app, go_mod).await;

    assert_eq!(code, EXIT_RESOLUTION_FAILED);
    assert!(out.contains("pkg/x\n"));
    assert!(!out.contains("missing/y"));
    assert!(out.ends_with("1/1 changed\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn skips_dependencies_without_baseline_or_version() {
    let dir = workspace();
    let lock = write_lock(dir.path(), &[("pkg/x", NEW_HASH)]);
    let go_list = r#"{"Path": "example.com/app", "Main": true}
{"Path": "pkg/x", "Version": "v1.0.0"}
{"Path": "pkg/unlocked", "Version": "v1.0.0"}
{"Path": "pkg/local"}
"#;

    let app = app_with(lock, FakeCommitDates::new(), GoListRunner::new(go_list));
    let mut out = Vec::new();
    let code = app.run(&DependencySource::GoList, &mut out).await.unwrap();

    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(String::from_utf8(out).unwrap(), "0/1 changed\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn fails_when_lock_file_is_missing() {
    let dir = workspace();
    let go_mod = write_go_mod(dir.path(), &[("pkg/x", "v1.0.0")]);

    let app = app_with(
        dir.path().join("absent.lock"),
        FakeCommitDates::new(),
        GoListRunner::new(""),
    );
    let err = app
        .run(&DependencySource::GoMod(go_mod), Vec::new())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("absent.lock"));
}
