//! Integration tests for CLI

use assert_cmd::Command;
use git2::{Repository, Signature};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command as StdCommand;
use tempfile::TempDir;

fn kwf_patcher() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("kwf-patcher"))
}

fn git_available() -> bool {
    StdCommand::new("git").arg("--version").output().map(|out| out.status.success()).unwrap_or(false)
}

/// Repository with submitter identity configured and one commit; returns the
/// full commit id.
fn init_repo(dir: &Path) -> String {
    let repo = Repository::init(dir).expect("init repo");
    let mut config = repo.config().expect("config");
    config.set_str("user.name", "Jane Backporter").expect("set name");
    config.set_str("user.email", "jane@example.com").expect("set email");

    fs::write(dir.join("dm-thin.c"), "static int pool_ctr(void) { return 0; }\n").expect("write");
    let mut index = repo.index().expect("index");
    index.add_path(Path::new("dm-thin.c")).expect("add");
    index.write().expect("write index");
    let tree = repo.find_tree(index.write_tree().expect("write tree")).expect("tree");

    let sig = Signature::now("Upstream Dev", "dev@example.com").expect("signature");
    repo.commit(Some("HEAD"), &sig, &sig, "dm thin: fix pool leak\n\nDetails.\n", &tree, &[])
        .expect("commit")
        .to_string()
}

struct Fixture {
    _root: TempDir,
    patches: std::path::PathBuf,
    repo: std::path::PathBuf,
    outside: std::path::PathBuf,
    commit: String,
}

fn fixture() -> Fixture {
    let root = TempDir::new().expect("tmp");
    let patches = root.path().join("patches");
    let repo = root.path().join("linux");
    let outside = root.path().join("elsewhere");
    for dir in [&patches, &repo, &outside] {
        fs::create_dir_all(dir).expect("mkdir");
    }
    let commit = init_repo(&repo);
    Fixture { _root: root, patches, repo, outside, commit }
}

#[test]
fn test_cli_version() {
    let mut cmd = kwf_patcher();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("kwf-patcher"));
}

#[test]
fn test_cli_help() {
    let mut cmd = kwf_patcher();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("tracker-annotated"))
        .stdout(predicate::str::contains("PATCH_DIR"))
        .stdout(predicate::str::contains("--preset"));
}

#[test]
fn test_missing_arguments_exit_one() {
    kwf_patcher().assert().code(1).stderr(predicate::str::contains("PATCH_DIR"));
}

#[test]
fn test_too_many_arguments_exit_one() {
    let tmp = TempDir::new().expect("tmp");
    let dir = tmp.path().to_str().expect("utf8 path");
    kwf_patcher().args([dir, dir, dir, dir]).assert().code(1);
}

#[test]
fn test_nonexistent_patch_dir_is_rejected() {
    let tmp = TempDir::new().expect("tmp");
    let missing = tmp.path().join("missing");
    kwf_patcher()
        .arg(&missing)
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("doesn't exist or isn't a directory"));
}

#[test]
fn test_no_repository_is_rejected() {
    let tmp = TempDir::new().expect("tmp");
    kwf_patcher()
        .arg(tmp.path())
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not in a git repository, and no repository specified"));
}

#[test]
fn test_src_repo_must_be_a_repository() {
    let f = fixture();
    kwf_patcher()
        .arg(&f.patches)
        .arg(&f.outside)
        .current_dir(&f.outside)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("src_repo"))
        .stderr(predicate::str::contains("is not in a git repository"));
}

#[test]
fn test_missing_commit_list_is_fatal() {
    let f = fixture();
    fs::write(f.patches.join("default-bz.txt"), "1234567\n").expect("write");
    kwf_patcher()
        .arg(&f.patches)
        .arg(&f.repo)
        .current_dir(&f.outside)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("upstream-commits.txt doesn't exist"));
}

#[test]
fn test_generates_patch_with_defaults() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }
    let f = fixture();
    let short = &f.commit[..12];
    fs::write(f.patches.join("upstream-commits.txt"), format!("# series\n{short}\nbogus line\n"))
        .expect("write");
    fs::write(f.patches.join("default-bz.txt"), "1234567\n").expect("write");

    kwf_patcher()
        .arg(&f.patches)
        .arg(&f.repo)
        .current_dir(&f.outside)
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid line at 3"));

    let patch = f.patches.join("0001-dm-thin-fix-pool-leak.patch");
    let text = fs::read_to_string(&patch).expect("patch written");
    assert!(text.starts_with(
        "From: Jane Backporter <jane@example.com>\nSubject: dm thin: fix pool leak\n\n"
    ));
    assert!(text.contains("Bugzilla: https://bugzilla.redhat.com/1234567\n"));
    assert!(text.contains("Upstream Status: kernel/git/torvalds/linux.git\n"));
    assert!(text.contains("Author: Upstream Dev <dev@example.com>"));
    assert!(text.contains("Signed-off-by: Jane Backporter <jane@example.com>\n"));
    assert!(text.contains("diff --git a/dm-thin.c b/dm-thin.c"));

    let patch_count = fs::read_dir(&f.patches)
        .expect("read dir")
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "patch"))
        .count();
    assert_eq!(patch_count, 1);
}

#[test]
fn test_mapped_metadata_and_unused_entries() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }
    let f = fixture();
    let short = &f.commit[..12];
    let stale = "0123456789ab";
    fs::write(f.patches.join("upstream-commits.txt"), format!("{short}\n")).expect("write");
    fs::write(f.patches.join("default-bz.txt"), "1234567\n").expect("write");
    fs::write(f.patches.join("bz-commits-map.txt"), format!("{short} 2000001\n{stale}\n"))
        .expect("write");
    fs::write(f.patches.join("dm-commits.txt"), format!("{short}\n")).expect("write");

    kwf_patcher()
        .arg(&f.patches)
        .arg(&f.repo)
        .current_dir(&f.outside)
        .assert()
        .success()
        .stderr(predicate::str::contains(format!("unused commit id {stale}")))
        .stderr(predicate::str::contains("bz-commits-map.txt"));

    let text = fs::read_to_string(f.patches.join("0001-dm-thin-fix-pool-leak.patch"))
        .expect("patch written");
    assert!(text.contains("Bugzilla: https://bugzilla.redhat.com/2000001\n"));
    assert!(!text.contains("1234567"));
    assert!(text.contains("Upstream Status: kernel/git/device-mapper/linux-dm.git\n"));
}

#[test]
fn test_jira_preset_with_upstream_map() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }
    let f = fixture();
    let short = &f.commit[..12];
    fs::write(f.patches.join("upstream-commits.txt"), format!("{short}\n")).expect("write");
    fs::write(f.patches.join("default-jira.txt"), "RHEL-1234\n").expect("write");
    fs::write(f.patches.join("upstream-repo-map.txt"), format!("{short} kernel/git/netdev/net.git\n"))
        .expect("write");

    kwf_patcher().arg(&f.patches).arg(&f.repo).current_dir(&f.outside).assert().success();

    let text = fs::read_to_string(f.patches.join("0001-dm-thin-fix-pool-leak.patch"))
        .expect("patch written");
    assert!(text.contains("JIRA: https://issues.redhat.com/browse/RHEL-1234\n"));
    assert!(text.contains("Upstream Status: kernel/git/netdev/net.git\n"));
}

#[test]
fn test_unknown_commit_is_fatal() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }
    let f = fixture();
    fs::write(f.patches.join("upstream-commits.txt"), "0123456789abcdef\n").expect("write");
    fs::write(f.patches.join("default-bz.txt"), "1234567\n").expect("write");

    kwf_patcher()
        .arg(&f.patches)
        .arg(&f.repo)
        .current_dir(&f.outside)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Command failed"))
        .stderr(predicate::str::contains("show 0123456789abcdef"))
        .stderr(predicate::str::contains("Return Code:"));
}

#[test]
fn test_missing_identity_is_fatal() {
    let root = TempDir::new().expect("tmp");
    let patches = root.path().join("patches");
    let repo = root.path().join("centos");
    let home = root.path().join("home");
    for dir in [&patches, &repo, &home] {
        fs::create_dir_all(dir).expect("mkdir");
    }
    Repository::init(&repo).expect("init repo");
    fs::write(patches.join("upstream-commits.txt"), "0123456789ab\n").expect("write");
    fs::write(patches.join("default-bz.txt"), "1234567\n").expect("write");

    kwf_patcher()
        .arg(&patches)
        .arg(&repo)
        .current_dir(&home)
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", &home)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("user.name is not set"));
}

#[test]
fn test_commit_list_is_checked_before_preset_detection() {
    let f = fixture();
    kwf_patcher()
        .arg(&f.patches)
        .arg(&f.repo)
        .current_dir(&f.outside)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("upstream-commits.txt doesn't exist"))
        .stderr(predicate::str::contains("default-bz.txt").not());
}
