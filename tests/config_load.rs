use std::fs;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use git_pgl::{Bootstrapper, GitTool, Value};
use predicates::prelude::predicate;
use tempfile::tempdir;

fn init_repo(root: &std::path::Path) {
    let mut cmd = Command::new("git");
    cmd.current_dir(root).args(["init", "-q"]);
    cmd.assert().success();

    for (key, value) in [("user.name", "Jane Doe"), ("user.email", "jane@example.com")] {
        let mut cmd = Command::new("git");
        cmd.current_dir(root).args(["config", key, value]);
        cmd.assert().success();
    }
}

#[test]
fn bootstrap_reads_real_repository() {
    let td = tempdir().unwrap();
    let root = td.path();
    init_repo(root);
    let top = root.canonicalize().unwrap();

    let cfg = Bootstrapper::new()
        .tool(GitTool::default().current_dir(root))
        .env_vars([("PY_GIT_CUSTOM", "value")])
        .bootstrap()
        .expect("bootstrap");

    assert_eq!(cfg.toplevel(), Some(top.as_path()));
    assert_eq!(cfg.git_dir(), Some(top.join(".git").as_path()));
    assert!(cfg.exec_path().is_some_and(|p| p.is_absolute()));
    assert_eq!(cfg.get("user.name"), Some(&Value::Str("Jane Doe".into())));
    assert_eq!(cfg.get_str("GIT_CUSTOM"), Some("value"));
    assert!(!cfg.contains("GIT_AUTHOR_IDENT"));
    assert!(!cfg.skip_checks());
}

#[test]
fn bootstrap_from_subdirectory_qualifies_git_dir() {
    let td = tempdir().unwrap();
    let root = td.path();
    init_repo(root);
    let sub = root.join("nested").join("deeper");
    fs::create_dir_all(&sub).unwrap();
    let top = root.canonicalize().unwrap();

    let cfg = Bootstrapper::new()
        .tool(GitTool::default().current_dir(&sub))
        .env_vars(Vec::<(String, String)>::new())
        .bootstrap()
        .expect("bootstrap");

    let git_dir = cfg.git_dir().expect("GIT_DIR set");
    assert!(git_dir.is_absolute());
    assert_eq!(git_dir.canonicalize().unwrap(), top.join(".git"));
}

#[test]
fn config_subcommand_prints_single_key() {
    let td = tempdir().unwrap();
    let root = td.path();
    init_repo(root);

    let mut cmd = cargo_bin_cmd!("git-pgl");
    cmd.current_dir(root)
        .env("PY_GIT_CUSTOM", "value")
        .args(["config", "GIT_CUSTOM"])
        .assert()
        .success()
        .stdout("value\n");
}

#[test]
fn config_subcommand_lists_everything() {
    let td = tempdir().unwrap();
    let root = td.path();
    init_repo(root);

    let mut cmd = cargo_bin_cmd!("git-pgl");
    cmd.current_dir(root)
        .env("PGL_OK", "")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("GIT_TOPLEVEL="))
        .stdout(predicate::str::contains("GIT_LIBEXEC="))
        .stdout(predicate::str::contains("PGL_OK=true"));
}

#[test]
fn config_subcommand_fails_for_unset_key() {
    let td = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("git-pgl");
    cmd.current_dir(td.path())
        .args(["config", "GIT_NO_SUCH_KEY"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GIT_NO_SUCH_KEY is not set"));
}
