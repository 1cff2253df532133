use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::predicate;
use tempfile::tempdir;

#[test]
fn returned_status_becomes_exit_code() {
    let td = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("git-pgl-demo");
    cmd.current_dir(td.path())
        .args(["--status", "7"])
        .assert()
        .code(7);

    assert!(!td.path().join("pygit.tb").exists());
}

#[test]
fn error_exits_one_and_leaves_trace_in_cwd() {
    let td = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("git-pgl-demo");
    cmd.current_dir(td.path())
        .args(["--fail", "boom", "--status", "5"])
        .assert()
        .code(1)
        .stdout("boom\n");

    let report = std::fs::read_to_string(td.path().join("pygit.tb")).unwrap();
    assert!(report.contains("boom"));
    assert!(report.contains("stack backtrace") || report.contains("Stack backtrace"));
}

#[test]
fn pgl_ok_sets_skip_flag() {
    let td = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("git-pgl-demo");
    cmd.current_dir(td.path())
        .env("PGL_OK", "")
        .args(["--show", "PGL_OK"])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn environment_overrides_reach_subprogram() {
    let td = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("git-pgl-demo");
    cmd.current_dir(td.path())
        .env("PY_GIT_CUSTOM", "value")
        .args(["--show", "GIT_CUSTOM"])
        .assert()
        .success()
        .stdout("value\n");
}

#[test]
fn malformed_rust_log_falls_back_to_default_filter() {
    let td = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("git-pgl-demo");
    cmd.current_dir(td.path())
        .env("RUST_LOG", "git_pgl=notalevel")
        .args(["--status", "3"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid RUST_LOG"));
}
