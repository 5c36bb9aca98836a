mod common;

use std::io::Read;
use std::process::Stdio;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;

use common::{GIT_IDENTITY, copy_fixtures};

#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("reviewsim").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

fn has_ansi(bytes: &[u8]) -> bool {
    bytes.contains(&0x1b)
}

// --- Help & version ---

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("code-review demo"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reviewsim"));
}

// --- Report & instructions ---

#[test]
fn report_json_has_five_problems() {
    let output = cmd()
        .args(["report", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let severities: Vec<&str> = v["problems"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["severity"].as_str().unwrap())
        .collect();
    assert_eq!(severities, vec!["high", "high", "medium", "medium", "high"]);
}

#[test]
fn report_human() {
    cmd()
        .args(["report", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PROBLEM 5:"))
        .stdout(predicate::str::contains("Total problems: 5"));
}

#[test]
fn report_color_follows_no_color_env() {
    let plain = cmd().arg("report").output().unwrap();
    assert!(plain.status.success());
    assert!(!has_ansi(&plain.stdout));

    let colored = cmd().env_remove("NO_COLOR").arg("report").output().unwrap();
    assert!(colored.status.success());
    assert!(has_ansi(&colored.stdout));
    assert!(String::from_utf8_lossy(&colored.stdout).contains("PROBLEM 5:"));
}

#[test]
fn instructions_use_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".reviewsim.toml"),
        "branch = \"feature/custom-review\"\nbot_prefix = \"/bot\"\n",
    )
    .unwrap();
    cmd()
        .current_dir(&tmp)
        .arg("instructions")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "git push origin feature/custom-review",
        ))
        .stdout(predicate::str::contains("/bot review"));
}

// --- Config validation ---

#[test]
fn unknown_output_rejected() {
    cmd()
        .args(["report", "--output", "yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown output: yaml"));
}

#[test]
fn missing_explicit_config_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(&tmp)
        .args(["report", "--config", "nope.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("config file not found"));
}

// --- Preflight ---

#[test]
fn check_lists_missing_files() {
    let tmp = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(&tmp)
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("missing  test_github_integration.py"))
        .stdout(predicate::str::contains("missing  github_integration_test.md"));
}

#[test]
fn check_passes_with_fixtures() {
    let tmp = tempfile::tempdir().unwrap();
    copy_fixtures(tmp.path());
    cmd()
        .args(["check", "--repo", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("present  .amazonq/rules/qa-standards.md"));
}

// --- Full run ---

#[test]
fn run_without_fixtures_prints_failure_banner() {
    let tmp = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(&tmp)
        .args(["run", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing files"))
        .stdout(predicate::str::contains("TEST FAILED"));
}

#[test]
fn run_with_fixtures_completes() {
    let tmp = tempfile::tempdir().unwrap();
    copy_fixtures(tmp.path());
    let mut c = cmd();
    for (k, v) in GIT_IDENTITY {
        c.env(k, v);
    }
    c.current_dir(&tmp)
        .env_remove("RUST_LOG")
        .arg("--yes")
        .assert()
        .success()
        .stderr(predicate::str::contains("git command failed").not())
        .stderr(predicate::str::contains("WARN").not())
        .stdout(predicate::str::contains("Git repository initialized"))
        .stdout(predicate::str::contains("PROBLEM 5:"))
        .stdout(predicate::str::contains("TEST COMPLETED SUCCESSFULLY"));
}

#[test]
fn run_reads_enter_from_stdin() {
    let tmp = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(&tmp)
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Press ENTER to start the test..."))
        .stdout(predicate::str::contains("TEST FAILED"));
}

#[test]
fn run_git_failure_is_reported_and_exits_zero() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    copy_fixtures(tmp.path());
    cmd()
        .current_dir(&tmp)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("GIT_CONFIG_NOSYSTEM", "1")
        // git rejects an explicitly empty identity, so the initial commit fails.
        .env("GIT_AUTHOR_NAME", "")
        .env("GIT_COMMITTER_NAME", "")
        .env_remove("GIT_AUTHOR_EMAIL")
        .env_remove("GIT_COMMITTER_EMAIL")
        .env_remove("EMAIL")
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("STEP 2: GIT REPOSITORY"))
        .stdout(predicate::str::contains("Unexpected error: git error"))
        .stdout(predicate::str::contains("TEST COMPLETED SUCCESSFULLY").not());
}

#[cfg(unix)]
#[test]
#[allow(deprecated)]
fn run_interrupted_at_prompt_exits_zero() {
    let tmp = tempfile::tempdir().unwrap();
    let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin("reviewsim"))
        .current_dir(&tmp)
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let mut stdout = child.stdout.take().unwrap();
    let mut seen = Vec::new();
    let mut chunk = [0u8; 1024];
    while !String::from_utf8_lossy(&seen).contains("Press ENTER") {
        let n = stdout.read(&mut chunk).unwrap();
        assert!(n > 0, "prompt never shown: {}", String::from_utf8_lossy(&seen));
        seen.extend_from_slice(&chunk[..n]);
    }
    std::thread::sleep(Duration::from_millis(100));

    let rc = unsafe { libc::kill(child.id() as libc::pid_t, libc::SIGINT) };
    assert_eq!(rc, 0);
    stdout.read_to_end(&mut seen).unwrap();
    // stdin stays open until here so only the signal can end the prompt.
    drop(child.stdin.take());
    let status = child.wait().unwrap();

    let text = String::from_utf8_lossy(&seen);
    assert!(status.success(), "status {status:?}, output: {text}");
    assert!(text.contains("Test interrupted by user"), "{text}");
    assert!(!text.contains("STEP 1"), "{text}");
}
