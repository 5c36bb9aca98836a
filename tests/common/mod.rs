#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use clap::Parser;
use reviewsim::cli::Cli;
use reviewsim::config::{Config, ConfigFile, merge};
use reviewsim::git::GitRepo;
use reviewsim::preflight::REQUIRED_FILES;

pub const GIT_IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "Test"),
    ("GIT_AUTHOR_EMAIL", "test@test.com"),
    ("GIT_COMMITTER_NAME", "Test"),
    ("GIT_COMMITTER_EMAIL", "test@test.com"),
];

pub fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} in {} failed: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Create a temporary git repo with an initial commit on `main`.
pub fn init_temp_repo() -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    run_git(dir.path(), &["init"]);
    run_git(dir.path(), &["config", "user.email", "test@test.com"]);
    run_git(dir.path(), &["config", "user.name", "Test"]);
    std::fs::write(dir.path().join("README.md"), "# test").unwrap();
    run_git(dir.path(), &["add", "."]);
    run_git(dir.path(), &["commit", "-m", "init"]);
    run_git(dir.path(), &["branch", "-M", "main"]);
    dir
}

/// Copy the fixture files shipped with the crate into `root`.
pub fn copy_fixtures(root: &Path) {
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    for file in REQUIRED_FILES {
        let dest = root.join(file);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::copy(source.join(file), &dest).unwrap();
    }
}

/// Git wrapper that can commit without a global identity.
pub fn repo_with_identity(root: &Path) -> GitRepo {
    GIT_IDENTITY
        .iter()
        .fold(GitRepo::new(root.to_path_buf()), |repo, (k, v)| {
            repo.with_env(k, v)
        })
}

/// Non-interactive, uncolored config rooted at `root`.
pub fn test_config(root: &Path) -> Config {
    let cli = Cli::parse_from(["reviewsim", "--no-color", "-y"]);
    merge(ConfigFile::default(), &cli, root).unwrap()
}
