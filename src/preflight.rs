use std::path::Path;

use tracing::debug;

/// Fixture files the demo narrates, relative to the repository root.
pub const REQUIRED_FILES: [&str; 3] = [
    "test_github_integration.py",
    ".amazonq/rules/qa-standards.md",
    "github_integration_test.md",
];

/// Paths committed on the review branch.
pub const REVIEW_BRANCH_PATHS: [&str; 2] = ["test_github_integration.py", ".amazonq/"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preflight {
    pub required: Vec<String>,
    pub missing: Vec<String>,
}

impl Preflight {
    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn present(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .filter(|f| !self.missing.contains(f))
            .map(String::as_str)
    }
}

/// Check which of [`REQUIRED_FILES`] exist under `root`.
pub fn check_required_files(root: &Path) -> Preflight {
    let mut missing = Vec::new();
    for file in REQUIRED_FILES {
        let exists = root.join(file).exists();
        debug!(file, exists, "preflight");
        if !exists {
            missing.push(file.to_string());
        }
    }
    Preflight {
        required: REQUIRED_FILES.iter().map(|f| f.to_string()).collect(),
        missing,
    }
}
