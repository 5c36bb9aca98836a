use serde::Serialize;

/// File every simulated finding points at.
pub const REVIEWED_FILE: &str = "test_github_integration.py";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    Timing,
    Selector,
    ResourceLeak,
    HardcodedData,
    ApiErrorHandling,
}

impl ProblemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timing => "timing",
            Self::Selector => "selector",
            Self::ResourceLeak => "resource_leak",
            Self::HardcodedData => "hardcoded_data",
            Self::ApiErrorHandling => "api_error_handling",
        }
    }
}

/// One scripted finding. Line numbers are part of the script and are not
/// derived from the file's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub file: &'static str,
    pub line: u32,
    #[serde(rename = "type")]
    pub kind: ProblemKind,
    pub severity: Severity,
    pub message: &'static str,
    pub suggestion: &'static str,
}

const FINDINGS: [Problem; 5] = [
    Problem {
        file: REVIEWED_FILE,
        line: 15,
        kind: ProblemKind::Timing,
        severity: Severity::High,
        message: "time.sleep() call detected. WebDriverWait is recommended.",
        suggestion: "Replace with WebDriverWait and expected conditions",
    },
    Problem {
        file: REVIEWED_FILE,
        line: 35,
        kind: ProblemKind::ResourceLeak,
        severity: Severity::High,
        message: "WebDriver is not being closed properly",
        suggestion: "Add driver.quit() in teardown or use a context manager",
    },
    Problem {
        file: REVIEWED_FILE,
        line: 25,
        kind: ProblemKind::Selector,
        severity: Severity::Medium,
        message: "Brittle CSS selector detected: '.btn'",
        suggestion: "Use a more specific selector such as '[data-testid=\"login-button\"]'",
    },
    Problem {
        file: REVIEWED_FILE,
        line: 45,
        kind: ProblemKind::HardcodedData,
        severity: Severity::Medium,
        message: "Hardcoded credentials detected",
        suggestion: "Use environment variables or a configuration file",
    },
    Problem {
        file: REVIEWED_FILE,
        line: 85,
        kind: ProblemKind::ApiErrorHandling,
        severity: Severity::High,
        message: "Missing HTTP error handling",
        suggestion: "Check response.status_code before parsing JSON",
    },
];

/// The fixed list of problems the simulated reviewer "finds".
pub fn simulated_findings() -> Vec<Problem> {
    FINDINGS.to_vec()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl Summary {
    pub fn of(problems: &[Problem]) -> Self {
        let count = |s: Severity| problems.iter().filter(|p| p.severity == s).count();
        Self {
            total: problems.len(),
            high: count(Severity::High),
            medium: count(Severity::Medium),
            low: count(Severity::Low),
        }
    }
}
