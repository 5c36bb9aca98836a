//! Console rendering for the demo narration and the simulated review.
//!
//! Every renderer returns a `String` so the narration can be asserted on
//! without capturing stdout. JSON output carries the same data as the
//! human form plus a summary object.

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use serde_json::json;

use crate::error::Result;
use crate::findings::{Problem, Severity, Summary};

const BANNER_WIDTH: usize = 70;
const SECTION_WIDTH: usize = 50;

pub fn render_header(title: &str) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("\n{rule}\n{title}\n{rule}")
}

pub fn render_step(number: u32, title: &str, description: &str) -> String {
    format!(
        "\nSTEP {number}: {title}\n{description}\n{}",
        "-".repeat(SECTION_WIDTH)
    )
}

fn severity_label(severity: Severity, color: bool) -> String {
    let label = severity.as_str().to_uppercase();
    if !color {
        return format!("[{label}]");
    }
    match severity {
        Severity::High => format!("[{label}]").red().bold().to_string(),
        Severity::Medium => format!("[{label}]").yellow().bold().to_string(),
        Severity::Low => format!("[{label}]").green().bold().to_string(),
    }
}

/// Render the numbered problem list followed by the summary.
pub fn render_findings(reviewer: &str, problems: &[Problem], color: bool) -> String {
    let mut out = String::new();
    let title = format!("{} ANALYSIS:", reviewer.to_uppercase());
    let _ = writeln!(out);
    if color {
        let _ = writeln!(out, "{}", title.bold());
    } else {
        let _ = writeln!(out, "{title}");
    }
    let _ = write!(out, "{}", "=".repeat(SECTION_WIDTH));

    for (i, problem) in problems.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "\n{} PROBLEM {}:",
            severity_label(problem.severity, color),
            i + 1
        );
        let _ = writeln!(out, "   File: {}", problem.file);
        let _ = writeln!(out, "   Line: {}", problem.line);
        let _ = writeln!(out, "   Type: {}", problem.kind.as_str());
        let _ = writeln!(
            out,
            "   Severity: {}",
            problem.severity.as_str().to_uppercase()
        );
        let _ = writeln!(out, "   Message: {}", problem.message);
        let _ = write!(out, "   Suggestion: {}", problem.suggestion);
    }

    let _ = writeln!(out);
    out.push_str(&render_summary(&Summary::of(problems)));
    out
}

pub fn render_summary(summary: &Summary) -> String {
    format!(
        "\nSUMMARY:\n   Total problems: {}\n   High severity: {}\n   Medium severity: {}",
        summary.total, summary.high, summary.medium
    )
}

pub fn render_json(reviewer: &str, problems: &[Problem]) -> Result<String> {
    let doc = json!({
        "reviewer": reviewer,
        "problems": problems,
        "summary": Summary::of(problems),
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}
