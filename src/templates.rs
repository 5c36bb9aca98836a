use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};

const DEFAULT_INTRO: &str = include_str!("default_templates/intro.md");
const DEFAULT_INSTRUCTIONS: &str = include_str!("default_templates/instructions.md");

/// Known template variable names for validation.
const KNOWN_VARIABLES: &[&str] = &[
    "repo_name",
    "reviewer_name",
    "marketplace_url",
    "branch_name",
    "bot_prefix",
];

fn default_template(name: &str) -> Option<&'static str> {
    match name {
        "intro" => Some(DEFAULT_INTRO),
        "instructions" => Some(DEFAULT_INSTRUCTIONS),
        _ => None,
    }
}

fn template_filename(name: &str) -> String {
    format!("{name}.md")
}

/// Narration templates with embedded defaults and user overrides.
pub struct TemplateEngine {
    override_dir: Option<PathBuf>,
}

impl TemplateEngine {
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        Self { override_dir }
    }

    /// Load a template by name. A file in `override_dir` takes precedence
    /// over the embedded default.
    pub fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref dir) = self.override_dir {
            let path = Path::new(dir).join(template_filename(name));
            if path.exists() {
                return std::fs::read_to_string(&path).map_err(|e| {
                    Error::Template(format!(
                        "failed to read override template {}: {e}",
                        path.display()
                    ))
                });
            }
        }

        default_template(name)
            .map(|s| s.to_string())
            .ok_or_else(|| Error::Template(format!("unknown template: {name}")))
    }

    pub fn render(&self, name: &str, vars: &HashMap<String, String>) -> Result<String> {
        let template = self.load_template(name)?;
        render_template(&template, vars)
    }
}

/// Variables every template may reference, taken from the config.
pub fn config_vars(config: &Config) -> HashMap<String, String> {
    HashMap::from([
        ("repo_name".to_string(), config.repo_name.clone()),
        ("reviewer_name".to_string(), config.reviewer_name.clone()),
        ("marketplace_url".to_string(), config.marketplace_url.clone()),
        ("branch_name".to_string(), config.branch.clone()),
        ("bot_prefix".to_string(), config.bot_prefix.clone()),
    ])
}

/// Substitute `{{name}}` placeholders. Unknown names, missing values and
/// unterminated placeholders are errors; single braces pass through.
pub fn render_template(template: &str, vars: &HashMap<String, String>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            return Err(Error::Template(format!(
                "unclosed template variable: {{{{{after}"
            )));
        };

        let name = after[..close].trim();
        if !KNOWN_VARIABLES.contains(&name) {
            return Err(Error::Template(format!(
                "unknown template variable: {name}"
            )));
        }
        let value = vars.get(name).ok_or_else(|| {
            Error::Template(format!("missing value for template variable: {name}"))
        })?;
        out.push_str(value);
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    Ok(out)
}
