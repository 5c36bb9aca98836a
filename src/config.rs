use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::git::validate_branch_name;

pub const DEFAULT_CONFIG_FILE: &str = ".reviewsim.toml";
pub const DEFAULT_BRANCH: &str = "feature/qa-automation-problematic";
pub const DEFAULT_REPO_NAME: &str = "cogna-qa-automation-test";
pub const DEFAULT_REVIEWER: &str = "Amazon Q Developer";
pub const DEFAULT_MARKETPLACE_URL: &str = "https://github.com/marketplace/amazon-q-developer";
pub const DEFAULT_BOT_PREFIX: &str = "/q";
pub const DEFAULT_INITIAL_COMMIT: &str = "Initial commit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(Error::ConfigValidation(format!(
                "unknown output: {other} (expected: human, json)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub branch: Option<String>,
    pub repo_name: Option<String>,
    pub reviewer_name: Option<String>,
    pub marketplace_url: Option<String>,
    pub bot_prefix: Option<String>,
    pub initial_commit_message: Option<String>,
    pub git_timeout: Option<u64>,
    pub output: Option<String>,
    pub interactive: Option<bool>,
    pub templates_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub repo_root: PathBuf,
    pub branch: String,
    pub repo_name: String,
    pub reviewer_name: String,
    pub marketplace_url: String,
    pub bot_prefix: String,
    pub initial_commit_message: String,
    pub git_timeout: Option<u64>,
    pub output: OutputFormat,
    pub color: bool,
    pub interactive: bool,
    pub templates_dir: Option<PathBuf>,
}

impl Config {
    /// Load config for `repo_root`. An explicit `--config` path must exist;
    /// the default `.reviewsim.toml` is optional.
    pub fn load(cli: &Cli, repo_root: &Path) -> Result<Self> {
        let file_config = match cli.config {
            Some(ref explicit) => {
                let path = Path::new(explicit);
                if !path.exists() {
                    return Err(Error::ConfigNotFound(path.to_path_buf()));
                }
                parse_config(&std::fs::read_to_string(path)?)?
            }
            None => {
                let path = repo_root.join(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    parse_config(&std::fs::read_to_string(&path)?)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        let config = merge(file_config, cli, repo_root)?;
        validate_merged(&config)?;
        Ok(config)
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConfigFile) -> Result<()> {
    if let Some(ref output) = config.output {
        OutputFormat::parse(output)?;
    }
    if let Some(ref branch) = config.branch {
        validate_branch_name(branch).map_err(into_validation)?;
    }
    if let Some(timeout) = config.git_timeout
        && timeout == 0
    {
        return Err(Error::ConfigValidation(
            "git_timeout must be > 0".to_string(),
        ));
    }
    if let Some(ref prefix) = config.bot_prefix {
        validate_bot_prefix(prefix)?;
    }
    Ok(())
}

fn validate_bot_prefix(prefix: &str) -> Result<()> {
    if !prefix.starts_with('/') || prefix.len() < 2 || prefix.contains(char::is_whitespace) {
        return Err(Error::ConfigValidation(format!(
            "bot_prefix must look like a slash command (e.g. /q): {prefix}"
        )));
    }
    Ok(())
}

fn into_validation(err: Error) -> Error {
    match err {
        Error::Git(msg) => Error::ConfigValidation(msg),
        other => other,
    }
}

// CLI values skip `validate`, so re-check the fields a flag can set.
fn validate_merged(config: &Config) -> Result<()> {
    validate_branch_name(&config.branch).map_err(into_validation)?;
    if config.git_timeout == Some(0) {
        return Err(Error::ConfigValidation(
            "git_timeout must be > 0".to_string(),
        ));
    }
    Ok(())
}

pub fn merge(file: ConfigFile, cli: &Cli, repo_root: &Path) -> Result<Config> {
    let output = match cli.output.clone().or(file.output) {
        Some(o) => OutputFormat::parse(&o)?,
        None => OutputFormat::Human,
    };
    let color = !cli.no_color
        && output == OutputFormat::Human
        && std::env::var_os("NO_COLOR").is_none();

    Ok(Config {
        repo_root: repo_root.to_path_buf(),
        branch: cli
            .branch
            .clone()
            .or(file.branch)
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        repo_name: file
            .repo_name
            .unwrap_or_else(|| DEFAULT_REPO_NAME.to_string()),
        reviewer_name: file
            .reviewer_name
            .unwrap_or_else(|| DEFAULT_REVIEWER.to_string()),
        marketplace_url: file
            .marketplace_url
            .unwrap_or_else(|| DEFAULT_MARKETPLACE_URL.to_string()),
        bot_prefix: file
            .bot_prefix
            .unwrap_or_else(|| DEFAULT_BOT_PREFIX.to_string()),
        initial_commit_message: file
            .initial_commit_message
            .unwrap_or_else(|| DEFAULT_INITIAL_COMMIT.to_string()),
        git_timeout: cli.git_timeout.or(file.git_timeout),
        output,
        color,
        interactive: !cli.yes && file.interactive.unwrap_or(true),
        templates_dir: cli
            .templates_dir
            .clone()
            .or(file.templates_dir)
            .map(PathBuf::from),
    })
}
