use clap::{Parser, Subcommand};

/// reviewsim: scripted code-review demo for a marketplace review bot
#[derive(Parser, Debug, Clone)]
#[command(name = "reviewsim", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// Path to config file (default: .reviewsim.toml in the repository)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Repository directory to operate in (default: current directory)
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// Name of the review branch to create
    #[arg(long, global = true)]
    pub branch: Option<String>,

    /// Output format for the findings (human, json)
    #[arg(long, global = true)]
    pub output: Option<String>,

    /// Disable colored severity labels
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory holding template overrides
    #[arg(long, global = true)]
    pub templates_dir: Option<String>,

    /// Timeout in seconds for each git invocation
    #[arg(long, global = true)]
    pub git_timeout: Option<u64>,

    /// Start immediately instead of waiting for ENTER
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Run the full demo: preflight, git setup, review branch, simulated review
    Run,

    /// Only check that the fixture files are present
    Check,

    /// Print the simulated review findings
    Report,

    /// Print the instructions for trying the bot on GitHub
    Instructions,
}
