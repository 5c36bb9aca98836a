use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reviewsim::cli::{Cli, CliCommand};
use reviewsim::config::{Config, OutputFormat};
use reviewsim::demo::Demo;
use reviewsim::error::{Error, Result};
use reviewsim::findings::simulated_findings;
use reviewsim::interactive::wait_for_enter;
use reviewsim::narrator::Console;
use reviewsim::preflight::check_required_files;
use reviewsim::report::{render_findings, render_json};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    let repo_root = match cli.repo {
        Some(ref dir) => PathBuf::from(dir),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let config = match Config::load(&cli, &repo_root) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    info!(?config, "config loaded");

    match cli.command.clone().unwrap_or(CliCommand::Run) {
        CliCommand::Run => {
            run_demo(config).await;
            // A pending stdin read would otherwise hold the runtime open.
            std::process::exit(0);
        }
        CliCommand::Check => {
            let preflight = check_required_files(&config.repo_root);
            for file in preflight.present() {
                println!("present  {file}");
            }
            for file in &preflight.missing {
                println!("missing  {file}");
            }
            if !preflight.is_ready() {
                std::process::exit(1);
            }
        }
        CliCommand::Report => {
            if let Err(e) = print_report(&config) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        CliCommand::Instructions => {
            let demo = Demo::new(config, Console);
            match demo.instructions() {
                Ok(text) => println!("{}", text.trim()),
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

/// The whole walkthrough. Outcomes are narrated, never turned into exit codes.
async fn run_demo(config: Config) {
    let interactive = config.interactive;
    let demo = Demo::new(config, Console);

    let walkthrough = async {
        demo.introduce()?;
        if interactive {
            wait_for_enter("\nPress ENTER to start the test...").await?;
        }
        let outcome = demo.run().await?;
        demo.conclude(&outcome);
        Ok::<_, Error>(())
    };

    // ctrl_c is polled first so the handler is installed before the prompt.
    let result: Result<()> = tokio::select! {
        biased;
        _ = tokio::signal::ctrl_c() => Err(Error::Interrupted),
        r = walkthrough => r,
    };

    match result {
        Ok(()) => {}
        Err(Error::Interrupted) => println!("\n\nTest interrupted by user"),
        Err(e) => println!("\nUnexpected error: {e}"),
    }
}

fn print_report(config: &Config) -> Result<()> {
    let problems = simulated_findings();
    match config.output {
        OutputFormat::Json => println!("{}", render_json(&config.reviewer_name, &problems)?),
        OutputFormat::Human => println!(
            "{}",
            render_findings(&config.reviewer_name, &problems, config.color).trim_start()
        ),
    }
    Ok(())
}
