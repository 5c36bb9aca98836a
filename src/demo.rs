use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::findings::simulated_findings;
use crate::git::{GitRepo, REVIEW_COMMIT_MESSAGE, RepoSetup};
use crate::narrator::Narrator;
use crate::preflight::{REVIEW_BRANCH_PATHS, check_required_files};
use crate::report::{render_findings, render_header, render_step};
use crate::templates::{TemplateEngine, config_vars};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    MissingFiles(Vec<String>),
    BranchCreation(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoOutcome {
    Completed,
    Failed(FailureReason),
}

impl DemoOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Drives the scripted walkthrough: preflight, repository setup, review
/// branch, simulated analysis and the closing instructions.
pub struct Demo<N> {
    config: Config,
    repo: GitRepo,
    templates: TemplateEngine,
    narrator: N,
}

impl<N: Narrator> Demo<N> {
    pub fn new(config: Config, narrator: N) -> Self {
        let repo = GitRepo::new(config.repo_root.clone())
            .with_timeout(config.git_timeout.map(Duration::from_secs));
        let templates = TemplateEngine::new(config.templates_dir.clone());
        Self {
            config,
            repo,
            templates,
            narrator,
        }
    }

    /// Replace the git wrapper, e.g. to inject an author identity.
    pub fn with_repo(mut self, repo: GitRepo) -> Self {
        self.repo = repo;
        self
    }

    pub fn introduce(&self) -> Result<()> {
        let title = format!(
            "INTEGRATION TEST: {} + GITHUB",
            self.config.reviewer_name.to_uppercase()
        );
        self.narrator.say(&render_header(&title));
        let intro = self.templates.render("intro", &config_vars(&self.config))?;
        self.narrator.say(intro.trim_end());
        Ok(())
    }

    pub async fn run(&self) -> Result<DemoOutcome> {
        self.narrator.say(&render_step(
            1,
            "PREPARATION",
            "Setting up the environment for the test",
        ));

        let preflight = check_required_files(&self.config.repo_root);
        if !preflight.is_ready() {
            warn!(missing = ?preflight.missing, "required files missing");
            self.narrator
                .say(&format!("Missing files: {:?}", preflight.missing));
            return Ok(DemoOutcome::Failed(FailureReason::MissingFiles(
                preflight.missing,
            )));
        }
        self.narrator.say("All required files are present");

        self.narrator.say(&render_step(
            2,
            "GIT REPOSITORY",
            "Setting up version control",
        ));
        match self
            .repo
            .ensure_initialized(&self.config.initial_commit_message, &REVIEW_BRANCH_PATHS)
            .await?
        {
            RepoSetup::Initialized => self.narrator.say("Git repository initialized"),
            RepoSetup::AlreadyPresent => self.narrator.say("Git repository already exists"),
        }

        self.narrator.say(&render_step(
            3,
            "REVIEW BRANCH",
            "Creating a branch with code for review",
        ));
        if let Err(reason) = self.create_branch().await {
            self.narrator.say("Failed to create branch");
            return Ok(DemoOutcome::Failed(FailureReason::BranchCreation(reason)));
        }
        self.narrator.say("Branch created successfully");

        self.narrator.say(&render_step(
            4,
            "SIMULATED REVIEW",
            "Demonstrating the automatic analysis",
        ));
        let problems = simulated_findings();
        self.narrator.say(&render_findings(
            &self.config.reviewer_name,
            &problems,
            self.config.color,
        ));

        self.narrator.say(&render_step(
            5,
            "NEXT STEPS",
            "Instructions for the real GitHub",
        ));
        self.narrator.say(self.instructions()?.trim_end());

        info!(branch = %self.config.branch, "demo completed");
        Ok(DemoOutcome::Completed)
    }

    /// Create the review branch, narrating and swallowing the git error.
    async fn create_branch(&self) -> std::result::Result<(), String> {
        self.narrator.say("Creating branch for the test...");
        match self
            .repo
            .create_review_branch(
                &self.config.branch,
                &REVIEW_BRANCH_PATHS,
                REVIEW_COMMIT_MESSAGE,
            )
            .await
        {
            Ok(()) => {
                self.narrator.say("Branch created with the problematic code");
                Ok(())
            }
            Err(e) => {
                warn!(branch = %self.config.branch, error = %e, "branch creation failed");
                self.narrator.say(&format!("Error creating branch: {e}"));
                Err(e.to_string())
            }
        }
    }

    pub fn instructions(&self) -> Result<String> {
        self.templates
            .render("instructions", &config_vars(&self.config))
    }

    pub fn conclude(&self, outcome: &DemoOutcome) {
        if outcome.is_success() {
            self.narrator
                .say(&render_header("TEST COMPLETED SUCCESSFULLY"));
            self.narrator.say("Simulation ran successfully!");
            self.narrator.say("Next step: run it on the real GitHub");
        } else {
            self.narrator.say(&render_header("TEST FAILED"));
            self.narrator.say("Problems during execution");
        }
    }

    pub fn narrator(&self) -> &N {
        &self.narrator
    }
}
