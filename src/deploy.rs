//! Deployment pipeline: input -> repository -> local setup -> LFS -> push.
//!
//! Every stage runs once, in order. Input and API failures abort with an
//! error; git setup steps are best-effort; the push result becomes the
//! [`DeployOutcome`].

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::diag::log_debug;
use crate::forge::{resolve_repository, ForgeClient, RepositoryDescriptor};
use crate::git::{self, GitRunner};
use crate::prompt::{collect_inputs, DeployInputs, Prompter};

/// Values that bypass the interactive prompts.
#[derive(Debug, Default, Clone)]
pub struct InputPresets {
    pub repo_name: Option<String>,
    pub token: Option<String>,
}

/// How a completed run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// A push succeeded on `branch`.
    Published {
        clone_url: String,
        branch: &'static str,
    },
    /// Both push attempts failed.
    PushFailed { clone_url: String },
}

impl DeployOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeployOutcome::Published { .. })
    }

    /// Print the final status line(s).
    pub fn report(&self) {
        match self {
            DeployOutcome::Published { clone_url, .. } => {
                println!("\n{} Your model is live at:", "✨ ALL DONE!".green().bold());
                println!("🔗 {}", clone_url);
            }
            DeployOutcome::PushFailed { .. } => {
                println!(
                    "\n{} Push failed. Make sure your token has 'repo' permissions.",
                    "❌".red()
                );
            }
        }
    }
}

/// Print the startup banner.
pub fn banner() {
    println!("{}", "🚀 GitHub AI Model Auto-Deployer".bold());
    println!("{}", "-".repeat(35));
}

/// Runs the pipeline against one forge and one working directory.
pub struct Deployer<'a> {
    config: &'a Config,
    forge: &'a dyn ForgeClient,
    git: &'a dyn GitRunner,
    lfs: bool,
}

impl<'a> Deployer<'a> {
    pub fn new(config: &'a Config, forge: &'a dyn ForgeClient, git: &'a dyn GitRunner) -> Self {
        Self {
            config,
            forge,
            git,
            lfs: true,
        }
    }

    /// Whether to run the Git LFS steps. Off when `git-lfs` is not installed.
    pub fn with_lfs(mut self, lfs: bool) -> Self {
        self.lfs = lfs;
        self
    }

    /// Collect input, then publish.
    pub fn run(
        &self,
        prompter: &mut dyn Prompter,
        presets: &InputPresets,
    ) -> Result<DeployOutcome> {
        let inputs = collect_inputs(
            prompter,
            presets.repo_name.as_deref(),
            presets.token.as_deref(),
        )?;
        self.publish(&inputs)
    }

    /// Resolve the repository and push the working directory to it.
    pub fn publish(&self, inputs: &DeployInputs) -> Result<DeployOutcome> {
        let DeployInputs {
            repo_name,
            credential,
        } = inputs;

        println!("\nPhase 1: Creating '{}' on GitHub...", repo_name);
        let RepositoryDescriptor {
            clone_url,
            owner,
            created,
        } = resolve_repository(self.forge, self.config, repo_name, credential)?;
        log_debug(
            "deploy",
            &format!("resolved {} (created: {}, owner: {:?})", clone_url, created, owner),
        );

        println!("\nPhase 2: Initializing local files...");
        git::ensure_initialized(self.git);
        git::configure_origin(self.git, &clone_url, credential)?;

        println!("Phase 3: Setting up Git LFS (Large File Storage)...");
        if self.lfs {
            git::configure_lfs(self.git);
        } else {
            log_debug("deploy", "git-lfs unavailable, skipping LFS setup");
        }

        println!("Phase 4: Committing and Pushing to GitHub...");
        git::stage_and_commit(self.git);

        Ok(match git::push_with_fallback(self.git) {
            Some(branch) => DeployOutcome::Published { clone_url, branch },
            None => DeployOutcome::PushFailed { clone_url },
        })
    }
}
