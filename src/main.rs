use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use model_deploy::deploy::{self, Deployer, InputPresets};
use model_deploy::diag::log_debug;
use model_deploy::prompt::TOKEN_ENV_VAR;
use model_deploy::{preflight, Config, GitHubClient, SystemGit, TerminalPrompter};

#[derive(Parser)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "Publish a local AI model directory to GitHub with Git LFS",
    long_about = None
)]
struct Cli {
    /// Repository name (prompted for when omitted)
    #[arg(short, long)]
    name: Option<String>,

    /// Directory to publish (defaults to the current directory)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Config file (defaults to ~/.model-deploy/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load_file(cli.config.as_deref())?;

    deploy::banner();

    // Pipeline failures are reported, not turned into an exit status
    if let Err(e) = run(&cli, &mut config) {
        println!("{} {:#}", "❌".red(), e);
    }

    Ok(())
}

fn run(cli: &Cli, config: &mut Config) -> Result<()> {
    config.apply_process_env()?;
    let toolchain = preflight::check()?;

    let workdir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    if !workdir.is_dir() {
        bail!("{} is not a directory", workdir.display());
    }
    log_debug("main", &format!("publishing {}", workdir.display()));

    let presets = InputPresets {
        repo_name: cli.name.clone(),
        token: std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|token| !token.trim().is_empty()),
    };

    let forge = GitHubClient::new(config)?;
    let git = SystemGit::new(workdir);
    let mut prompter = TerminalPrompter::new();

    let outcome = Deployer::new(config, &forge, &git)
        .with_lfs(toolchain.git_lfs)
        .run(&mut prompter, &presets)?;
    outcome.report();
    Ok(())
}
