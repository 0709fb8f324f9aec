//! Git plumbing for publishing a directory
//!
//! Handles:
//! - Running `git` as a structured subprocess (argument arrays, no shell)
//! - Repository initialization and the authenticated `origin` remote
//! - Git LFS tracking for model weight formats
//! - Commit and push with `main` -> `master` fallback

mod operations;

pub use operations::{
    authenticated_url, configure_lfs, configure_origin, ensure_initialized, push_with_fallback,
    stage_and_commit, COMMIT_MESSAGE, FALLBACK_BRANCH, LFS_PATTERNS, PRIMARY_BRANCH,
};

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::diag::{log_debug, redact_url};

/// Runs `git` subcommands against one working directory.
///
/// `run` returns the trimmed stdout on success and `None` on any failure
/// (spawn error or non-zero exit). Callers decide whether `None` is fatal.
pub trait GitRunner {
    fn run(&self, args: &[&str]) -> Option<String>;

    /// Directory the commands operate on.
    fn workdir(&self) -> &Path;
}

/// GitRunner backed by the `git` binary on `PATH`.
pub struct SystemGit {
    workdir: PathBuf,
}

impl SystemGit {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Option<String> {
        let shown = display_args(args);
        log_debug("git", &format!("git {}", shown));

        // Never fall back to an interactive credential prompt
        let output = match Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                log_debug("git", &format!("failed to spawn git {}: {}", shown, e));
                return None;
            }
        };

        if !output.status.success() {
            log_debug(
                "git",
                &format!(
                    "git {} exited with {}: {}",
                    shown,
                    output.status,
                    redact_url(String::from_utf8_lossy(&output.stderr).trim())
                ),
            );
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn workdir(&self) -> &Path {
        &self.workdir
    }
}

/// Arguments joined for logs, with any URL userinfo masked.
fn display_args(args: &[&str]) -> String {
    args.iter()
        .map(|arg| redact_url(arg))
        .collect::<Vec<_>>()
        .join(" ")
}
