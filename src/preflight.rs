//! Preflight checks - ensure the tools we shell out to are installed.

use anyhow::{bail, Result};

use crate::diag::{log_debug, warn};

/// Result of probing the external toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolchain {
    pub git: bool,
    pub git_lfs: bool,
}

impl Toolchain {
    /// Probe `PATH` for `git` and `git-lfs`.
    pub fn detect() -> Self {
        let git = which::which("git").is_ok();
        let git_lfs = which::which("git-lfs").is_ok();
        log_debug("preflight", &format!("git={} git-lfs={}", git, git_lfs));
        Self { git, git_lfs }
    }

    /// `git` is required; a missing `git-lfs` only degrades LFS setup.
    pub fn ensure_ready(&self) -> Result<()> {
        if !self.git {
            bail!("git is not installed or not on PATH. Install git and try again.");
        }
        if !self.git_lfs {
            warn("git-lfs not found; large files will be committed without LFS tracking.");
        }
        Ok(())
    }
}

/// Detect and validate the toolchain.
pub fn check() -> Result<Toolchain> {
    let toolchain = Toolchain::detect();
    toolchain.ensure_ready()?;
    Ok(toolchain)
}
