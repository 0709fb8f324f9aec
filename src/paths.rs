//! Filesystem layout for model-deploy.
//!
//! This module defines WHERE things live. No I/O, no validation.
//!
//! ```text
//! ~/.model-deploy/
//! └── config.toml              # Optional user config
//!
//! <publish dir>/
//! ├── .git/                    # Created by `git init` when missing
//! └── .gitattributes           # Written by `git lfs track`
//! ```

use std::path::{Path, PathBuf};

/// User's model-deploy home directory: `~/.model-deploy/`
pub fn home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".model-deploy")
}

/// User config file: `~/.model-deploy/config.toml`
pub fn config_path() -> PathBuf {
    home().join("config.toml")
}

/// Git metadata directory inside a publish directory: `<dir>/.git`
pub fn git_dir(workdir: &Path) -> PathBuf {
    workdir.join(".git")
}
