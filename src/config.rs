//! Configuration for model-deploy.
//!
//! Resolution order (later wins):
//! 1. Built-in defaults
//! 2. `~/.model-deploy/config.toml` (or `--config <path>`)
//! 3. `MODEL_DEPLOY_API_URL` / `MODEL_DEPLOY_TIMEOUT_SECS`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::diag::log_debug;
use crate::paths;

/// Environment override for the REST API base URL.
pub const API_URL_ENV_VAR: &str = "MODEL_DEPLOY_API_URL";
/// Environment override for the HTTP timeout in seconds.
pub const TIMEOUT_ENV_VAR: &str = "MODEL_DEPLOY_TIMEOUT_SECS";

/// Runtime configuration. All keys are optional in the TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// REST API base, without trailing slash
    pub api_url: String,
    /// Web host used to build clone URLs for existing repositories
    pub web_url: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// HTTP timeout; unset blocks indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            web_url: "https://github.com".to_string(),
            user_agent: format!("model-deploy/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from `explicit` (must exist) or the default path
    /// (optional). Environment overrides are applied separately with
    /// [`Config::apply_process_env`].
    pub fn load_file(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = paths::config_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    log_debug("config", "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply `MODEL_DEPLOY_*` overrides from the process environment.
    pub fn apply_process_env(&mut self) -> Result<()> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Parse a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log_debug("config", &format!("loaded {}", path.display()));
        Ok(config)
    }

    /// Parse TOML text, normalizing URLs.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.normalize();
        Ok(config)
    }

    /// Apply environment overrides through `lookup` (injectable for tests).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(API_URL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            log_debug("config", &format!("api_url from {}", API_URL_ENV_VAR));
            self.api_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            let secs = raw.trim().parse::<u64>().with_context(|| {
                format!("{} must be a whole number of seconds", TIMEOUT_ENV_VAR)
            })?;
            self.timeout_secs = Some(secs);
        }

        self.normalize();
        Ok(())
    }

    /// HTTP timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// `POST` target for repository creation.
    pub fn create_repo_endpoint(&self) -> String {
        format!("{}/user/repos", self.api_url)
    }

    /// `GET` target for the authenticated account.
    pub fn current_user_endpoint(&self) -> String {
        format!("{}/user", self.api_url)
    }

    /// Clone URL of `login/repo` on the web host.
    pub fn clone_url_for(&self, login: &str, repo: &str) -> String {
        format!("{}/{}/{}.git", self.web_url, login, repo)
    }

    fn normalize(&mut self) {
        while self.api_url.ends_with('/') {
            self.api_url.pop();
        }
        while self.web_url.ends_with('/') {
            self.web_url.pop();
        }
    }
}
