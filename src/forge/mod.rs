//! Forge access: talk to the repository-hosting REST API.
//!
//! "Do X": Create a repository (or find the existing one) and report its clone URL.
//!
//! # Design
//!
//! - **ForgeClient**: single-shot authenticated JSON request/response. Never
//!   errors; transport failures come back as an [`ApiResponse`] with no status.
//! - **resolver**: interprets status codes into a [`RepositoryDescriptor`].
//!
//! # Example
//!
//! ```ignore
//! use model_deploy::forge::{resolve_repository, GitHubClient};
//!
//! let client = GitHubClient::new(&config)?;
//! let repo = resolve_repository(&client, &config, "models", &credential)?;
//! println!("{}", repo.clone_url);
//! ```

pub mod github;
mod resolver;

pub use github::GitHubClient;
pub use resolver::{resolve_repository, RepositoryDescriptor};

use serde_json::Value;
use std::fmt;

use crate::prompt::Credential;

/// HTTP verbs used against the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// Status and decoded body of one API exchange.
///
/// `status` is `None` when the request never completed (DNS, refused, TLS).
/// `body` is `None` whenever the payload was missing or not JSON, for any status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    pub status: Option<u16>,
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Sentinel for a failed transport exchange.
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self {
            status: Some(status),
            body,
        }
    }

    /// 2xx status received.
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(code) if (200..300).contains(&code))
    }

    /// String field of the top-level JSON object, if present.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.body.as_ref()?.get(key)?.as_str()
    }

    /// Human-readable status for diagnostics.
    pub fn status_label(&self) -> String {
        match self.status {
            Some(code) => code.to_string(),
            None => "no response".to_string(),
        }
    }

    /// Human-readable body for diagnostics.
    pub fn body_label(&self) -> String {
        match &self.body {
            Some(body) => body.to_string(),
            None => "no body".to_string(),
        }
    }
}

/// Authenticated JSON request against the forge API.
///
/// Implementations attach the token, the versioned `Accept` media type, and a
/// fixed `User-Agent` to every request.
pub trait ForgeClient {
    fn request(
        &self,
        method: Method,
        url: &str,
        credential: &Credential,
        body: Option<&Value>,
    ) -> ApiResponse;
}
