//! GitHub ForgeClient implementation.
//!
//! "Do X": Send authenticated JSON requests to the GitHub REST API.
//!
//! Uses a blocking `reqwest` client. All HTTP details live in internal.rs.

mod internal;

use anyhow::Result;
use serde_json::Value;

use super::{ApiResponse, ForgeClient, Method};
use crate::config::Config;
use crate::prompt::Credential;

/// Versioned JSON media type sent as `Accept`.
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// GitHub implementation of ForgeClient.
pub struct GitHubClient {
    http: reqwest::blocking::Client,
}

impl GitHubClient {
    /// Build a client using the configured `User-Agent` and timeout.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: internal::build_http_client(config)?,
        })
    }
}

impl ForgeClient for GitHubClient {
    fn request(
        &self,
        method: Method,
        url: &str,
        credential: &Credential,
        body: Option<&Value>,
    ) -> ApiResponse {
        internal::send(&self.http, method, url, credential, body)
    }
}
