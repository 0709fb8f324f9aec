//! Internal implementation for the GitHub ForgeClient.
//!
//! Contains reqwest setup and response decoding.
//! Not exposed in public interface.

use anyhow::{Context, Result};
use colored::Colorize;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;

use super::ACCEPT_MEDIA_TYPE;
use crate::config::Config;
use crate::diag::log_debug;
use crate::forge::{ApiResponse, Method};
use crate::prompt::Credential;

/// Build the blocking HTTP client.
///
/// reqwest's blocking client defaults to a 30s timeout; an unset
/// `timeout_secs` turns that off so calls block until the server answers.
pub(crate) fn build_http_client(config: &Config) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .build()
        .context("Failed to create HTTP client")
}

/// Perform one request. Transport failures print a diagnostic and yield
/// [`ApiResponse::unreachable`].
pub(crate) fn send(
    http: &Client,
    method: Method,
    url: &str,
    credential: &Credential,
    body: Option<&Value>,
) -> ApiResponse {
    log_debug("forge::github", &format!("{} {}", method, url));

    let request = authorize(builder(http, method, url), credential);
    let request = match body {
        Some(body) => request.json(body),
        None => request,
    };

    let response = match request.send() {
        Ok(response) => response,
        Err(e) => {
            eprintln!("{} Network error: {}", "❌".red(), e.without_url());
            return ApiResponse::unreachable();
        }
    };

    let status = response.status().as_u16();
    let body = match response.text() {
        Ok(text) => decode_body(&text),
        Err(e) => {
            log_debug("forge::github", &format!("failed to read body: {}", e));
            None
        }
    };
    log_debug("forge::github", &format!("-> {} (body: {})", status, body.is_some()));

    ApiResponse::new(status, body)
}

fn builder(http: &Client, method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => http.get(url),
        Method::Post => http.post(url),
    }
}

fn authorize(request: RequestBuilder, credential: &Credential) -> RequestBuilder {
    request
        .header(AUTHORIZATION, format!("token {}", credential.expose()))
        .header(ACCEPT, ACCEPT_MEDIA_TYPE)
}

/// Parse a response body; anything that is not JSON becomes `None`.
pub(crate) fn decode_body(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}
