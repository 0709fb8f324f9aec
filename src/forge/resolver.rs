//! Repository resolution: turn the creation call's status into a clone URL.
//!
//! - `201` -> new repository, `clone_url` from the response
//! - `422` -> name already taken, look up the account login and derive the URL
//! - anything else -> fatal

use anyhow::{bail, Result};
use serde_json::json;

use super::{ApiResponse, ForgeClient, Method};
use crate::config::Config;
use crate::diag::log_debug;
use crate::prompt::Credential;

const CREATED: u16 = 201;
const UNPROCESSABLE: u16 = 422;

/// What the rest of the pipeline needs to know about the remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDescriptor {
    /// HTTPS clone URL, without credentials
    pub clone_url: String,
    /// Account login, known only when an existing repository was resolved
    pub owner: Option<String>,
    /// Whether this run created the repository
    pub created: bool,
}

/// Create `repo_name` under the authenticated account, or connect to the
/// existing repository of that name.
pub fn resolve_repository(
    client: &dyn ForgeClient,
    config: &Config,
    repo_name: &str,
    credential: &Credential,
) -> Result<RepositoryDescriptor> {
    let payload = json!({ "name": repo_name, "private": false });
    let response = client.request(
        Method::Post,
        &config.create_repo_endpoint(),
        credential,
        Some(&payload),
    );
    log_debug("forge::resolver", &format!("create -> {}", response.status_label()));

    match response.status {
        Some(CREATED) => {
            let Some(clone_url) = response.str_field("clone_url") else {
                bail!(
                    "Repository created but the response had no clone_url: {}",
                    response.body_label()
                );
            };
            println!("✅ Success! Repository created.");
            Ok(RepositoryDescriptor {
                clone_url: clone_url.to_string(),
                owner: None,
                created: true,
            })
        }
        Some(UNPROCESSABLE) => {
            println!("⚠️  Repository already exists. Connecting to existing one...");
            let login = lookup_login(client, config, credential)?;
            Ok(RepositoryDescriptor {
                clone_url: config.clone_url_for(&login, repo_name),
                owner: Some(login),
                created: false,
            })
        }
        _ => bail!(
            "API Error {}: {}",
            response.status_label(),
            response.body_label()
        ),
    }
}

/// Login of the authenticated account. Never returns an empty string.
fn lookup_login(
    client: &dyn ForgeClient,
    config: &Config,
    credential: &Credential,
) -> Result<String> {
    let response = client.request(
        Method::Get,
        &config.current_user_endpoint(),
        credential,
        None,
    );
    login_from(&response)
}

fn login_from(response: &ApiResponse) -> Result<String> {
    if !response.is_success() {
        bail!(
            "Repository exists but looking up your account failed ({}): {}",
            response.status_label(),
            response.body_label()
        );
    }
    match response.str_field("login").map(str::trim) {
        Some(login) if !login.is_empty() => Ok(login.to_string()),
        _ => bail!(
            "Repository exists but the account lookup returned no login: {}",
            response.body_label()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::testing::CannedForge;

    fn credential() -> Credential {
        Credential::new("tok123").unwrap()
    }

    fn resolve(forge: &CannedForge, name: &str) -> Result<RepositoryDescriptor> {
        resolve_repository(forge, &Config::default(), name, &credential())
    }

    #[test]
    fn test_created_uses_clone_url_verbatim() {
        let forge = CannedForge::new(vec![ApiResponse::new(
            201,
            Some(json!({"clone_url": "https://github.com/alice/models.git", "id": 1})),
        )]);

        let repo = resolve(&forge, "models").unwrap();
        assert_eq!(repo.clone_url, "https://github.com/alice/models.git");
        assert!(repo.created);
        assert_eq!(forge.request_count(), 1);

        let requests = forge.requests.borrow();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "https://api.github.com/user/repos");
        assert_eq!(requests[0].token, "tok123");
        assert_eq!(requests[0].body, Some(json!({"name": "models", "private": false})));
    }

    #[test]
    fn test_created_without_clone_url_fails() {
        let forge = CannedForge::new(vec![ApiResponse::new(201, None)]);
        let err = resolve(&forge, "models").unwrap_err();
        assert!(err.to_string().contains("no clone_url"));
    }

    #[test]
    fn test_existing_repo_derives_url_from_login() {
        let forge = CannedForge::new(vec![
            ApiResponse::new(422, Some(json!({"message": "Repository creation failed."}))),
            ApiResponse::new(200, Some(json!({"login": "alice"}))),
        ]);

        let repo = resolve(&forge, "models").unwrap();
        assert_eq!(repo.clone_url, "https://github.com/alice/models.git");
        assert_eq!(repo.owner.as_deref(), Some("alice"));
        assert!(!repo.created);

        let requests = forge.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, Method::Get);
        assert_eq!(requests[1].url, "https://api.github.com/user");
        assert_eq!(requests[1].body, None);
    }

    #[test]
    fn test_existing_repo_with_body_less_422() {
        let forge = CannedForge::new(vec![
            ApiResponse::new(422, None),
            ApiResponse::new(200, Some(json!({"login": "bob"}))),
        ]);
        let repo = resolve(&forge, "weights").unwrap();
        assert_eq!(repo.clone_url, "https://github.com/bob/weights.git");
    }

    #[test]
    fn test_login_lookup_failures_are_fatal() {
        let failures = [
            ApiResponse::unreachable(),
            ApiResponse::new(401, Some(json!({"message": "Bad credentials"}))),
            ApiResponse::new(200, None),
            ApiResponse::new(200, Some(json!({"id": 5}))),
            ApiResponse::new(200, Some(json!({"login": ""}))),
        ];
        for lookup in failures {
            let forge = CannedForge::new(vec![ApiResponse::new(422, None), lookup.clone()]);
            let result = resolve(&forge, "models");
            assert!(result.is_err(), "lookup {:?} should abort", lookup);
        }
    }

    #[test]
    fn test_other_statuses_are_fatal() {
        for status in [200, 400, 401, 403, 404, 500, 502] {
            let forge = CannedForge::new(vec![ApiResponse::new(
                status,
                Some(json!({"message": "nope"})),
            )]);
            let err = resolve(&forge, "models").unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains(&format!("API Error {}", status)), "{}", msg);
            assert!(msg.contains("nope"));
            assert_eq!(forge.request_count(), 1);
        }
    }

    #[test]
    fn test_unreachable_api_is_fatal() {
        let forge = CannedForge::new(vec![]);
        let err = resolve(&forge, "models").unwrap_err();
        assert_eq!(err.to_string(), "API Error no response: no body");
    }
}
