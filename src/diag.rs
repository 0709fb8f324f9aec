//! Diagnostics: debug logging and credential redaction.
//!
//! Debug output is opt-in via `MODEL_DEPLOY_LOG` and always goes to stderr.

use colored::Colorize;

/// Environment variable enabling debug output.
pub const LOG_ENV_VAR: &str = "MODEL_DEPLOY_LOG";

/// Whether debug logging is enabled for this process.
pub fn debug_enabled() -> bool {
    std::env::var_os(LOG_ENV_VAR).is_some()
}

/// Debug line for `scope`, printed only when `MODEL_DEPLOY_LOG` is set.
pub fn log_debug(scope: &str, msg: &str) {
    if debug_enabled() {
        eprintln!("[DEBUG {}] {}", scope, msg);
    }
}

/// Non-fatal problem the user should know about.
pub fn warn(msg: &str) {
    eprintln!("{}  {}", "⚠️".yellow(), msg);
}

/// Hide userinfo in a URL: `https://tok@host/p` -> `https://***@host/p`.
///
/// URLs without userinfo are returned unchanged.
pub fn redact_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let rest = &url[scheme_end + 3..];
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}://***{}", &url[..scheme_end], &rest[at..]),
        None => url.to_string(),
    }
}
