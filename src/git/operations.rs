//! Publishing steps built on [`GitRunner`].
//!
//! Two kinds of step live here:
//! - best-effort: a failure prints a warning (or nothing) and the run continues
//! - outcome-bearing: the push, whose result decides success

use anyhow::{bail, Result};

use super::{display_args, GitRunner};
use crate::diag::{log_debug, redact_url, warn};
use crate::paths;
use crate::prompt::Credential;

/// Commit message for every deployment.
pub const COMMIT_MESSAGE: &str = "Auto-deployed AI model";

/// Weight and checkpoint formats tracked through Git LFS.
pub const LFS_PATTERNS: [&str; 7] = [
    "*.bin", "*.pt", "*.h5", "*.onnx", "*.weights", "*.pkl", "*.tflite",
];

/// Branch pushed first.
pub const PRIMARY_BRANCH: &str = "main";
/// Branch pushed when the primary push fails.
pub const FALLBACK_BRANCH: &str = "master";

const REMOTE: &str = "origin";

/// Clone URL with the token as userinfo: `scheme://TOKEN@host/path`.
pub fn authenticated_url(clone_url: &str, credential: &Credential) -> Result<String> {
    let Some(split) = clone_url.find("://") else {
        bail!("Clone URL has no scheme: {}", clone_url);
    };
    let (scheme, rest) = clone_url.split_at(split + 3);
    Ok(format!("{}{}@{}", scheme, credential.expose(), rest))
}

/// Run `git init` unless the working directory already has `.git`.
pub fn ensure_initialized(git: &dyn GitRunner) {
    if paths::git_dir(git.workdir()).exists() {
        log_debug("git", "existing repository, skipping init");
        return;
    }
    best_effort(git, &["init"], "git init failed; continuing anyway.");
}

/// Point `origin` at the authenticated URL, replacing any previous `origin`.
pub fn configure_origin(
    git: &dyn GitRunner,
    clone_url: &str,
    credential: &Credential,
) -> Result<()> {
    let auth_url = authenticated_url(clone_url, credential)?;

    // Fails on a fresh repository; that is expected
    quiet(git, &["remote", "remove", REMOTE]);

    log_debug("git", &format!("origin -> {}", redact_url(&auth_url)));
    best_effort(
        git,
        &["remote", "add", REMOTE, &auth_url],
        "Could not add the 'origin' remote; the push will likely fail.",
    );
    Ok(())
}

/// Install LFS hooks for this repository and track [`LFS_PATTERNS`].
pub fn configure_lfs(git: &dyn GitRunner) {
    best_effort(
        git,
        &["lfs", "install", "--local"],
        "git lfs install failed; large files may not use LFS.",
    );

    let mut args = vec!["lfs", "track"];
    args.extend(LFS_PATTERNS);
    best_effort(
        git,
        &args,
        "git lfs track failed; large files may not use LFS.",
    );
}

/// Stage everything and commit with [`COMMIT_MESSAGE`].
pub fn stage_and_commit(git: &dyn GitRunner) {
    best_effort(git, &["add", "."], "git add failed; some files may be missing.");
    best_effort(
        git,
        &["commit", "-m", COMMIT_MESSAGE],
        "git commit made no new commit (nothing to commit?).",
    );
}

/// Push to [`PRIMARY_BRANCH`], then [`FALLBACK_BRANCH`].
///
/// Returns the branch that accepted the push, or `None` if both failed.
pub fn push_with_fallback(git: &dyn GitRunner) -> Option<&'static str> {
    [PRIMARY_BRANCH, FALLBACK_BRANCH]
        .into_iter()
        .find(|&branch| {
            let pushed = git.run(&["push", "-u", REMOTE, branch]).is_some();
            log_debug("git", &format!("push {} -> {}", branch, pushed));
            pushed
        })
}

/// Failure is reported to the user but never stops the run.
fn best_effort(git: &dyn GitRunner, args: &[&str], warning: &str) {
    if git.run(args).is_none() {
        warn(warning);
    }
}

/// Failure is expected in normal operation and not reported.
fn quiet(git: &dyn GitRunner, args: &[&str]) {
    if git.run(args).is_none() {
        log_debug("git", &format!("ignored failure: git {}", display_args(args)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::RecordingGit;

    fn credential() -> Credential {
        Credential::new("tok123").unwrap()
    }

    #[test]
    fn test_authenticated_url() {
        let url = authenticated_url("https://github.com/alice/models.git", &credential()).unwrap();
        assert_eq!(url, "https://tok123@github.com/alice/models.git");
    }

    #[test]
    fn test_authenticated_url_other_scheme() {
        let url = authenticated_url("http://git.local/a/b.git", &credential()).unwrap();
        assert_eq!(url, "http://tok123@git.local/a/b.git");
    }

    #[test]
    fn test_authenticated_url_requires_scheme() {
        assert!(authenticated_url("github.com/alice/models.git", &credential()).is_err());
    }

    #[test]
    fn test_init_runs_without_git_dir() {
        let dir = tempfile::tempdir().unwrap();
        let git = RecordingGit::new(dir.path());
        ensure_initialized(&git);
        assert_eq!(git.calls(), vec![vec!["init".to_string()]]);
    }

    #[test]
    fn test_init_skipped_with_git_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let git = RecordingGit::new(dir.path());
        ensure_initialized(&git);
        assert!(git.calls().is_empty());
    }

    #[test]
    fn test_init_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let git = RecordingGit::new(dir.path()).failing(&["init"]);
        ensure_initialized(&git);
        assert!(git.ran(&["init"]));
    }

    #[test]
    fn test_origin_replaced_with_authenticated_url() {
        let git = RecordingGit::new("/unused").failing(&["remote", "remove"]);
        configure_origin(&git, "https://github.com/alice/models.git", &credential()).unwrap();

        let calls = git.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ["remote", "remove", "origin"]);
        assert_eq!(
            calls[1],
            ["remote", "add", "origin", "https://tok123@github.com/alice/models.git"]
        );
    }

    #[test]
    fn test_lfs_tracks_exact_patterns() {
        let git = RecordingGit::new("/unused");
        configure_lfs(&git);

        let calls = git.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ["lfs", "install", "--local"]);
        assert_eq!(&calls[1][..2], ["lfs", "track"]);
        assert_eq!(
            &calls[1][2..],
            ["*.bin", "*.pt", "*.h5", "*.onnx", "*.weights", "*.pkl", "*.tflite"]
        );
    }

    #[test]
    fn test_lfs_failures_are_not_fatal() {
        let git = RecordingGit::new("/unused").failing(&["lfs"]);
        configure_lfs(&git);
        assert_eq!(git.calls().len(), 2);
    }

    #[test]
    fn test_commit_uses_fixed_message() {
        let git = RecordingGit::new("/unused");
        stage_and_commit(&git);
        assert!(git.ran(&["add", "."]));
        assert!(git.ran(&["commit", "-m", "Auto-deployed AI model"]));
    }

    #[test]
    fn test_push_main_first() {
        let git = RecordingGit::new("/unused");
        assert_eq!(push_with_fallback(&git), Some("main"));
        assert!(!git.ran(&["push", "-u", "origin", "master"]));
    }

    #[test]
    fn test_push_falls_back_to_master() {
        let git = RecordingGit::new("/unused").failing(&["push", "-u", "origin", "main"]);
        assert_eq!(push_with_fallback(&git), Some("master"));
        assert!(git.ran(&["push", "-u", "origin", "main"]));
        assert!(git.ran(&["push", "-u", "origin", "master"]));
    }

    #[test]
    fn test_push_both_fail() {
        let git = RecordingGit::new("/unused").failing(&["push"]);
        assert_eq!(push_with_fallback(&git), None);
        assert_eq!(git.calls().len(), 2);
    }
}
