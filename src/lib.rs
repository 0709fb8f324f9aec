pub mod config;
pub mod deploy;
pub mod diag;
pub mod forge;
pub mod git;
pub mod paths;
pub mod preflight;
pub mod prompt;

// Re-export commonly used types
pub use config::Config;
pub use deploy::{DeployOutcome, Deployer, InputPresets};
pub use forge::{ApiResponse, ForgeClient, GitHubClient};
pub use git::{GitRunner, SystemGit};
pub use prompt::{Credential, Prompter, TerminalPrompter};
