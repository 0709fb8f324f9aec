//! Input collection: repository name and access token.
//!
//! The token never echoes on a terminal. When stdin is not a terminal the
//! values are read as plain lines so the tool can be scripted.

use anyhow::{bail, Context, Result};
use console::Term;
use std::fmt;
use std::io::{self, BufRead};
use zeroize::Zeroizing;

use crate::diag::log_debug;

/// Environment variable supplying the token for headless runs.
pub const TOKEN_ENV_VAR: &str = "MODEL_DEPLOY_TOKEN";

/// Secret access token. Zeroed on drop, never printed.
#[derive(Clone)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    /// Wrap a raw token, trimming surrounding whitespace.
    ///
    /// Returns `None` when nothing is left after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(Zeroizing::new(trimmed.to_string())))
        }
    }

    /// The token itself. Only pass this to headers and remote URLs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Source of interactive input.
pub trait Prompter {
    /// Read one visible line after showing `prompt`.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Read one line without echoing it.
    fn read_secret(&mut self, prompt: &str) -> Result<String>;
}

/// Prompter backed by the process terminal.
pub struct TerminalPrompter {
    term: Term,
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            interactive: atty::is(atty::Stream::Stdin),
        }
    }

    fn show(&self, prompt: &str) -> Result<()> {
        self.term.write_str(prompt)?;
        self.term.flush()?;
        Ok(())
    }

    fn read_stdin_line() -> Result<String> {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        Ok(line)
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.show(prompt)?;
        if self.interactive {
            Ok(self.term.read_line()?)
        } else {
            Self::read_stdin_line()
        }
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        self.show(prompt)?;
        if self.interactive {
            Ok(self.term.read_secure_line()?)
        } else {
            Self::read_stdin_line()
        }
    }
}

/// Validated user input for one deployment.
#[derive(Debug)]
pub struct DeployInputs {
    pub repo_name: String,
    pub credential: Credential,
}

/// Collect the repository name and token.
///
/// `preset_name` skips the name prompt and `preset_token` skips the token
/// prompt; both are validated exactly like typed input.
pub fn collect_inputs(
    prompter: &mut dyn Prompter,
    preset_name: Option<&str>,
    preset_token: Option<&str>,
) -> Result<DeployInputs> {
    let raw_name = match preset_name {
        Some(name) => name.to_string(),
        None => prompter.read_line("Enter new repository name: ")?,
    };
    let repo_name = raw_name.trim().to_string();
    if repo_name.is_empty() {
        bail!("Repository name cannot be empty.");
    }

    let raw_token = match preset_token {
        Some(token) => {
            log_debug("prompt", &format!("token from {}", TOKEN_ENV_VAR));
            Zeroizing::new(token.to_string())
        }
        None => Zeroizing::new(prompter.read_secret("Paste GitHub Token (will be invisible): ")?),
    };
    let Some(credential) = Credential::new(&raw_token) else {
        bail!("Token is required.");
    };

    Ok(DeployInputs {
        repo_name,
        credential,
    })
}

/// Scripted prompter for tests: answers are consumed in order.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    pub struct ScriptedPrompter {
        pub lines: VecDeque<String>,
        pub secrets: VecDeque<String>,
        pub prompts: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn new(line: &str, secret: &str) -> Self {
            Self {
                lines: VecDeque::from([line.to_string()]),
                secrets: VecDeque::from([secret.to_string()]),
                prompts: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn read_line(&mut self, prompt: &str) -> Result<String> {
            self.prompts.push(prompt.to_string());
            self.lines
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no scripted line"))
        }

        fn read_secret(&mut self, prompt: &str) -> Result<String> {
            self.prompts.push(prompt.to_string());
            self.secrets
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no scripted secret"))
        }
    }
}
