use std::process::Command;
use std::time::Duration;

use super::command::DEFAULT_COMMAND_TIMEOUT;
use super::errors::CrontabError;
use super::utils::{combined_output, run_command_with_timeout};

/// Source of the numeric user id embedded in the session bus path.
pub trait IdentityProvider {
    fn uid(&self) -> Result<u32, CrontabError>;
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for Box<T> {
    fn uid(&self) -> Result<u32, CrontabError> {
        (**self).uid()
    }
}

/// Asks the system for the invoking user's id via `id -u`.
#[derive(Debug, Clone)]
pub struct SystemIdentity {
    timeout: Duration,
}

impl SystemIdentity {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SystemIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for SystemIdentity {
    fn uid(&self) -> Result<u32, CrontabError> {
        let mut cmd = Command::new("id");
        cmd.arg("-u");
        let output = run_command_with_timeout(cmd, None, self.timeout, "id -u")?;
        if !output.status.success() {
            return Err(CrontabError::CommandFailed {
                command: "id -u".to_string(),
                status: output.status.code(),
                output: combined_output(&output),
            });
        }
        parse_uid(&String::from_utf8_lossy(&output.stdout))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIdentity(pub u32);

impl IdentityProvider for FixedIdentity {
    fn uid(&self) -> Result<u32, CrontabError> {
        Ok(self.0)
    }
}

fn parse_uid(raw: &str) -> Result<u32, CrontabError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| CrontabError::InvalidIdentity {
            output: trimmed.to_string(),
        })
}
