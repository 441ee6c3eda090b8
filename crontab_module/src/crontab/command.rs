use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use super::backend::CrontabBackend;
use super::errors::CrontabError;
use super::utils::{combined_output, run_command_with_timeout};

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Talks to the system scheduler through the `crontab` CLI.
///
/// Reads run `crontab -l`; writes run `crontab -` with the replacement text on stdin.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: PathBuf,
    timeout: Duration,
}

impl CommandBackend {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn label(&self, arg: &str) -> String {
        format!("{} {}", self.program.display(), arg)
    }
}

impl Default for CommandBackend {
    fn default() -> Self {
        Self::new("crontab")
    }
}

impl CrontabBackend for CommandBackend {
    fn read(&self) -> Result<String, CrontabError> {
        let label = self.label("-l");
        let mut cmd = Command::new(&self.program);
        cmd.arg("-l");
        let output = run_command_with_timeout(cmd, None, self.timeout, &label)?;
        if !output.status.success() {
            return Err(CrontabError::CommandFailed {
                command: label,
                status: output.status.code(),
                output: combined_output(&output),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn write(&mut self, text: &str) -> Result<(), CrontabError> {
        let label = self.label("-");
        let mut cmd = Command::new(&self.program);
        cmd.arg("-");
        let output = run_command_with_timeout(cmd, Some(text), self.timeout, &label)?;
        if !output.status.success() {
            return Err(CrontabError::CommandFailed {
                command: label,
                status: output.status.code(),
                output: combined_output(&output),
            });
        }
        Ok(())
    }
}
