use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CrontabError {
    Io(io::Error),
    CommandNotFound {
        command: String,
    },
    CommandFailed {
        command: String,
        status: Option<i32>,
        output: String,
    },
    CommandTimeout {
        command: String,
        timeout_secs: u64,
        output: String,
    },
    InvalidIdentity {
        output: String,
    },
    FileMissing {
        path: PathBuf,
    },
}

impl fmt::Display for CrontabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrontabError::Io(err) => write!(f, "I/O error: {}", err),
            CrontabError::CommandNotFound { command } => {
                write!(f, "Command not found on PATH: {}", command)
            }
            CrontabError::CommandFailed {
                command,
                status,
                output,
            } => write!(
                f,
                "{} failed (status: {:?}). Output tail:\n{}",
                command, status, output
            ),
            CrontabError::CommandTimeout {
                command,
                timeout_secs,
                output,
            } => write!(
                f,
                "{} timed out after {}s. Output tail:\n{}",
                command, timeout_secs, output
            ),
            CrontabError::InvalidIdentity { output } => {
                write!(f, "Could not read a numeric user id from: {:?}", output)
            }
            CrontabError::FileMissing { path } => {
                write!(f, "Crontab file does not exist: {}", path.display())
            }
        }
    }
}

impl std::error::Error for CrontabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CrontabError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CrontabError {
    fn from(err: io::Error) -> Self {
        CrontabError::Io(err)
    }
}
