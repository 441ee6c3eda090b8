use std::io;

use super::backend::CrontabBackend;
use super::errors::CrontabError;

/// In-process crontab, used by tests and dry runs.
///
/// `None` content behaves like a user with no crontab installed: reads fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    content: Option<String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryBackend {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            ..Self::default()
        }
    }

    /// Makes every subsequent write fail, leaving the content untouched.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl CrontabBackend for MemoryBackend {
    fn read(&self) -> Result<String, CrontabError> {
        self.content
            .clone()
            .ok_or_else(|| CrontabError::CommandFailed {
                command: "memory -l".to_string(),
                status: Some(1),
                output: "no crontab for user".to_string(),
            })
    }

    fn write(&mut self, text: &str) -> Result<(), CrontabError> {
        if self.fail_writes {
            return Err(CrontabError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "writes disabled",
            )));
        }
        self.content = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}
