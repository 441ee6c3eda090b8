use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use super::backend::CrontabBackend;
use super::errors::CrontabError;

/// Keeps the crontab text in a plain file instead of the system scheduler.
///
/// Writes go to a sibling temp file that is renamed over the target, so readers only
/// ever see the old or the new content.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CrontabBackend for FileBackend {
    fn read(&self) -> Result<String, CrontabError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(CrontabError::FileMissing {
                path: self.path.clone(),
            }),
            Err(err) => Err(CrontabError::Io(err)),
        }
    }

    fn write(&mut self, text: &str) -> Result<(), CrontabError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|err| CrontabError::Io(err.error))?;
        Ok(())
    }
}
