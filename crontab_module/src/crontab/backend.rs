use super::errors::CrontabError;

/// Whole-file access to the current user's crontab.
///
/// `read` returns the complete text or an error when no crontab is installed or the
/// mechanism is unavailable. `write` replaces the complete text; there is no merge.
pub trait CrontabBackend {
    fn read(&self) -> Result<String, CrontabError>;

    fn write(&mut self, text: &str) -> Result<(), CrontabError>;
}

impl<T: CrontabBackend + ?Sized> CrontabBackend for Box<T> {
    fn read(&self) -> Result<String, CrontabError> {
        (**self).read()
    }

    fn write(&mut self, text: &str) -> Result<(), CrontabError> {
        (**self).write(text)
    }
}
