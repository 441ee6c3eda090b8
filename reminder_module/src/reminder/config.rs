use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crontab_module::{
    CommandBackend, CrontabBackend, FileBackend, FixedIdentity, IdentityProvider, SystemIdentity,
    DEFAULT_COMMAND_TIMEOUT,
};

use super::types::ReminderError;

#[derive(Debug, Clone)]
pub struct ReminderConfig {
    /// `crontab` executable used for reads and writes.
    pub crontab_bin: PathBuf,
    /// When set, records live in this plain file instead of the system crontab.
    pub crontab_file: Option<PathBuf>,
    pub command_timeout: Duration,
    /// Fixed uid for the session bus path instead of asking `id -u`.
    pub uid_override: Option<u32>,
}

impl ReminderConfig {
    pub fn from_env() -> Result<Self, ReminderError> {
        dotenvy::dotenv().ok();

        let crontab_bin = read_env_trimmed("WATER_REMINDER_CRONTAB_BIN")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("crontab"));
        let crontab_file = read_env_trimmed("WATER_REMINDER_CRONTAB_FILE").map(PathBuf::from);
        let command_timeout = read_env_trimmed("WATER_REMINDER_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|value| *value > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_COMMAND_TIMEOUT);
        let uid_override = match read_env_trimmed("WATER_REMINDER_UID") {
            Some(raw) => Some(raw.parse::<u32>().map_err(|_| {
                ReminderError::Config(format!("WATER_REMINDER_UID must be a number, got {:?}", raw))
            })?),
            None => None,
        };

        Ok(Self {
            crontab_bin,
            crontab_file,
            command_timeout,
            uid_override,
        })
    }

    pub fn backend(&self) -> Box<dyn CrontabBackend> {
        match &self.crontab_file {
            Some(path) => Box::new(FileBackend::new(path)),
            None => Box::new(
                CommandBackend::new(&self.crontab_bin).with_timeout(self.command_timeout),
            ),
        }
    }

    pub fn identity(&self) -> Box<dyn IdentityProvider> {
        match self.uid_override {
            Some(uid) => Box::new(FixedIdentity(uid)),
            None => Box::new(SystemIdentity::new().with_timeout(self.command_timeout)),
        }
    }
}

fn read_env_trimmed(key: &str) -> Option<String> {
    let value = env::var(key).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 4] = [
        "WATER_REMINDER_CRONTAB_BIN",
        "WATER_REMINDER_CRONTAB_FILE",
        "WATER_REMINDER_TIMEOUT_SECS",
        "WATER_REMINDER_UID",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn from_env_uses_defaults() {
        clear_env();
        let config = ReminderConfig::from_env().expect("config");
        assert_eq!(config.crontab_bin, PathBuf::from("crontab"));
        assert!(config.crontab_file.is_none());
        assert_eq!(config.command_timeout, DEFAULT_COMMAND_TIMEOUT);
        assert!(config.uid_override.is_none());
    }

    #[test]
    #[serial]
    fn from_env_reads_overrides() {
        clear_env();
        env::set_var("WATER_REMINDER_CRONTAB_BIN", " /usr/local/bin/crontab ");
        env::set_var("WATER_REMINDER_CRONTAB_FILE", "/tmp/reminders.cron");
        env::set_var("WATER_REMINDER_TIMEOUT_SECS", "5");
        env::set_var("WATER_REMINDER_UID", "1001");

        let config = ReminderConfig::from_env().expect("config");
        clear_env();

        assert_eq!(config.crontab_bin, PathBuf::from("/usr/local/bin/crontab"));
        assert_eq!(config.crontab_file, Some(PathBuf::from("/tmp/reminders.cron")));
        assert_eq!(config.command_timeout, Duration::from_secs(5));
        assert_eq!(config.uid_override, Some(1001));
        assert_eq!(config.identity().uid().expect("uid"), 1001);
    }

    #[test]
    #[serial]
    fn from_env_ignores_non_positive_timeout() {
        clear_env();
        env::set_var("WATER_REMINDER_TIMEOUT_SECS", "0");
        let config = ReminderConfig::from_env().expect("config");
        clear_env();
        assert_eq!(config.command_timeout, DEFAULT_COMMAND_TIMEOUT);
    }

    #[test]
    #[serial]
    fn from_env_rejects_non_numeric_uid() {
        clear_env();
        env::set_var("WATER_REMINDER_UID", "alice");
        let result = ReminderConfig::from_env();
        clear_env();
        assert!(matches!(result, Err(ReminderError::Config(_))));
    }
}
