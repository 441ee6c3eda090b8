mod crontab;

pub use crontab::{
    CommandBackend, CrontabBackend, CrontabError, FileBackend, FixedIdentity, IdentityProvider,
    MemoryBackend, SystemIdentity, DEFAULT_COMMAND_TIMEOUT,
};
