mod backend;
mod command;
mod errors;
mod file;
mod identity;
mod memory;
mod utils;

pub use backend::CrontabBackend;
pub use command::{CommandBackend, DEFAULT_COMMAND_TIMEOUT};
pub use errors::CrontabError;
pub use file::FileBackend;
pub use identity::{FixedIdentity, IdentityProvider, SystemIdentity};
pub use memory::MemoryBackend;
