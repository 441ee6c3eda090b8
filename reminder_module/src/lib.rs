mod reminder;

pub use crontab_module::{
    CommandBackend, CrontabBackend, CrontabError, FileBackend, FixedIdentity, IdentityProvider,
    MemoryBackend, SystemIdentity,
};
pub use reminder::{
    extract_message, hour_field, minute_field, parse_time_of_day, schedule_line, tag_line,
    IdSource, Interval, RandomIds, Record, RecordCodec, RecordIter, RecordRef, RecordSet,
    Reminder, ReminderConfig, ReminderError, ScheduleStore, ID_LEN, RECORD_MARKER,
};
