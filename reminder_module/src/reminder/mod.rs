mod codec;
mod config;
mod ids;
mod scan;
mod store;
mod types;

pub use codec::{extract_message, hour_field, minute_field, schedule_line, tag_line, RecordCodec};
pub use config::ReminderConfig;
pub use ids::{IdSource, RandomIds, ID_LEN};
pub use store::{RecordIter, RecordRef, RecordSet, ScheduleStore};
pub use types::{parse_time_of_day, Interval, Record, Reminder, ReminderError, RECORD_MARKER};
