use chrono::Timelike;

use crontab_module::IdentityProvider;

use super::types::{Interval, Record, Reminder, ReminderError, RECORD_MARKER};

const NOTIFY_COMMAND: &str = "notify-send";

/// Minute field of the schedule line.
///
/// A 30 minute interval starting on the hour is written as the fixed `0,30`; every other
/// combination becomes a step range from the start minute to the end of the hour.
pub fn minute_field(interval: Interval, start_minute: u32) -> String {
    if interval == Interval::ThirtyMinutes && start_minute == 0 {
        "0,30".to_string()
    } else {
        format!("{}-59/{}", start_minute, interval.minutes())
    }
}

/// Literal `start-end` hour range. An end hour before the start hour is kept as is,
/// which cron treats as a range that never matches.
pub fn hour_field(start_hour: u32, end_hour: u32) -> String {
    format!("{}-{}", start_hour, end_hour)
}

pub fn tag_line(id: &str) -> String {
    format!("# {} | id={}", RECORD_MARKER, id)
}

pub fn schedule_line(reminder: &Reminder, uid: u32) -> String {
    let start = reminder.start();
    format!(
        "{} {} * * {} DISPLAY=:0 DBUS_SESSION_BUS_ADDRESS=unix:path=/run/user/{}/bus {} \"{}\"",
        minute_field(reminder.interval(), start.minute()),
        hour_field(start.hour(), reminder.end().hour()),
        reminder.days(),
        uid,
        NOTIFY_COMMAND,
        reminder.message(),
    )
}

/// Recovers the notification text from a schedule line built by [`schedule_line`].
pub fn extract_message(schedule_line: &str) -> Option<String> {
    let needle = format!("{} \"", NOTIFY_COMMAND);
    let start = schedule_line.find(&needle)? + needle.len();
    let rest = schedule_line[start..].trim_end();
    let message = rest.strip_suffix('"')?;
    Some(message.to_string())
}

/// Builds records for reminders, looking up the user id at encode time.
#[derive(Debug, Clone)]
pub struct RecordCodec<I: IdentityProvider> {
    identity: I,
}

impl<I: IdentityProvider> RecordCodec<I> {
    pub fn new(identity: I) -> Self {
        Self { identity }
    }

    pub fn encode(&self, reminder: &Reminder, id: &str) -> Result<Record, ReminderError> {
        let uid = self.identity.uid()?;
        Ok(Record {
            id: id.to_string(),
            schedule_line: schedule_line(reminder, uid),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use crontab_module::FixedIdentity;

    fn reminder(start: (u32, u32), end: (u32, u32), interval: Interval, days: &str) -> Reminder {
        Reminder::new(
            "Drink water 💧",
            NaiveTime::from_hms_opt(start.0, start.1, 0).expect("start"),
            NaiveTime::from_hms_opt(end.0, end.1, 0).expect("end"),
            interval,
            days,
        )
        .expect("reminder")
    }

    #[test]
    fn minute_field_half_hour_on_the_hour_is_fixed() {
        assert_eq!(minute_field(Interval::ThirtyMinutes, 0), "0,30");
    }

    #[test]
    fn minute_field_other_combinations_use_step_ranges() {
        assert_eq!(minute_field(Interval::FortyFiveMinutes, 0), "0-59/45");
        assert_eq!(minute_field(Interval::ThirtyMinutes, 15), "15-59/30");
        assert_eq!(minute_field(Interval::SixtyMinutes, 0), "0-59/60");
        assert_eq!(minute_field(Interval::SixtyMinutes, 5), "5-59/60");
    }

    #[test]
    fn hour_field_keeps_inverted_ranges() {
        assert_eq!(hour_field(10, 19), "10-19");
        assert_eq!(hour_field(22, 6), "22-6");
    }

    #[test]
    fn encode_builds_exact_schedule_line() {
        let codec = RecordCodec::new(FixedIdentity(1000));
        let record = codec
            .encode(&reminder((10, 0), (19, 0), Interval::ThirtyMinutes, "1-5"), "a1b2c3")
            .expect("encode");
        assert_eq!(record.id, "a1b2c3");
        assert_eq!(
            record.schedule_line,
            "0,30 10-19 * * 1-5 DISPLAY=:0 DBUS_SESSION_BUS_ADDRESS=unix:path=/run/user/1000/bus notify-send \"Drink water 💧\""
        );
        assert_eq!(record.tag_line(), "# WATER_REMINDER_APP | id=a1b2c3");
    }

    #[test]
    fn end_minute_does_not_affect_schedule() {
        let a = schedule_line(&reminder((9, 20), (17, 0), Interval::FortyFiveMinutes, "*"), 42);
        let b = schedule_line(&reminder((9, 20), (17, 45), Interval::FortyFiveMinutes, "*"), 42);
        assert_eq!(a, b);
        assert!(a.starts_with("20-59/45 9-17 * * * "));
    }

    #[test]
    fn extract_message_reads_back_encoded_text() {
        let line = schedule_line(&reminder((8, 0), (12, 0), Interval::SixtyMinutes, "0,6"), 501);
        assert_eq!(extract_message(&line).as_deref(), Some("Drink water 💧"));
        assert_eq!(extract_message("0 * * * * /usr/bin/backup"), None);
    }
}
