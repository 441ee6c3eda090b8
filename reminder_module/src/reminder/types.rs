use chrono::{NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

use crontab_module::CrontabError;

/// Marks the tag comment that opens every record this crate owns.
pub const RECORD_MARKER: &str = "WATER_REMINDER_APP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interval {
    #[default]
    ThirtyMinutes,
    FortyFiveMinutes,
    SixtyMinutes,
}

impl Interval {
    pub const ALL: [Interval; 3] = [
        Interval::ThirtyMinutes,
        Interval::FortyFiveMinutes,
        Interval::SixtyMinutes,
    ];

    pub fn minutes(self) -> u32 {
        match self {
            Interval::ThirtyMinutes => 30,
            Interval::FortyFiveMinutes => 45,
            Interval::SixtyMinutes => 60,
        }
    }
}

impl TryFrom<u32> for Interval {
    type Error = ReminderError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Interval::ALL
            .into_iter()
            .find(|interval| interval.minutes() == minutes)
            .ok_or_else(|| ReminderError::InvalidInterval(minutes.to_string()))
    }
}

impl FromStr for Interval {
    type Err = ReminderError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let minutes = raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ReminderError::InvalidInterval(raw.trim().to_string()))?;
        Interval::try_from(minutes)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.minutes())
    }
}

/// A periodic desktop notification as entered by the user.
///
/// Construction trims and checks the free-text fragments so that the encoded record
/// always stays on a single line with a fixed field count. Nothing else about the day
/// expression is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    message: String,
    start: NaiveTime,
    end: NaiveTime,
    interval: Interval,
    days: String,
}

impl Reminder {
    pub fn new(
        message: &str,
        start: NaiveTime,
        end: NaiveTime,
        interval: Interval,
        days: &str,
    ) -> Result<Self, ReminderError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ReminderError::InvalidMessage("message is empty".to_string()));
        }
        if message.contains(['\n', '\r']) {
            return Err(ReminderError::InvalidMessage(
                "message must fit on one line".to_string(),
            ));
        }

        let days = days.trim();
        if days.is_empty() {
            return Err(ReminderError::InvalidDays("day expression is empty".to_string()));
        }
        if days.chars().any(char::is_whitespace) {
            return Err(ReminderError::InvalidDays(format!(
                "day expression must not contain whitespace: {:?}",
                days
            )));
        }

        Ok(Self {
            message: message.to_string(),
            start: truncate_to_minute(start),
            end: truncate_to_minute(end),
            interval,
            days: days.to_string(),
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// End of the active window. Only the hour takes part in the schedule line.
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn days(&self) -> &str {
        &self.days
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|time| time.with_nanosecond(0))
        .unwrap_or(time)
}

/// Parses `HH:MM` (or a bare hour) into a time of day.
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, ReminderError> {
    let trimmed = raw.trim();
    let parsed = if trimmed.contains(':') {
        NaiveTime::parse_from_str(trimmed, "%H:%M").ok()
    } else {
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
    };
    parsed.ok_or_else(|| ReminderError::InvalidTime(trimmed.to_string()))
}

/// One persisted entry: the id from the tag line and the verbatim schedule line after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub schedule_line: String,
}

impl Record {
    pub fn tag_line(&self) -> String {
        super::codec::tag_line(&self.id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    #[error("crontab error: {0}")]
    Crontab(#[from] CrontabError),
    #[error("invalid message: {0}")]
    InvalidMessage(String),
    #[error("invalid day expression: {0}")]
    InvalidDays(String),
    #[error("invalid time of day (expected HH:MM): {0}")]
    InvalidTime(String),
    #[error("invalid interval (expected 30, 45 or 60 minutes): {0}")]
    InvalidInterval(String),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error("record id already present in crontab: {0}")]
    DuplicateId(String),
    #[error("could not generate a unique record id after {0} attempts")]
    IdExhausted(usize),
    #[error("config error: {0}")]
    Config(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
