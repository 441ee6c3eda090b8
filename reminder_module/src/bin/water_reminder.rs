//! Manage periodic desktop reminders stored in the user's crontab.
//!
//! Each reminder becomes a tagged two-line block in `crontab -l`; every other line of
//! the crontab is left alone.

use chrono::NaiveTime;
use reminder_module::{
    extract_message, parse_time_of_day, IdSource, Interval, RandomIds, RecordCodec, Reminder,
    ReminderConfig, ReminderError, ScheduleStore,
};
use serde::Serialize;
use std::env;
use std::process::exit;
use tracing::debug;

const DEFAULT_MESSAGE: &str = "Drink water 💧";
const DEFAULT_START: &str = "10:00";
const DEFAULT_END: &str = "19:00";
const DEFAULT_DAYS: &str = "1-5";

fn print_usage() {
    eprintln!(
        r##"Usage: water-reminder <command> [arguments]

Commands:
  add [options]        Add a reminder and print its id
  preview [options]    Print the crontab lines a reminder would produce
  list [--json]        List reminders (id and schedule line)
  remove <id>          Remove the reminder with this id

Options for add / preview:
  --message="text"     Notification text (default: "Drink water 💧")
  --start=HH:MM        Start of the active window (default: 10:00)
  --end=HH:MM          End of the active window (default: 19:00)
  --interval=MINUTES   30, 45 or 60 (default: 30)
  --days=EXPR          Cron day-of-week expression (default: 1-5)

Environment Variables:
  WATER_REMINDER_CRONTAB_BIN    - crontab executable (default: crontab)
  WATER_REMINDER_CRONTAB_FILE   - keep records in this file instead of the system crontab
  WATER_REMINDER_TIMEOUT_SECS   - timeout for external commands (default: 30)
  WATER_REMINDER_UID            - user id for the session bus path (default: id -u)

Note: an end hour earlier than the start hour is written as is; cron never
      fires such a range.
"##
    );
}

fn parse_arg(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{}=", flag);
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            return Some(value.to_string());
        }
        // Also handle --flag "value" style
        if arg == flag {
            return args.get(idx + 1).cloned();
        }
    }
    None
}

fn parse_time_arg(args: &[String], flag: &str, default: &str) -> Result<NaiveTime, ReminderError> {
    let raw = parse_arg(args, flag).unwrap_or_else(|| default.to_string());
    parse_time_of_day(&raw)
}

fn reminder_from_args(args: &[String]) -> Result<Reminder, ReminderError> {
    let message = parse_arg(args, "--message").unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
    let start = parse_time_arg(args, "--start", DEFAULT_START)?;
    let end = parse_time_arg(args, "--end", DEFAULT_END)?;
    let interval = match parse_arg(args, "--interval") {
        Some(raw) => raw.parse::<Interval>()?,
        None => Interval::default(),
    };
    let days = parse_arg(args, "--days").unwrap_or_else(|| DEFAULT_DAYS.to_string());
    Reminder::new(&message, start, end, interval, &days)
}

fn cmd_add(args: &[String]) -> Result<(), ReminderError> {
    let reminder = reminder_from_args(args)?;
    let config = ReminderConfig::from_env()?;
    debug!("using config {:?}", config);

    let mut store = ScheduleStore::new(config.backend());
    let codec = RecordCodec::new(config.identity());
    let record = store.add_reminder(&codec, &mut RandomIds, &reminder)?;
    println!("{}", record.id);
    Ok(())
}

fn cmd_preview(args: &[String]) -> Result<(), ReminderError> {
    let reminder = reminder_from_args(args)?;
    let config = ReminderConfig::from_env()?;
    let codec = RecordCodec::new(config.identity());
    let record = codec.encode(&reminder, &RandomIds.next_id())?;
    println!("{}", record.tag_line());
    println!("{}", record.schedule_line);
    Ok(())
}

#[derive(Debug, Serialize)]
struct ListedRecord<'a> {
    id: &'a str,
    schedule_line: &'a str,
    message: Option<String>,
}

fn cmd_list(args: &[String]) -> Result<(), ReminderError> {
    let json = args.iter().any(|arg| arg == "--json");
    let config = ReminderConfig::from_env()?;
    let store = ScheduleStore::new(config.backend());
    let records = store.list();

    if json {
        let listed: Vec<ListedRecord<'_>> = records
            .iter()
            .map(|record| ListedRecord {
                id: record.id,
                schedule_line: record.schedule_line,
                message: extract_message(record.schedule_line),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No reminders.");
        return Ok(());
    }
    for record in &records {
        println!("{}\t{}", record.id, record.schedule_line);
    }
    Ok(())
}

fn cmd_remove(id: &str) -> Result<(), ReminderError> {
    let config = ReminderConfig::from_env()?;
    let mut store = ScheduleStore::new(config.backend());
    if store.remove_by_id(id.trim())? {
        println!("Removed {}", id.trim());
    } else {
        println!("No reminder with id {}", id.trim());
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        exit(1);
    }

    let command = &args[1];
    let rest = &args[2..];

    let result = match command.as_str() {
        "add" => cmd_add(rest),
        "preview" => cmd_preview(rest),
        "list" => cmd_list(rest),
        "remove" => {
            let Some(id) = rest.first() else {
                eprintln!("Error: reminder id required");
                print_usage();
                exit(1);
            };
            cmd_remove(id)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        exit(1);
    }
}
