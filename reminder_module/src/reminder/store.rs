use tracing::{debug, info, warn};

use crontab_module::{CrontabBackend, IdentityProvider};

use super::codec::RecordCodec;
use super::ids::{is_valid_id, IdSource, MAX_ID_ATTEMPTS};
use super::scan::{remove_records, Scanner};
use super::types::{Record, Reminder, ReminderError};

/// Record store layered over the user's crontab.
///
/// Every operation starts from a fresh read of the whole crontab and mutations end with a
/// single full replace. Lines that are not records are carried through untouched.
/// Mutations take `&mut self`, so one store serializes its own read-modify-write cycles;
/// nothing protects against another process editing the crontab in between.
pub struct ScheduleStore<B: CrontabBackend> {
    backend: B,
}

impl<B: CrontabBackend> ScheduleStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current crontab text. A failed read (usually: no crontab installed yet) is an
    /// empty crontab.
    pub fn read_all(&self) -> String {
        match self.backend.read() {
            Ok(text) => text,
            Err(err) => {
                warn!("crontab read failed, treating as empty: {}", err);
                String::new()
            }
        }
    }

    /// Replaces the crontab with `text`, trimmed and ending in exactly one newline.
    pub fn write_all(&mut self, text: &str) -> Result<(), ReminderError> {
        let mut normalized = text.trim().to_string();
        normalized.push('\n');
        self.backend.write(&normalized)?;
        Ok(())
    }

    pub fn list(&self) -> RecordSet {
        RecordSet::from_text(self.read_all())
    }

    pub fn append(&mut self, record: &Record) -> Result<(), ReminderError> {
        if !is_valid_id(&record.id) {
            return Err(ReminderError::InvalidRecord(format!(
                "malformed id {:?}",
                record.id
            )));
        }
        if record.schedule_line.trim().is_empty() || record.schedule_line.contains(['\n', '\r'])
        {
            return Err(ReminderError::InvalidRecord(
                "schedule line must be a single non-empty line".to_string(),
            ));
        }

        let existing = self.read_all();
        if RecordSet::from_text(existing.clone()).contains(&record.id) {
            return Err(ReminderError::DuplicateId(record.id.clone()));
        }

        let mut text = existing.trim_end().to_string();
        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str(&record.tag_line());
        text.push('\n');
        text.push_str(&record.schedule_line);

        self.write_all(&text)?;
        info!("added crontab record {}", record.id);
        Ok(())
    }

    /// Drops the record with this id (tag line and schedule line together).
    ///
    /// Returns `false` without writing when no record matched.
    pub fn remove_by_id(&mut self, id: &str) -> Result<bool, ReminderError> {
        let text = self.read_all();
        let (rebuilt, removed) = remove_records(&text, id);
        if removed == 0 {
            debug!("no crontab record with id {}; nothing to remove", id);
            return Ok(false);
        }
        self.write_all(&rebuilt)?;
        info!("removed crontab record {}", id);
        Ok(true)
    }

    /// Draws ids from `ids` until one is not already used by a stored record.
    pub fn new_id<S: IdSource + ?Sized>(&self, ids: &mut S) -> Result<String, ReminderError> {
        let existing = self.list();
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = ids.next_id();
            if !is_valid_id(&candidate) {
                debug!("discarding malformed record id {:?}", candidate);
                continue;
            }
            if existing.contains(&candidate) {
                debug!("record id {} already in use, regenerating", candidate);
                continue;
            }
            return Ok(candidate);
        }
        Err(ReminderError::IdExhausted(MAX_ID_ATTEMPTS))
    }

    /// Allocates an id, encodes `reminder` and appends the resulting record.
    pub fn add_reminder<I, S>(
        &mut self,
        codec: &RecordCodec<I>,
        ids: &mut S,
        reminder: &Reminder,
    ) -> Result<Record, ReminderError>
    where
        I: IdentityProvider,
        S: IdSource + ?Sized,
    {
        let id = self.new_id(ids)?;
        let record = codec.encode(reminder, &id)?;
        self.append(&record)?;
        Ok(record)
    }
}

/// Snapshot of the crontab taken by [`ScheduleStore::list`].
///
/// Records are parsed lazily from the snapshot each time [`RecordSet::iter`] is called.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    text: String,
}

impl RecordSet {
    pub(crate) fn from_text(text: String) -> Self {
        Self { text }
    }

    pub fn iter(&self) -> RecordIter<'_> {
        RecordIter {
            scanner: Scanner::new(&self.text),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.iter().any(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn to_records(&self) -> Vec<Record> {
        self.iter().map(|record| record.to_record()).collect()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = RecordRef<'a>;
    type IntoIter = RecordIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRef<'a> {
    pub id: &'a str,
    pub schedule_line: &'a str,
}

impl RecordRef<'_> {
    pub fn to_record(&self) -> Record {
        Record {
            id: self.id.to_string(),
            schedule_line: self.schedule_line.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordIter<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = RecordRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scanner
            .next()
            .map(|(id, schedule_line)| RecordRef { id, schedule_line })
    }
}
