use regex::Regex;
use std::mem;
use std::str::SplitTerminator;
use std::sync::LazyLock;

use super::types::RECORD_MARKER;

// Tag lines look like `# WATER_REMINDER_APP | id=<token>`.
static TAG_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^# {}\b.*?\bid=([^\s|]+)",
        regex::escape(RECORD_MARKER)
    ))
    .expect("tag line pattern is valid")
});

/// Returns the record id embedded in a tag line, or `None` for any other line.
pub(crate) fn parse_tag_line(line: &str) -> Option<&str> {
    TAG_LINE_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Splits on `\n` only, so a `\r` before it stays part of the line and CRLF content is
/// written back unchanged.
fn crontab_lines(text: &str) -> SplitTerminator<'_, char> {
    text.split_terminator('\n')
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

#[derive(Debug, Clone, Copy)]
enum ScanState<'a> {
    Outside,
    AwaitingPayload { id: &'a str, tag: &'a str },
}

impl<'a> ScanState<'a> {
    fn after(line: &'a str) -> Self {
        match parse_tag_line(line) {
            Some(id) => ScanState::AwaitingPayload { id, tag: line },
            None => ScanState::Outside,
        }
    }
}

/// Walks crontab text and yields `(id, schedule line)` for every tag line that has a
/// following line.
///
/// Every line is classified, payload lines included, so a tag line right after another
/// tag line is both the first record's schedule and the start of a record of its own.
/// A tag line on the last line opens nothing.
#[derive(Debug, Clone)]
pub(crate) struct Scanner<'a> {
    lines: SplitTerminator<'a, char>,
    state: ScanState<'a>,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            lines: crontab_lines(text),
            state: ScanState::Outside,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            let previous = mem::replace(&mut self.state, ScanState::after(line));
            if let ScanState::AwaitingPayload { id, .. } = previous {
                return Some((id, strip_cr(line)));
            }
        }
    }
}

/// Rebuilds `text` without the records whose id equals `id`.
///
/// A matching tag line is dropped together with the line after it, the same line
/// [`Scanner`] reports as its schedule. When two tag lines are adjacent, removing the
/// first id therefore also drops the second tag line. A matching tag line with no
/// successor is not a record and is kept.
///
/// Returns the new text and the number of records dropped.
pub(crate) fn remove_records(text: &str, id: &str) -> (String, usize) {
    let mut kept: Vec<&str> = Vec::new();
    let mut removed = 0usize;
    let mut state = ScanState::Outside;
    for line in crontab_lines(text) {
        match state {
            ScanState::AwaitingPayload { .. } => {
                removed += 1;
                state = ScanState::Outside;
            }
            ScanState::Outside => match parse_tag_line(line) {
                Some(found) if found == id => {
                    state = ScanState::AwaitingPayload { id: found, tag: line }
                }
                _ => kept.push(line),
            },
        }
    }
    if let ScanState::AwaitingPayload { tag, .. } = state {
        kept.push(tag);
    }
    (kept.join("\n"), removed)
}
