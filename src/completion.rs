//! Completion store: which habits are done "today", kept in `today.txt`.
//!
//! Line 1 is the date stamp (`YYYY-MM-DD`), every following line a
//! completed habit name, written sorted. Only one day is ever stored;
//! history lives in the progress log as a count.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::storage::{content_lines, Backend, DataFile};

/// Date format of the stamp line
pub const STAMP_FORMAT: &str = "%Y-%m-%d";

/// The persisted completion state for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub completed: BTreeSet<String>,
}

impl DayRecord {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            completed: BTreeSet::new(),
        }
    }

    pub fn is_complete(&self, habit: &str) -> bool {
        self.completed.contains(habit)
    }

    pub fn to_file_contents(&self) -> String {
        let mut out = format!("{}\n", self.date.format(STAMP_FORMAT));
        for habit in &self.completed {
            out.push_str(habit);
            out.push('\n');
        }
        out
    }
}

/// Parse a stamp line. Anything that is not a `YYYY-MM-DD` calendar date
/// is rejected.
pub fn parse_stamp(line: &str) -> Option<NaiveDate> {
    let line = line.trim();
    // chrono's %Y also takes short and signed years
    let shaped = line.len() == 10
        && line.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(line, STAMP_FORMAT).ok()
}

/// Parse `today.txt`.
///
/// Returns `None` for an empty file or an unreadable stamp; callers treat
/// both like a missing file.
pub fn parse_day_record(content: &str) -> Option<DayRecord> {
    let mut lines = content_lines(content);
    let date = parse_stamp(lines.next()?)?;
    let completed = lines.map(str::to_string).collect();
    Some(DayRecord { date, completed })
}

pub struct CompletionStore<'a> {
    backend: &'a dyn Backend,
}

impl<'a> CompletionStore<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self { backend }
    }

    /// The stored record, or `None` when there is nothing usable on disk.
    pub fn load(&self) -> Result<Option<DayRecord>> {
        let Some(content) = self.backend.read(DataFile::Today)? else {
            return Ok(None);
        };

        let record = parse_day_record(&content);
        if record.is_none() && !content.trim().is_empty() {
            tracing::warn!("{} has no valid date stamp, ignoring it", DataFile::Today);
        }
        Ok(record)
    }

    /// The stored record, initialising it to `(today, {})` when absent.
    pub fn read(&self, today: NaiveDate) -> Result<DayRecord> {
        match self.load()? {
            Some(record) => Ok(record),
            None => self.reset(today),
        }
    }

    pub fn save(&self, record: &DayRecord) -> Result<()> {
        self.backend
            .write(DataFile::Today, &record.to_file_contents())
    }

    /// Start a fresh, empty day.
    pub fn reset(&self, today: NaiveDate) -> Result<DayRecord> {
        let record = DayRecord::empty(today);
        self.save(&record)?;
        Ok(record)
    }

    /// Mark a habit done for `today`.
    ///
    /// A record stamped with another date is replaced by `(today, {habit})`.
    pub fn mark_complete(&self, habit: &str, today: NaiveDate) -> Result<DayRecord> {
        let mut record = match self.load()? {
            Some(record) if record.date == today => record,
            Some(record) => {
                tracing::warn!(
                    stored = %record.date,
                    %today,
                    "completion record is stale, resyncing to today"
                );
                DayRecord::empty(today)
            }
            None => DayRecord::empty(today),
        };

        if record.completed.insert(habit.to_string()) {
            self.save(&record)?;
        }
        Ok(record)
    }

    /// Unmark a habit for `today`.
    ///
    /// Returns the updated record, or `None` when nothing changed: no
    /// record, a record for another day, or the habit was not checked.
    pub fn mark_incomplete(&self, habit: &str, today: NaiveDate) -> Result<Option<DayRecord>> {
        let Some(mut record) = self.load()? else {
            return Ok(None);
        };
        if record.date != today || !record.completed.remove(habit) {
            return Ok(None);
        }

        self.save(&record)?;
        Ok(Some(record))
    }
}
