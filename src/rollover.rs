//! Day rollover.
//!
//! Runs once per process, before anything else reads the data files. It
//! compares the stamp in `today.txt` with the current date and:
//!
//! - same day, or a stored date in the future: leaves every file as is
//! - one day later: archives yesterday's count to the progress log,
//!   recomputes streaks, starts an empty day
//! - more than one day later: archives yesterday's count plus a zero for
//!   every fully missed day, clears every streak, starts an empty day
//!
//! A missing or unreadable `today.txt` is a first run: a fresh record is
//! created and nothing else is touched.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::completion::{CompletionStore, DayRecord};
use crate::error::Result;
use crate::progress::ProgressLog;
use crate::storage::Backend;
use crate::streaks::StreakTable;
use crate::tasks::TaskStore;

/// Source of the current calendar date
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// What the rollover did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RolloverOutcome {
    /// No usable record existed; a fresh one was created
    FirstRun,
    /// The record already belongs to today
    SameDay,
    /// The stored date is ahead of the clock; nothing was written
    ClockSkew { days_back: i64 },
    /// Exactly one day passed
    NextDay { archived: u32 },
    /// Several days passed; `missed_days` zero samples were recorded
    Gap { archived: u32, missed_days: u32 },
}

impl RolloverOutcome {
    pub fn rolled_over(&self) -> bool {
        matches!(self, RolloverOutcome::NextDay { .. } | RolloverOutcome::Gap { .. })
    }
}

/// Result of a rollover: today's record and how it was reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rollover {
    pub record: DayRecord,
    pub outcome: RolloverOutcome,
}

/// Bring the stores up to `today`.
pub fn run(backend: &dyn Backend, today: NaiveDate) -> Result<Rollover> {
    let completion = CompletionStore::new(backend);

    let Some(stored) = completion.load()? else {
        let record = completion.reset(today)?;
        tracing::info!(%today, "no completion record, starting fresh");
        return Ok(Rollover {
            record,
            outcome: RolloverOutcome::FirstRun,
        });
    };

    let day_diff = (today - stored.date).num_days();

    if day_diff == 0 {
        return Ok(Rollover {
            record: stored,
            outcome: RolloverOutcome::SameDay,
        });
    }

    if day_diff < 0 {
        tracing::warn!(
            stored = %stored.date,
            %today,
            "stored date is in the future, leaving the record untouched"
        );
        return Ok(Rollover {
            record: stored,
            outcome: RolloverOutcome::ClockSkew {
                days_back: -day_diff,
            },
        });
    }

    let progress = ProgressLog::new(backend);
    let streaks = StreakTable::new(backend);
    let archived = u32::try_from(stored.completed.len()).unwrap_or(u32::MAX);

    // All reads happen before the first write, so a failed read leaves the
    // files as they were and the next start retries the same rollover
    let outcome = if day_diff == 1 {
        let tasks = TaskStore::new(backend).load()?;
        let next = streaks.recompute(&stored.completed, &tasks)?;
        progress.append(archived)?;
        tracing::info!(
            yesterday = %stored.date,
            archived,
            streaks = next.len(),
            "rolled over to a new day"
        );
        RolloverOutcome::NextDay { archived }
    } else {
        let missed_days = u32::try_from(day_diff - 1).unwrap_or(u32::MAX);
        let mut samples = Vec::with_capacity(missed_days as usize + 1);
        samples.push(archived);
        samples.extend(std::iter::repeat(0).take(missed_days as usize));
        progress.append_all(&samples)?;
        streaks.clear_all()?;
        tracing::info!(
            last_seen = %stored.date,
            archived,
            missed_days,
            "rolled over a gap, streaks cleared"
        );
        RolloverOutcome::Gap {
            archived,
            missed_days,
        }
    };

    let record = completion.reset(today)?;
    Ok(Rollover { record, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DataFile, MemoryBackend};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn first_run_creates_record() {
        let backend = MemoryBackend::new();
        let rollover = run(&backend, date("2024-03-01")).unwrap();

        assert_eq!(rollover.outcome, RolloverOutcome::FirstRun);
        assert_eq!(rollover.record, DayRecord::empty(date("2024-03-01")));
        assert_eq!(
            backend.contents(DataFile::Today).as_deref(),
            Some("2024-03-01\n")
        );
        assert!(backend.contents(DataFile::Progress).is_none());
        assert!(backend.contents(DataFile::Streaks).is_none());
    }

    #[test]
    fn same_day_keeps_record() {
        let backend = MemoryBackend::new()
            .with_file(DataFile::Today, "2024-03-01\nRead\n")
            .with_file(DataFile::Streaks, "Read: 2\n");
        let rollover = run(&backend, date("2024-03-01")).unwrap();

        assert_eq!(rollover.outcome, RolloverOutcome::SameDay);
        assert!(rollover.record.is_complete("Read"));
        assert!(!rollover.outcome.rolled_over());
        assert!(backend.contents(DataFile::Progress).is_none());
        assert_eq!(backend.contents(DataFile::Streaks).as_deref(), Some("Read: 2\n"));
    }

    #[test]
    fn next_day_archives_and_recomputes() {
        let backend = MemoryBackend::new()
            .with_file(DataFile::Habits, "A\nB\nC\n")
            .with_file(DataFile::Today, "2024-03-01\nA\nB\n")
            .with_file(DataFile::Streaks, "C: 5\n");
        let rollover = run(&backend, date("2024-03-02")).unwrap();

        assert_eq!(rollover.outcome, RolloverOutcome::NextDay { archived: 2 });
        assert_eq!(rollover.record, DayRecord::empty(date("2024-03-02")));
        assert_eq!(backend.contents(DataFile::Progress).as_deref(), Some("2\n"));
        assert_eq!(
            backend.contents(DataFile::Streaks).as_deref(),
            Some("A: 1\nB: 1\n")
        );
        assert_eq!(
            backend.contents(DataFile::Today).as_deref(),
            Some("2024-03-02\n")
        );
    }
}
