//! The tracker: the one entry point a front end talks to.
//!
//! [`Tracker::open`] runs the day rollover before handing out any state,
//! so every read through a tracker sees stores that agree on "today".

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::completion::{CompletionStore, DayRecord};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::progress::ProgressLog;
use crate::rollover::{self, Clock, Rollover, RolloverOutcome};
use crate::storage::Backend;
use crate::streaks::{self, ActiveStreak, StreakTable, Streaks};
use crate::tasks::TaskStore;

pub struct Tracker<B: Backend, C: Clock> {
    backend: B,
    clock: C,
    config: Config,
    rollover: Rollover,
}

impl<B: Backend, C: Clock> Tracker<B, C> {
    /// Open the tracker, rolling the stores over to the clock's date.
    pub fn open(backend: B, clock: C, config: Config) -> Result<Self> {
        let rollover = rollover::run(&backend, clock.today())?;
        Ok(Self {
            backend,
            clock,
            config,
            rollover,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// What the startup rollover did
    pub fn outcome(&self) -> &RolloverOutcome {
        &self.rollover.outcome
    }

    /// The day the stores are on. Matches the clock except after a
    /// [`RolloverOutcome::ClockSkew`], where the stored day is kept.
    pub fn today(&self) -> NaiveDate {
        self.rollover.record.date
    }

    pub fn clock_date(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The habit list, in file order
    pub fn tasks(&self) -> Result<Vec<String>> {
        TaskStore::new(&self.backend).load()
    }

    /// Today's record as it currently stands on disk
    pub fn day(&self) -> Result<DayRecord> {
        CompletionStore::new(&self.backend).read(self.today())
    }

    pub fn completed(&self) -> Result<BTreeSet<String>> {
        Ok(self.day()?.completed)
    }

    /// Mark a listed habit done for today.
    pub fn mark_complete(&self, habit: &str) -> Result<DayRecord> {
        let habit = self.require_habit(habit)?;
        let record = CompletionStore::new(&self.backend).mark_complete(&habit, self.today())?;
        tracing::info!(habit = %habit, "marked complete");
        Ok(record)
    }

    /// Unmark a habit for today. Unknown names are a no-op.
    pub fn mark_incomplete(&self, habit: &str) -> Result<DayRecord> {
        let today = self.today();
        let store = CompletionStore::new(&self.backend);
        match store.mark_incomplete(habit.trim(), today)? {
            Some(record) => {
                tracing::info!(habit = habit.trim(), "marked incomplete");
                Ok(record)
            }
            None => Ok(store.load()?.unwrap_or_else(|| DayRecord::empty(today))),
        }
    }

    pub fn streaks(&self) -> Result<Streaks> {
        StreakTable::new(&self.backend).load()
    }

    /// Streaks at or above the configured display threshold
    pub fn active_streaks(&self) -> Result<Vec<ActiveStreak>> {
        let tasks = self.tasks()?;
        let table = self.streaks()?;
        Ok(streaks::active_streaks(
            &table,
            &tasks,
            self.config.streaks.display_threshold,
        ))
    }

    pub fn progress_samples(&self) -> Result<Vec<u32>> {
        ProgressLog::new(&self.backend).read_all()
    }

    fn require_habit(&self, habit: &str) -> Result<String> {
        let habit = habit.trim();
        if habit.is_empty() {
            return Err(Error::InvalidArgument("habit name cannot be empty".to_string()));
        }
        if !self.tasks()?.iter().any(|task| task == habit) {
            return Err(Error::HabitNotFound(habit.to_string()));
        }
        Ok(habit.to_string())
    }
}
