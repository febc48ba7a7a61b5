//! habit check / uncheck command implementation

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::rollover::Clock;
use crate::storage::Backend;
use crate::tracker::Tracker;

use super::today::{checklist, format_row};

#[derive(Serialize)]
struct ToggleReport {
    habit: String,
    done: bool,
    date: String,
    completed: Vec<String>,
}

pub fn run_check<B: Backend, C: Clock>(
    tracker: &Tracker<B, C>,
    habit: &str,
    output: OutputOptions,
) -> Result<()> {
    let record = tracker.mark_complete(habit)?;
    emit_toggle(tracker, habit.trim(), true, record.completed.into_iter().collect(), output)
}

pub fn run_uncheck<B: Backend, C: Clock>(
    tracker: &Tracker<B, C>,
    habit: &str,
    output: OutputOptions,
) -> Result<()> {
    let record = tracker.mark_incomplete(habit)?;
    emit_toggle(tracker, habit.trim(), false, record.completed.into_iter().collect(), output)
}

fn emit_toggle<B: Backend, C: Clock>(
    tracker: &Tracker<B, C>,
    habit: &str,
    done: bool,
    completed: Vec<String>,
    output: OutputOptions,
) -> Result<()> {
    let command = if done { "check" } else { "uncheck" };
    let rows = checklist(tracker)?;

    let mut human = HumanOutput::new(format!("habit {command}: {habit}"));
    for row in &rows {
        human.push_line(format_row(row));
    }
    let done_count = rows.iter().filter(|row| row.done).count();
    human.push_summary("done", format!("{done_count}/{}", rows.len()));

    let report = ToggleReport {
        habit: habit.to_string(),
        done,
        date: tracker.today().to_string(),
        completed,
    };

    emit_success(output, command, &report, Some(&human))
}
