//! habit today command implementation
//!
//! Prints today's checklist with streaks.

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::rollover::{Clock, RolloverOutcome};
use crate::storage::Backend;
use crate::streaks::{self, ActiveStreak};
use crate::tracker::Tracker;

#[derive(Debug, Serialize)]
pub(super) struct HabitRow {
    pub name: String,
    pub done: bool,
    pub streak: u32,
    pub highlighted: bool,
}

#[derive(Serialize)]
struct TodayReport<'a> {
    date: String,
    rollover: &'a RolloverOutcome,
    done: usize,
    total: usize,
    habits: Vec<HabitRow>,
    active_streaks: Vec<ActiveStreak>,
}

/// One row per habit line, in file order.
pub(super) fn checklist<B: Backend, C: Clock>(tracker: &Tracker<B, C>) -> Result<Vec<HabitRow>> {
    let completed = tracker.completed()?;
    let table = tracker.streaks()?;
    let highlight = tracker.config().streaks.highlight_threshold;

    Ok(tracker
        .tasks()?
        .into_iter()
        .map(|name| {
            let streak = table.get(&name).copied().unwrap_or(0);
            HabitRow {
                done: completed.contains(&name),
                highlighted: streaks::is_highlighted(streak, highlight),
                streak,
                name,
            }
        })
        .collect())
}

pub(super) fn format_row(row: &HabitRow) -> String {
    let mark = if row.done { "[x]" } else { "[ ]" };
    let mut line = format!("{mark} {}", row.name);
    if row.streak > 0 {
        line.push_str(&format!("  ({} day streak)", row.streak));
    }
    if row.highlighted {
        line.push_str(" *");
    }
    line
}

pub fn run<B: Backend, C: Clock>(tracker: &Tracker<B, C>, output: OutputOptions) -> Result<()> {
    let habits = checklist(tracker)?;
    let active = tracker.active_streaks()?;
    let threshold = tracker.config().streaks.display_threshold;
    let today = tracker.today();

    let mut human = HumanOutput::new(format!("habit today: {}", today.format("%A, %B %d, %Y")));
    if habits.is_empty() {
        human.push_line("(no habits yet)");
        human.push_next_step("add habits to habits.txt, one per line");
    }
    for row in &habits {
        human.push_line(format_row(row));
    }

    human.push_line("");
    if active.is_empty() {
        human.push_line(format!("Streaks: (no streaks >= {threshold})"));
    } else {
        human.push_line("Streaks:");
        for streak in &active {
            human.push_line(format!("  {}: {}", streak.habit, streak.days));
        }
    }

    match tracker.outcome() {
        RolloverOutcome::NextDay { archived } => {
            human.push_detail(format!("new day: recorded {archived} completed yesterday"));
        }
        RolloverOutcome::Gap {
            archived,
            missed_days,
        } => {
            human.push_detail(format!("recorded {archived} completed on the last day used"));
            human.push_warning(format!(
                "missed {missed_days} day(s); all streaks were reset"
            ));
        }
        RolloverOutcome::ClockSkew { days_back } => {
            human.push_warning(format!(
                "stored date is {days_back} day(s) ahead of the clock; staying on the stored day"
            ));
        }
        RolloverOutcome::FirstRun | RolloverOutcome::SameDay => {}
    }

    let done = habits.iter().filter(|row| row.done).count();
    let total = habits.len();
    human.push_summary("done", format!("{done}/{total}"));

    let report = TodayReport {
        date: today.to_string(),
        rollover: tracker.outcome(),
        done,
        total,
        habits,
        active_streaks: active,
    };

    emit_success(output, "today", &report, Some(&human))
}
