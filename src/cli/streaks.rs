//! habit streaks command implementation

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::rollover::Clock;
use crate::storage::Backend;
use crate::streaks::ActiveStreak;
use crate::tracker::Tracker;

#[derive(Serialize)]
struct StreaksReport {
    threshold: u32,
    streaks: Vec<ActiveStreak>,
}

pub fn run<B: Backend, C: Clock>(
    tracker: &Tracker<B, C>,
    all: bool,
    output: OutputOptions,
) -> Result<()> {
    let threshold = if all {
        1
    } else {
        tracker.config().streaks.display_threshold
    };

    let streaks: Vec<ActiveStreak> = if all {
        tracker
            .streaks()?
            .into_iter()
            .map(|(habit, days)| ActiveStreak { habit, days })
            .collect()
    } else {
        tracker.active_streaks()?
    };

    let mut human = if streaks.is_empty() {
        HumanOutput::new(format!("habit streaks: no streaks >= {threshold}"))
    } else {
        HumanOutput::new("habit streaks")
    };
    for streak in &streaks {
        human.push_line(format!("{}: {}", streak.habit, streak.days));
    }

    emit_success(
        output,
        "streaks",
        &StreaksReport { threshold, streaks },
        Some(&human),
    )
}
