//! habit progress command implementation
//!
//! Renders the progress log as a horizontal text bar chart.

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::progress::{self, ChartScale, ProgressSummary};
use crate::rollover::Clock;
use crate::storage::Backend;
use crate::tracker::Tracker;

#[derive(Serialize)]
struct ProgressReport {
    samples: Vec<u32>,
    summary: Option<ProgressSummary>,
}

fn chart_lines(samples: &[u32], scale: &ChartScale, width: usize) -> Vec<String> {
    let label_width = samples.len().to_string().len();
    samples
        .iter()
        .enumerate()
        .map(|(index, &sample)| {
            let label = if scale.labels_day(index) {
                (index + 1).to_string()
            } else {
                String::new()
            };
            let bar = "#".repeat(scale.bar_len(sample, width));
            format!("{label:>label_width$} | {bar} {sample}")
        })
        .collect()
}

pub fn run<B: Backend, C: Clock>(tracker: &Tracker<B, C>, output: OutputOptions) -> Result<()> {
    let samples = tracker.progress_samples()?;
    let summary = progress::summarize(&samples);

    let mut human = HumanOutput::new("habit progress: completed habits per day");
    match (&summary, ChartScale::for_samples(&samples)) {
        (Some(summary), Some(scale)) => {
            let width = tracker.config().progress.chart_width;
            for line in chart_lines(&samples, &scale, width) {
                human.push_line(line);
            }
            human.push_summary("days", summary.days.to_string());
            human.push_summary("total", summary.total.to_string());
            human.push_summary("average", format!("{:.1}", summary.average));
            human.push_summary("best", format!("{} (day {})", summary.max, summary.best_day));
        }
        _ => {
            human.push_line("(no progress data yet)");
            human.push_next_step("progress is recorded when a new day starts");
        }
    }

    emit_success(
        output,
        "progress",
        &ProgressReport { samples, summary },
        Some(&human),
    )
}
