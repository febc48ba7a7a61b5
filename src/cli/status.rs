//! habit status command implementation
//!
//! Shows where the data lives and what the startup rollover did.

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::rollover::{Clock, RolloverOutcome};
use crate::storage::{Backend, DataFile};
use crate::tracker::Tracker;

#[derive(Serialize)]
struct FileStatus {
    file: &'static str,
    present: bool,
}

#[derive(Serialize)]
struct StatusReport<'a> {
    data_dir: String,
    date: String,
    clock_date: String,
    rollover: &'a RolloverOutcome,
    habits: usize,
    completed: usize,
    streaks: usize,
    progress_days: usize,
    files: Vec<FileStatus>,
}

fn describe(outcome: &RolloverOutcome) -> String {
    match outcome {
        RolloverOutcome::FirstRun => "first run, started a fresh day".to_string(),
        RolloverOutcome::SameDay => "same day, nothing to roll over".to_string(),
        RolloverOutcome::ClockSkew { days_back } => {
            format!("clock is {days_back} day(s) behind the stored date")
        }
        RolloverOutcome::NextDay { archived } => {
            format!("new day, archived {archived}")
        }
        RolloverOutcome::Gap {
            archived,
            missed_days,
        } => format!("gap of {missed_days} missed day(s), archived {archived}, streaks reset"),
    }
}

pub fn run<B: Backend, C: Clock>(tracker: &Tracker<B, C>, output: OutputOptions) -> Result<()> {
    // Reading the habit list creates it when missing, so count first
    let habits = tracker.tasks()?.len();
    let completed = tracker.completed()?.len();
    let streaks = tracker.streaks()?.len();
    let progress_days = tracker.progress_samples()?.len();

    let backend = tracker.backend();
    let files = DataFile::ALL
        .iter()
        .map(|file| -> Result<FileStatus> {
            Ok(FileStatus {
                file: file.file_name(),
                present: backend.exists(*file)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let report = StatusReport {
        data_dir: backend.location(),
        date: tracker.today().to_string(),
        clock_date: tracker.clock_date().to_string(),
        rollover: tracker.outcome(),
        habits,
        completed,
        streaks,
        progress_days,
        files,
    };

    let mut human = HumanOutput::new("habit status");
    human.push_summary("data dir", report.data_dir.clone());
    human.push_summary("date", report.date.clone());
    if report.clock_date != report.date {
        human.push_summary("clock date", report.clock_date.clone());
    }
    human.push_summary("rollover", describe(report.rollover));
    human.push_summary("habits", report.habits.to_string());
    human.push_summary("completed today", report.completed.to_string());
    human.push_summary("streaks", report.streaks.to_string());
    human.push_summary("progress days", report.progress_days.to_string());
    for file in &report.files {
        if !file.present {
            human.push_warning(format!("{} is missing", file.file));
        }
    }

    emit_success(output, "status", &report, Some(&human))
}
