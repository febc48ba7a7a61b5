//! Command-line interface for habit
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::datadir;
use crate::error::Result;
use crate::output::OutputOptions;
use crate::rollover::SystemClock;
use crate::storage::FsBackend;
use crate::tracker::Tracker;

mod check;
mod init;
mod progress;
mod status;
mod streaks;
mod today;

/// habit - daily habit checklist
///
/// Tracks which habits are done today, keeps per-habit streaks and a
/// day-by-day progress history in plain text files.
#[derive(Parser, Debug)]
#[command(name = "habit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to the nearest enclosing `Habit` folder)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory and its files
    Init {
        /// Where to create it (default: ./Habit)
        path: Option<PathBuf>,
    },

    /// Show today's checklist
    #[command(visible_alias = "ls")]
    Today,

    /// Mark a habit done for today
    Check {
        /// Habit name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        habit: Vec<String>,
    },

    /// Mark a habit not done for today
    Uncheck {
        /// Habit name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        habit: Vec<String>,
    },

    /// Show current streaks
    Streaks {
        /// Include streaks below the display threshold
        #[arg(long)]
        all: bool,
    },

    /// Show daily completion history
    Progress,

    /// Show data directory and rollover state
    Status,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let output = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Init { path } => init::run(init::InitOptions {
                path: path.or(self.data_dir),
                output,
            }),
            Commands::Today => today::run(&open_tracker(self.data_dir.as_deref())?, output),
            Commands::Check { habit } => check::run_check(
                &open_tracker(self.data_dir.as_deref())?,
                &habit.join(" "),
                output,
            ),
            Commands::Uncheck { habit } => check::run_uncheck(
                &open_tracker(self.data_dir.as_deref())?,
                &habit.join(" "),
                output,
            ),
            Commands::Streaks { all } => {
                streaks::run(&open_tracker(self.data_dir.as_deref())?, all, output)
            }
            Commands::Progress => progress::run(&open_tracker(self.data_dir.as_deref())?, output),
            Commands::Status => status::run(&open_tracker(self.data_dir.as_deref())?, output),
        }
    }
}

/// Resolve the data directory and roll it over to today.
fn open_tracker(explicit: Option<&Path>) -> Result<Tracker<FsBackend, SystemClock>> {
    let start = std::env::current_dir()?;
    let dir = datadir::resolve(explicit, &start)?;
    let config = Config::load_from_dir(&dir);
    Tracker::open(FsBackend::new(dir), SystemClock, config)
}
