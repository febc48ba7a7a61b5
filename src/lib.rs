//! habit - Daily Habit Checklist Library
//!
//! This library provides the core functionality for the habit CLI tool:
//! a daily checklist with per-habit streaks and a day-by-day progress
//! history, all kept in small plain text files.
//!
//! # Core Concepts
//!
//! - **Tasks**: the ordered habit list the user edits by hand
//! - **Completion record**: which habits are done, for one date only
//! - **Streaks**: consecutive days each habit was completed
//! - **Progress log**: one completion count per elapsed day
//! - **Rollover**: the once-per-start transition that archives yesterday
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `habit.toml`
//! - `error`: Error types and result aliases
//! - `datadir`: Locating the data directory
//! - `storage`: Backend trait, filesystem and in-memory backends
//! - `tasks`, `completion`, `streaks`, `progress`: the four stores
//! - `rollover`: Day rollover state machine and clock injection
//! - `tracker`: Facade that runs the rollover before exposing state

pub mod cli;
pub mod completion;
pub mod config;
pub mod datadir;
pub mod error;
pub mod output;
pub mod progress;
pub mod rollover;
pub mod storage;
pub mod streaks;
pub mod tasks;
pub mod tracker;

pub use error::{Error, Result};
