//! Error types for habit
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown habit, no data directory)
//! - 4: Operation failed (filesystem error, serialization error)
//!
//! Malformed lines in the data files are not errors. They are dropped by
//! the parsing helpers of each store and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the habit CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for habit operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Habit data directory not found (searched upward from {0})")]
    DataDirNotFound(PathBuf),

    #[error("Data directory is not usable: {path}: {reason}")]
    DataDirUnusable { path: PathBuf, reason: String },

    #[error("Unknown habit: {0}")]
    HabitNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::DataDirNotFound(_)
            | Error::DataDirUnusable { .. }
            | Error::HabitNotFound(_)
            | Error::InvalidConfig(_)
            | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            Error::Io(_) | Error::Json(_) | Error::TomlParse(_) | Error::TomlSerialize(_) => {
                exit_codes::OPERATION_FAILED
            }
        }
    }

    /// Structured details for the JSON error envelope, when the variant carries any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::DataDirNotFound(start) => Some(serde_json::json!({
                "searched_from": start,
            })),
            Error::DataDirUnusable { path, reason } => Some(serde_json::json!({
                "path": path,
                "reason": reason,
            })),
            Error::HabitNotFound(name) => Some(serde_json::json!({
                "habit": name,
            })),
            _ => None,
        }
    }
}

/// Result type alias for habit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
