//! Locating the data directory.
//!
//! Resolution order:
//! 1) `--data-dir` (explicit; created if missing)
//! 2) the nearest directory named `habit` (any case), searching upward from
//!    the starting directory, at most [`MAX_SEARCH_DEPTH`] levels
//!
//! If neither yields a directory the caller must stop. Nothing is written
//! until a data directory has been established.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory name searched for, compared case-insensitively
pub const DATA_DIR_NAME: &str = "Habit";

/// Levels inspected by the upward search, the start directory included
pub const MAX_SEARCH_DEPTH: usize = 5;

/// Resolve the data directory from an explicit path or by searching from `start`.
pub fn resolve(explicit: Option<&Path>, start: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return ensure_dir(path);
    }

    let found = find_upward(start).ok_or_else(|| Error::DataDirNotFound(start.to_path_buf()))?;
    tracing::debug!(path = %found.display(), "found data directory");
    Ok(found)
}

/// Walk up from `start` looking for a directory named like [`DATA_DIR_NAME`].
pub fn find_upward(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(MAX_SEARCH_DEPTH)
        .find(|dir| is_data_dir_name(dir) && dir.is_dir())
        .map(Path::to_path_buf)
}

fn is_data_dir_name(dir: &Path) -> bool {
    dir.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.eq_ignore_ascii_case(DATA_DIR_NAME))
        .unwrap_or(false)
}

/// Create `path` if needed and check it is a directory.
pub fn ensure_dir(path: &Path) -> Result<PathBuf> {
    if path.exists() && !path.is_dir() {
        return Err(Error::DataDirUnusable {
            path: path.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    fs::create_dir_all(path).map_err(|err| Error::DataDirUnusable {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;

    Ok(path.to_path_buf())
}
