//! Storage layer for habit
//!
//! All state lives as plain UTF-8 text files in a single data directory:
//!
//! ```text
//! Habit/                        # Data directory
//!   habits.txt                  # One habit name per line (user-edited)
//!   today.txt                   # Date stamp + habits completed that day
//!   streaks.txt                 # `Habit: count` per line
//!   progress.txt                # One daily completion count per line
//!   habit.toml                  # Optional configuration
//! ```
//!
//! The stores never touch the filesystem directly. They go through a
//! [`Backend`], so tests can swap in a [`MemoryBackend`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Name of the optional configuration file inside the data directory
pub const CONFIG_FILE: &str = "habit.toml";

/// The four backing files of the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataFile {
    Habits,
    Today,
    Streaks,
    Progress,
}

impl DataFile {
    pub const ALL: [DataFile; 4] = [
        DataFile::Habits,
        DataFile::Today,
        DataFile::Streaks,
        DataFile::Progress,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            DataFile::Habits => "habits.txt",
            DataFile::Today => "today.txt",
            DataFile::Streaks => "streaks.txt",
            DataFile::Progress => "progress.txt",
        }
    }
}

impl std::fmt::Display for DataFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Raw text persistence for the data files.
///
/// Every read and write covers a whole file; the files are small.
pub trait Backend {
    /// Read a file, or `None` if it does not exist.
    fn read(&self, file: DataFile) -> Result<Option<String>>;

    /// Replace a file's contents atomically.
    fn write(&self, file: DataFile, contents: &str) -> Result<()>;

    /// Append to a file, creating it if needed.
    fn append(&self, file: DataFile, contents: &str) -> Result<()>;

    /// Human-readable location, for display.
    fn location(&self) -> String;

    fn exists(&self, file: DataFile) -> Result<bool> {
        Ok(self.read(file)?.is_some())
    }
}

/// Backend over a directory on disk
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, file: DataFile) -> PathBuf {
        self.root.join(file.file_name())
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }
}

impl Backend for FsBackend {
    fn read(&self, file: DataFile) -> Result<Option<String>> {
        match fs::read(self.path(file)) {
            Ok(bytes) => Ok(Some(decode_lossy(file, bytes))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, file: DataFile, contents: &str) -> Result<()> {
        write_atomic(self.path(file), contents.as_bytes())
    }

    fn append(&self, file: DataFile, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        let mut handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(file))?;

        handle.write_all(contents.as_bytes())?;
        handle.sync_all()?;

        Ok(())
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn exists(&self, file: DataFile) -> Result<bool> {
        Ok(self.path(file).exists())
    }
}

/// In-memory backend for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryBackend {
    files: RefCell<BTreeMap<DataFile, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file with the given contents
    pub fn with_file(self, file: DataFile, contents: &str) -> Self {
        self.files.borrow_mut().insert(file, contents.to_string());
        self
    }

    /// Current contents of a file, if present
    pub fn contents(&self, file: DataFile) -> Option<String> {
        self.files.borrow().get(&file).cloned()
    }
}

impl Backend for MemoryBackend {
    fn read(&self, file: DataFile) -> Result<Option<String>> {
        Ok(self.contents(file))
    }

    fn write(&self, file: DataFile, contents: &str) -> Result<()> {
        self.files.borrow_mut().insert(file, contents.to_string());
        Ok(())
    }

    fn append(&self, file: DataFile, contents: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .entry(file)
            .or_default()
            .push_str(contents);
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

/// Create every missing data file empty. Existing files are left alone.
///
/// Returns the files that were created.
pub fn init_layout(backend: &dyn Backend) -> Result<Vec<DataFile>> {
    let mut created = Vec::new();
    for file in DataFile::ALL {
        if !backend.exists(file)? {
            backend.write(file, "")?;
            created.push(file);
        }
    }
    Ok(created)
}

/// Atomically write data to a file
///
/// This writes to a temporary file in the same directory, then renames
/// it to the target path. The file is either fully written or not
/// modified at all.
pub fn write_atomic(path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Same directory as the target, so the rename stays on one filesystem
    let temp_path = path.with_extension(format!(
        "{}.tmp.{}",
        path.extension().and_then(|e| e.to_str()).unwrap_or(""),
        std::process::id()
    ));

    let mut temp_file = File::create(&temp_path)?;
    temp_file.write_all(data)?;
    temp_file.sync_all()?;
    drop(temp_file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Invalid UTF-8 becomes U+FFFD, which the line parsers then reject
fn decode_lossy(file: DataFile, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(%file, "file is not valid UTF-8, unreadable lines will be skipped");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

/// Non-blank lines of a file, trimmed. Lines that held invalid UTF-8 are
/// dropped.
pub(crate) fn content_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains(char::REPLACEMENT_CHARACTER))
}
