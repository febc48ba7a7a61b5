#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use habit::storage::{DataFile, FsBackend};
use tempfile::TempDir;

/// A throwaway `Habit` data directory
pub struct TestData {
    _dir: TempDir,
    root: PathBuf,
}

impl TestData {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let root = dir.path().join("Habit");
        fs::create_dir_all(&root).expect("failed to create data dir");
        Self { _dir: dir, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Directory containing the data directory
    pub fn parent(&self) -> &Path {
        self.root.parent().expect("data dir has a parent")
    }

    pub fn backend(&self) -> FsBackend {
        FsBackend::new(&self.root)
    }

    pub fn write(&self, file: DataFile, contents: &str) -> &Self {
        fs::write(self.root.join(file.file_name()), contents).expect("write data file");
        self
    }

    pub fn write_bytes(&self, file: DataFile, contents: &[u8]) -> &Self {
        fs::write(self.root.join(file.file_name()), contents).expect("write data file");
        self
    }

    pub fn read(&self, file: DataFile) -> Option<String> {
        fs::read_to_string(self.root.join(file.file_name())).ok()
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}
