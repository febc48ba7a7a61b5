//! Task store: the user-edited, ordered list of habits in `habits.txt`.
//!
//! One habit per non-blank line. Order is kept for display. Duplicate
//! lines are kept too; keyed structures downstream collapse them.

use crate::error::Result;
use crate::storage::{content_lines, Backend, DataFile};

pub struct TaskStore<'a> {
    backend: &'a dyn Backend,
}

impl<'a> TaskStore<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self { backend }
    }

    /// Load the habit list, creating an empty `habits.txt` if it is missing.
    pub fn load(&self) -> Result<Vec<String>> {
        match self.backend.read(DataFile::Habits)? {
            Some(content) => Ok(parse_tasks(&content)),
            None => {
                tracing::info!("{} missing, creating empty habit list", DataFile::Habits);
                self.backend.write(DataFile::Habits, "")?;
                Ok(Vec::new())
            }
        }
    }
}

pub fn parse_tasks(content: &str) -> Vec<String> {
    content_lines(content).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    #[test]
    fn missing_file_is_created_empty() {
        let backend = MemoryBackend::new();
        let tasks = TaskStore::new(&backend).load().unwrap();

        assert!(tasks.is_empty());
        assert_eq!(backend.contents(DataFile::Habits).as_deref(), Some(""));
    }

    #[test]
    fn keeps_order_and_duplicates() {
        let backend =
            MemoryBackend::new().with_file(DataFile::Habits, "Read\n\n  Walk  \nRead\nStretch\n");
        let tasks = TaskStore::new(&backend).load().unwrap();

        assert_eq!(tasks, vec!["Read", "Walk", "Read", "Stretch"]);
    }
}
