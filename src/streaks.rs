//! Streak table: consecutive-day completion counts in `streaks.txt`.
//!
//! Format is one `Habit: count` per line, sorted by habit name. A missing
//! entry means a streak of zero, so zero counts are never written.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use crate::error::Result;
use crate::storage::{content_lines, Backend, DataFile};

/// Habit name -> current streak
pub type Streaks = BTreeMap<String, u32>;

/// Default minimum streak shown in the active streaks view
pub const DEFAULT_DISPLAY_THRESHOLD: u32 = 3;

/// Default streak above which a habit is highlighted
pub const DEFAULT_HIGHLIGHT_THRESHOLD: u32 = 10;

/// A streak worth showing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveStreak {
    pub habit: String,
    pub days: u32,
}

/// Parse one `Habit: count` line.
///
/// Splits on the last `:` so names may contain colons. Lines without a
/// separator, with an empty name, or with a count that is not a
/// non-negative integer are rejected.
pub fn parse_streak_line(line: &str) -> Option<(String, u32)> {
    let (name, count) = line.rsplit_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let count = count.trim().parse::<u32>().ok()?;
    Some((name.to_string(), count))
}

pub fn parse_streaks(content: &str) -> Streaks {
    content_lines(content)
        .filter_map(|line| {
            let parsed = parse_streak_line(line);
            if parsed.is_none() {
                tracing::debug!(line, "skipping malformed streak line");
            }
            parsed
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}

pub fn format_streaks(streaks: &Streaks) -> String {
    streaks
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(habit, count)| format!("{habit}: {count}\n"))
        .collect()
}

/// Next day's streaks: completed habits still in the task list go up by
/// one, everything else is dropped.
pub fn next_streaks(previous: &Streaks, completed: &BTreeSet<String>, tasks: &[String]) -> Streaks {
    tasks
        .iter()
        .filter(|habit| completed.contains(*habit))
        .map(|habit| {
            let old = previous.get(habit).copied().unwrap_or(0);
            (habit.clone(), old.saturating_add(1))
        })
        .collect()
}

/// Streaks of at least `threshold` days, in task-list order.
pub fn active_streaks(streaks: &Streaks, tasks: &[String], threshold: u32) -> Vec<ActiveStreak> {
    let mut seen = HashSet::new();
    tasks
        .iter()
        .filter(|habit| seen.insert(*habit))
        .filter_map(|habit| {
            let days = streaks.get(habit).copied().unwrap_or(0);
            (days >= threshold).then(|| ActiveStreak {
                habit: habit.clone(),
                days,
            })
        })
        .collect()
}

pub fn is_highlighted(days: u32, threshold: u32) -> bool {
    days > threshold
}

pub struct StreakTable<'a> {
    backend: &'a dyn Backend,
}

impl<'a> StreakTable<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self { backend }
    }

    pub fn load(&self) -> Result<Streaks> {
        Ok(self
            .backend
            .read(DataFile::Streaks)?
            .map(|content| parse_streaks(&content))
            .unwrap_or_default())
    }

    /// Replace the whole table.
    pub fn save(&self, streaks: &Streaks) -> Result<()> {
        self.backend
            .write(DataFile::Streaks, &format_streaks(streaks))
    }

    /// Recompute from yesterday's completions and persist the result.
    pub fn recompute(&self, completed: &BTreeSet<String>, tasks: &[String]) -> Result<Streaks> {
        let next = next_streaks(&self.load()?, completed, tasks);
        self.save(&next)?;
        Ok(next)
    }

    pub fn clear_all(&self) -> Result<()> {
        self.backend.write(DataFile::Streaks, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_streak_line_cases() {
        assert_eq!(parse_streak_line("Read: 4"), Some(("Read".to_string(), 4)));
        assert_eq!(parse_streak_line("  Read  :4  "), Some(("Read".to_string(), 4)));
        assert_eq!(
            parse_streak_line("Read: ch. 2: 5"),
            Some(("Read: ch. 2".to_string(), 5))
        );
        assert_eq!(parse_streak_line("Read 4"), None);
        assert_eq!(parse_streak_line("Read: four"), None);
        assert_eq!(parse_streak_line("Read: -1"), None);
        assert_eq!(parse_streak_line(": 3"), None);
    }

    #[test]
    fn load_skips_malformed_lines() {
        let backend = MemoryBackend::new().with_file(
            DataFile::Streaks,
            "Read: 4\ngarbage\nWalk: x\n\nStretch: 0\nMeditate: 12\n",
        );
        let streaks = StreakTable::new(&backend).load().unwrap();

        let expected: Streaks = [("Meditate".to_string(), 12), ("Read".to_string(), 4)]
            .into_iter()
            .collect();
        assert_eq!(streaks, expected);
    }

    #[test]
    fn load_missing_file_is_empty() {
        let backend = MemoryBackend::new();
        assert!(StreakTable::new(&backend).load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let backend = MemoryBackend::new();
        let table = StreakTable::new(&backend);
        let mut streaks = Streaks::new();
        streaks.insert("Walk".to_string(), 2);
        streaks.insert("Read".to_string(), 7);
        streaks.insert("Stretch".to_string(), 0);

        table.save(&streaks).unwrap();
        assert_eq!(
            backend.contents(DataFile::Streaks).as_deref(),
            Some("Read: 7\nWalk: 2\n")
        );

        streaks.remove("Stretch");
        assert_eq!(table.load().unwrap(), streaks);
    }

    #[test]
    fn recompute_increments_completed_and_drops_others() {
        let backend = MemoryBackend::new().with_file(DataFile::Streaks, "A: 4\nC: 9\nGone: 3\n");
        let table = StreakTable::new(&backend);

        let next = table
            .recompute(&set(&["A", "B", "NotListed"]), &names(&["A", "B", "C"]))
            .unwrap();

        let expected: Streaks = [("A".to_string(), 5), ("B".to_string(), 1)]
            .into_iter()
            .collect();
        assert_eq!(next, expected);
        assert_eq!(table.load().unwrap(), expected);
    }

    #[test]
    fn next_streaks_with_duplicate_tasks_counts_once() {
        let previous: Streaks = [("A".to_string(), 2)].into_iter().collect();
        let next = next_streaks(&previous, &set(&["A"]), &names(&["A", "A"]));
        assert_eq!(next.get("A"), Some(&3));
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn next_streaks_saturates_at_max() {
        let backend =
            MemoryBackend::new().with_file(DataFile::Streaks, "A: 4294967295\nB: 4294967294\n");
        let previous = StreakTable::new(&backend).load().unwrap();
        assert_eq!(previous.get("A"), Some(&u32::MAX));

        let next = next_streaks(&previous, &set(&["A", "B"]), &names(&["A", "B"]));
        assert_eq!(next.get("A"), Some(&u32::MAX));
        assert_eq!(next.get("B"), Some(&u32::MAX));
    }

    #[test]
    fn clear_all_empties_table() {
        let backend = MemoryBackend::new().with_file(DataFile::Streaks, "A: 4\n");
        let table = StreakTable::new(&backend);

        table.clear_all().unwrap();
        assert!(table.load().unwrap().is_empty());
        assert_eq!(backend.contents(DataFile::Streaks).as_deref(), Some(""));
    }

    #[test]
    fn active_streaks_threshold_is_inclusive() {
        let streaks: Streaks = [
            ("A".to_string(), 2),
            ("B".to_string(), 3),
            ("C".to_string(), 11),
        ]
        .into_iter()
        .collect();
        let tasks = names(&["C", "A", "B", "C"]);

        let active = active_streaks(&streaks, &tasks, DEFAULT_DISPLAY_THRESHOLD);
        assert_eq!(
            active,
            vec![
                ActiveStreak {
                    habit: "C".to_string(),
                    days: 11
                },
                ActiveStreak {
                    habit: "B".to_string(),
                    days: 3
                },
            ]
        );
    }

    #[test]
    fn highlight_is_strictly_above_threshold() {
        assert!(!is_highlighted(10, DEFAULT_HIGHLIGHT_THRESHOLD));
        assert!(is_highlighted(11, DEFAULT_HIGHLIGHT_THRESHOLD));
    }
}
