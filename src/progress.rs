//! Progress log: one completion count per elapsed day in `progress.txt`.
//!
//! Append-only. Line N is day N of the history.

use serde::Serialize;

use crate::error::Result;
use crate::storage::{content_lines, Backend, DataFile};

/// Maximum number of labelled days on the chart's X axis
const MAX_X_LABELS: usize = 15;

/// Parse one sample line; anything but a non-negative integer is rejected.
pub fn parse_sample(line: &str) -> Option<u32> {
    line.trim().parse().ok()
}

pub fn parse_samples(content: &str) -> Vec<u32> {
    content_lines(content).filter_map(parse_sample).collect()
}

pub struct ProgressLog<'a> {
    backend: &'a dyn Backend,
}

impl<'a> ProgressLog<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self { backend }
    }

    pub fn append(&self, count: u32) -> Result<()> {
        self.append_all(&[count])
    }

    /// Append several samples with a single write.
    pub fn append_all(&self, counts: &[u32]) -> Result<()> {
        if counts.is_empty() {
            return Ok(());
        }
        let lines: String = counts.iter().map(|count| format!("{count}\n")).collect();
        self.backend.append(DataFile::Progress, &lines)
    }

    pub fn read_all(&self) -> Result<Vec<u32>> {
        Ok(self
            .backend
            .read(DataFile::Progress)?
            .map(|content| parse_samples(&content))
            .unwrap_or_default())
    }
}

/// Aggregates over the whole history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub days: usize,
    pub total: u64,
    pub min: u32,
    pub max: u32,
    pub average: f64,
    /// 1-based day index of the first day reaching `max`
    pub best_day: usize,
}

pub fn summarize(samples: &[u32]) -> Option<ProgressSummary> {
    let min = *samples.iter().min()?;
    let max = *samples.iter().max()?;
    let total: u64 = samples.iter().map(|&s| u64::from(s)).sum();
    let best_day = samples.iter().position(|&s| s == max)? + 1;

    Some(ProgressSummary {
        days: samples.len(),
        total,
        min,
        max,
        average: total as f64 / samples.len() as f64,
        best_day,
    })
}

/// Axis scaling for a progress chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartScale {
    pub y_min: u32,
    /// Always above `y_min`, so a flat history still gets a range
    pub y_max: u32,
    /// Label every `x_label_step`-th day
    pub x_label_step: usize,
}

impl ChartScale {
    pub fn for_samples(samples: &[u32]) -> Option<Self> {
        let y_min = *samples.iter().min()?;
        let mut y_max = *samples.iter().max()?;
        if y_max == y_min {
            y_max += 1;
        }

        let days = samples.len();
        let x_label_step = if days <= MAX_X_LABELS {
            1
        } else {
            (days / MAX_X_LABELS).max(1)
        };

        Some(Self {
            y_min,
            y_max,
            x_label_step,
        })
    }

    /// Whether the 0-based day `index` gets an axis label
    pub fn labels_day(&self, index: usize) -> bool {
        index % self.x_label_step == 0
    }

    /// Scale a sample onto `0..=width`
    pub fn bar_len(&self, sample: u32, width: usize) -> usize {
        let span = f64::from(self.y_max - self.y_min);
        let offset = f64::from(sample.saturating_sub(self.y_min));
        ((offset / span) * width as f64).round() as usize
    }
}
