//! Timeline (run output) model.
//!
//! A timeline records which process held the CPU over which interval.
//! Entries are appended in dispatch order, which is not necessarily
//! end-tick order: preemptive disciplines close a burst only when they
//! switch away from it.

use serde::{Deserialize, Serialize};

/// One uninterrupted execution interval `[start, end)` of a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Executing process.
    pub process_name: String,
    /// First tick of the interval.
    pub start: i64,
    /// Tick after the last executed work unit.
    pub end: i64,
    /// Arrival tick of the process (denormalized for the chart layer).
    pub arrival_time: i64,
}

impl TimelineEntry {
    /// Creates a new entry.
    pub fn new(process_name: impl Into<String>, start: i64, end: i64, arrival_time: i64) -> Self {
        Self {
            process_name: process_name.into(),
            start,
            end,
            arrival_time,
        }
    }

    /// Interval length in ticks.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Append-only sequence of execution intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: TimelineEntry) {
        self.entries.push(entry);
    }

    /// Entries in dispatch order.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in dispatch order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimelineEntry> {
        self.entries.iter()
    }

    /// All entries of one process, in dispatch order.
    pub fn entries_for(&self, process_name: &str) -> Vec<&TimelineEntry> {
        self.entries
            .iter()
            .filter(|e| e.process_name == process_name)
            .collect()
    }

    /// Latest end tick, or 0 for an empty timeline.
    pub fn makespan(&self) -> i64 {
        self.entries.iter().map(|e| e.end).max().unwrap_or(0)
    }

    /// Sum of all entry durations (CPU busy time).
    pub fn busy_time(&self) -> i64 {
        self.entries.iter().map(TimelineEntry::duration).sum()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineEntry;
    type IntoIter = std::slice::Iter<'a, TimelineEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
