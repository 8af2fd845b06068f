//! Process model.
//!
//! A process is one schedulable unit of CPU work: a fixed amount of work
//! units that becomes eligible at its arrival tick.
//!
//! # Time Representation
//! All times are integer ticks relative to the start of the simulation
//! (t=0). A process with `arrival_time = 42` joins the eligible set once
//! the clock reaches 42.

use serde::{Deserialize, Serialize};

/// A schedulable process together with its per-run state.
///
/// The immutable inputs are `name`, `duration` and `arrival_time`. The
/// remaining fields are mutated only on a snapshot owned by a single run.
///
/// # Invariants
/// - `0 <= remaining_time <= duration` for valid processes
/// - finished ⇔ `remaining_time <= 0`
/// - `starting_time` and `end_time` are set at most once
/// - `end_time >= arrival_time + duration`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process name within a registry.
    pub name: String,
    /// Total work units.
    pub duration: i64,
    /// Tick at which the process becomes eligible.
    pub arrival_time: i64,
    /// Work units left.
    pub remaining_time: i64,
    /// Tick of the first dispatch. `None` = never dispatched.
    pub starting_time: Option<i64>,
    /// Tick at which the last work unit completed. `None` = unfinished.
    pub end_time: Option<i64>,
    /// Length of the current uninterrupted burst (preemptive disciplines).
    #[serde(skip)]
    pub(crate) row: i64,
    /// Start tick of the current burst.
    #[serde(skip)]
    pub(crate) row_start_time: Option<i64>,
}

impl Process {
    /// Creates a process in its initial run state.
    pub fn new(name: impl Into<String>, duration: i64, arrival_time: i64) -> Self {
        Self {
            name: name.into(),
            duration,
            arrival_time,
            remaining_time: duration,
            starting_time: None,
            end_time: None,
            row: 0,
            row_start_time: None,
        }
    }

    /// Whether all work units have been executed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_time <= 0
    }

    /// Whether the process competes for the CPU at `tick`.
    #[inline]
    pub fn is_eligible(&self, tick: i64) -> bool {
        self.arrival_time <= tick && !self.is_finished()
    }

    /// Response ratio at `tick`: `((tick - arrival) + duration) / duration`.
    pub fn response_ratio(&self, tick: i64) -> f64 {
        let waited = (tick - self.arrival_time) as f64;
        (waited + self.duration as f64) / self.duration as f64
    }

    /// Executes `units` work units, the last of which completes at
    /// `current_time`.
    pub(crate) fn execute(&mut self, units: i64, current_time: i64) {
        self.remaining_time -= units;
        if self.is_finished() && self.end_time.is_none() {
            self.remaining_time = 0;
            self.end_time = Some(current_time);
        }
    }

    /// Marks the first dispatch, leaving an earlier one untouched.
    pub(crate) fn mark_started(&mut self, tick: i64) {
        if self.starting_time.is_none() {
            self.starting_time = Some(tick);
        }
    }

    /// Time spent eligible but not executing. `None` until finished.
    pub fn waiting_time(&self) -> Option<i64> {
        self.end_time
            .map(|end| end - self.arrival_time - self.duration)
    }

    /// Time from arrival to completion. `None` until finished.
    pub fn turnaround_time(&self) -> Option<i64> {
        self.end_time.map(|end| end - self.arrival_time)
    }
}
