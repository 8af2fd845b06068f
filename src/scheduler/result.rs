//! Simulation output.

use serde::{Deserialize, Serialize};

use super::{ProcessStats, RunStats};
use crate::error::SimResult;
use crate::models::{Algorithm, Process, Timeline};

/// Complete output of one run, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Algorithm that produced this run.
    pub algorithm: Algorithm,
    /// Execution intervals in dispatch order.
    pub timeline: Timeline,
    /// Aggregate waiting/turnaround statistics.
    pub stats: RunStats,
    /// Finished snapshot, with start and end ticks per process.
    pub processes: Vec<Process>,
}

impl SimulationResult {
    pub(crate) fn from_run(
        algorithm: Algorithm,
        processes: Vec<Process>,
        timeline: Timeline,
    ) -> SimResult<Self> {
        let stats = RunStats::calculate(&processes)?;
        Ok(Self {
            algorithm,
            timeline,
            stats,
            processes,
        })
    }

    /// Waiting and turnaround per process, in snapshot order.
    pub fn process_stats(&self) -> SimResult<Vec<ProcessStats>> {
        ProcessStats::calculate(&self.processes)
    }

    /// Finished process by name.
    pub fn process(&self, name: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.name == name)
    }
}
