//! Process registry.
//!
//! The authoritative, operator-configured set of processes. Every run
//! takes its own deep-copied snapshot, so runs never observe each other's
//! mutations and the registry itself is never touched by a simulation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Process;
use crate::error::{SimError, SimResult};
use crate::validation::validate_process;
use crate::workload::{parse_workload, WorkloadWarning, WorkloadWarningKind};

/// Name of the placeholder process used by [`EmptyWorkload::Placeholder`].
pub const PLACEHOLDER_NAME: &str = "null";

/// What a snapshot of an empty registry yields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyWorkload {
    /// Fail with [`SimError::EmptyWorkload`].
    #[default]
    Reject,
    /// Substitute a single process `null` (duration 1, arrival 0).
    Placeholder,
}

/// Ordered collection of processes, keyed by name.
///
/// Insertion order is the tie-break order used by the dispatching rules.
#[derive(Debug, Clone, Default)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
    empty_policy: EmptyWorkload,
}

impl ProcessRegistry {
    /// Creates an empty registry with the default (rejecting) empty policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the empty-workload policy.
    pub fn with_empty_policy(mut self, policy: EmptyWorkload) -> Self {
        self.empty_policy = policy;
        self
    }

    /// Current empty-workload policy.
    pub fn empty_policy(&self) -> EmptyWorkload {
        self.empty_policy
    }

    /// Adds a process, replacing any process with the same name in place.
    ///
    /// # Errors
    /// [`SimError::Invalid`] for an empty name, `duration <= 0` or a
    /// negative arrival time.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        duration: i64,
        arrival_time: i64,
    ) -> SimResult<()> {
        self.add_process(Process::new(name, duration, arrival_time))
    }

    /// Adds a prebuilt process. Its run state is reset.
    pub fn add_process(&mut self, process: Process) -> SimResult<()> {
        validate_process(&process.name, process.duration, process.arrival_time)?;
        let process = Process::new(process.name, process.duration, process.arrival_time);

        match self.processes.iter_mut().find(|p| p.name == process.name) {
            Some(existing) => *existing = process,
            None => self.processes.push(process),
        }
        Ok(())
    }

    /// Removes a process by name, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Process> {
        let idx = self.processes.iter().position(|p| p.name == name)?;
        Some(self.processes.remove(idx))
    }

    /// Removes every process.
    pub fn clear(&mut self) {
        self.processes.clear();
    }

    /// Looks up a process by name.
    pub fn get(&self, name: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.name == name)
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Processes in insertion order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Deep copy of the registry for one run.
    ///
    /// # Errors
    /// [`SimError::EmptyWorkload`] if the registry is empty and the policy
    /// is [`EmptyWorkload::Reject`].
    pub fn snapshot(&self) -> SimResult<Vec<Process>> {
        if !self.processes.is_empty() {
            return Ok(self.processes.clone());
        }
        match self.empty_policy {
            EmptyWorkload::Reject => Err(SimError::EmptyWorkload),
            EmptyWorkload::Placeholder => {
                warn!("process registry is empty, substituting placeholder process");
                Ok(vec![Process::new(PLACEHOLDER_NAME, 1, 0)])
            }
        }
    }

    /// Loads `name,duration,arrival_time` records into the registry.
    ///
    /// Records that cannot be parsed or fail validation are skipped and
    /// reported; the rest are added (replacing by name).
    pub fn load_workload(&mut self, input: &str) -> Vec<WorkloadWarning> {
        let parsed = parse_workload(input);
        let mut warnings = parsed.warnings;

        for record in parsed.records {
            let line = record.line;
            if let Err(SimError::Invalid(errors)) =
                self.add(record.name, record.duration, record.arrival_time)
            {
                for error in errors {
                    warn!(line, reason = %error, "rejected workload record");
                    warnings.push(WorkloadWarning {
                        line,
                        kind: WorkloadWarningKind::Rejected(error),
                    });
                }
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_replace_by_name() {
        let mut reg = ProcessRegistry::new();
        reg.add("A", 5, 0).unwrap();
        reg.add("B", 3, 1).unwrap();
        reg.add("A", 7, 2).unwrap();

        assert_eq!(reg.len(), 2);
        // replacement keeps the existing position
        assert_eq!(reg.processes()[0].name, "A");
        assert_eq!(reg.get("A").unwrap().duration, 7);
        assert_eq!(reg.get("A").unwrap().arrival_time, 2);
    }

    #[test]
    fn test_add_rejects_invalid() {
        let mut reg = ProcessRegistry::new();
        assert!(matches!(reg.add("A", 0, 0), Err(SimError::Invalid(_))));
        assert!(matches!(reg.add("A", 3, -1), Err(SimError::Invalid(_))));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_add_process_resets_run_state() {
        let mut p = Process::new("A", 4, 0);
        p.execute(4, 4);
        let mut reg = ProcessRegistry::new();
        reg.add_process(p).unwrap();
        assert_eq!(reg.get("A").unwrap().remaining_time, 4);
        assert_eq!(reg.get("A").unwrap().end_time, None);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut reg = ProcessRegistry::new();
        reg.add("A", 5, 0).unwrap();
        reg.add("B", 3, 0).unwrap();

        assert_eq!(reg.remove("A").map(|p| p.name), Some("A".to_string()));
        assert!(reg.remove("A").is_none());
        assert_eq!(reg.len(), 1);

        reg.clear();
        assert!(reg.is_empty());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut reg = ProcessRegistry::new();
        reg.add("A", 5, 0).unwrap();

        let mut snap = reg.snapshot().unwrap();
        snap[0].execute(5, 5);

        assert_eq!(reg.get("A").unwrap().remaining_time, 5);
        assert_eq!(reg.snapshot().unwrap()[0].end_time, None);
    }

    #[test]
    fn test_empty_snapshot_rejected_by_default() {
        let reg = ProcessRegistry::new();
        assert_eq!(reg.snapshot(), Err(SimError::EmptyWorkload));
    }

    #[test]
    fn test_empty_snapshot_placeholder() {
        let reg = ProcessRegistry::new().with_empty_policy(EmptyWorkload::Placeholder);
        let snap = reg.snapshot().unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].name, PLACEHOLDER_NAME);
        assert_eq!(snap[0].duration, 1);
        assert_eq!(snap[0].arrival_time, 0);
    }

    #[test]
    fn test_load_workload_reports_rejections() {
        let mut reg = ProcessRegistry::new();
        let warnings = reg.load_workload("name,duration,arrival\nA,5,0\nB,0,1\nC,2\n");

        assert_eq!(reg.len(), 1);
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .any(|w| w.line == 3 && matches!(w.kind, WorkloadWarningKind::Rejected(_))));
        assert!(warnings
            .iter()
            .any(|w| w.line == 4 && w.kind == WorkloadWarningKind::TooFewFields(2)));
    }
}
