//! Discrete-event scheduling engine.
//!
//! # Clock Model
//!
//! A single integer tick counter starts at 0. At each decision point the
//! engine computes the **eligible set**: processes with
//! `arrival_time <= t` and work left. An empty set moves the clock to the
//! next pending arrival (idle-time skipping).
//!
//! # Families
//!
//! 1. **Non-preemptive** (FCFS, SJF, HRRN): the selected process runs to
//!    completion in one atomic step.
//! 2. **Remaining-time-first** (SRTF, LRTF): one tick per step; switching
//!    away from a process closes its current burst as one timeline entry.
//! 3. **Round-robin**: rotates over the eligible set in arrival order,
//!    running each process for at most one quantum. Slices are never
//!    merged.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{CancellationToken, SimulationResult};
use crate::dispatching::{engine_for, RuleEngine, SchedulingContext};
use crate::error::{SimError, SimResult};
use crate::models::{Discipline, Process, Timeline, TimelineEntry};
use crate::validation::{validate_run_options, validate_workload};

/// Default round-robin quantum.
pub const DEFAULT_QUANTUM: u32 = 3;

/// Options for the classical disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// Round-robin time slice in ticks (ignored by other disciplines).
    pub quantum: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }
}

impl RunOptions {
    /// Sets the round-robin quantum.
    pub fn with_quantum(mut self, quantum: u32) -> Self {
        self.quantum = quantum;
        self
    }
}

/// Runs one classical discipline over a process snapshot.
///
/// # Example
///
/// ```
/// use u_cpusched::models::{Discipline, Process};
/// use u_cpusched::scheduler::{RunOptions, SchedulingEngine};
///
/// let snapshot = vec![Process::new("A", 5, 0), Process::new("B", 3, 0)];
/// let engine = SchedulingEngine::new().with_options(RunOptions::default().with_quantum(3));
///
/// let result = engine.run(Discipline::RoundRobin, snapshot).unwrap();
/// assert_eq!(result.timeline.len(), 3);
/// assert_eq!(result.timeline.makespan(), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchedulingEngine {
    options: RunOptions,
    cancel: Option<CancellationToken>,
}

impl SchedulingEngine {
    /// Creates an engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the run options.
    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Attaches a cancellation token, checked once per tick.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Current options.
    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Simulates `discipline` over `processes` until every process finishes.
    ///
    /// The snapshot is consumed; the finished processes are returned in the
    /// result.
    ///
    /// # Errors
    /// - [`SimError::Invalid`] for a zero quantum or a workload whose time
    ///   horizon overflows the clock.
    /// - [`SimError::EmptyWorkload`] for an empty snapshot.
    /// - [`SimError::Cancelled`] if the token fires mid-run.
    pub fn run(&self, discipline: Discipline, processes: Vec<Process>) -> SimResult<SimulationResult> {
        validate_run_options(&self.options)?;
        if processes.is_empty() {
            return Err(SimError::EmptyWorkload);
        }
        validate_workload(&processes)?;

        let rules = engine_for(discipline);
        let mut state = RunState::new(processes, self.cancel.as_ref());
        match discipline {
            Discipline::Fcfs | Discipline::Sjf | Discipline::Hrrn => {
                state.run_non_preemptive(&rules)?
            }
            Discipline::Srtf | Discipline::Lrtf => state.run_remaining_time_first(&rules)?,
            Discipline::RoundRobin => {
                state.run_round_robin(&rules, i64::from(self.options.quantum))?
            }
        }

        info!(
            algorithm = discipline.id(),
            makespan = state.timeline.makespan(),
            entries = state.timeline.len(),
            "simulation finished"
        );
        SimulationResult::from_run(discipline.into(), state.processes, state.timeline)
    }
}

/// Mutable state of one run: the snapshot, its timeline and the clock.
struct RunState<'a> {
    processes: Vec<Process>,
    timeline: Timeline,
    tick: i64,
    cancel: Option<&'a CancellationToken>,
}

impl<'a> RunState<'a> {
    fn new(mut processes: Vec<Process>, cancel: Option<&'a CancellationToken>) -> Self {
        // Zero-work processes finish on arrival and never hold the CPU.
        for p in processes.iter_mut().filter(|p| p.is_finished()) {
            if p.end_time.is_none() {
                debug!(process = %p.name, "process has no work, finishing on arrival");
                p.remaining_time = 0;
                p.end_time = Some(p.arrival_time);
            }
        }

        Self {
            processes,
            timeline: Timeline::new(),
            tick: 0,
            cancel,
        }
    }

    fn is_done(&self) -> bool {
        self.processes.iter().all(Process::is_finished)
    }

    fn context(&self) -> SchedulingContext {
        SchedulingContext::at_tick(self.tick)
    }

    fn checkpoint(&self) -> SimResult<()> {
        match self.cancel {
            Some(token) if token.is_cancelled() => {
                debug!(tick = self.tick, "simulation cancelled");
                Err(SimError::Cancelled)
            }
            _ => Ok(()),
        }
    }

    /// Indices of eligible processes, idling the clock until one exists.
    ///
    /// An idle CPU jumps straight to the next pending arrival.
    fn eligible(&mut self) -> SimResult<Vec<usize>> {
        loop {
            self.checkpoint()?;
            let candidates: Vec<usize> = self
                .processes
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_eligible(self.tick))
                .map(|(idx, _)| idx)
                .collect();
            if !candidates.is_empty() {
                return Ok(candidates);
            }

            let next_arrival = self
                .processes
                .iter()
                .filter(|p| !p.is_finished())
                .map(|p| p.arrival_time)
                .min();
            match next_arrival {
                Some(arrival) if arrival > self.tick => {
                    debug!(from = self.tick, to = arrival, "cpu idle");
                    self.tick = arrival;
                }
                _ => return Ok(candidates),
            }
        }
    }

    fn select(&mut self, rules: &RuleEngine) -> SimResult<Option<usize>> {
        let candidates = self.eligible()?;
        Ok(rules.select_best(&self.processes, &candidates, &self.context()))
    }

    // ======================== Non-preemptive ========================

    fn run_non_preemptive(&mut self, rules: &RuleEngine) -> SimResult<()> {
        while !self.is_done() {
            let Some(idx) = self.select(rules)? else {
                break;
            };
            let work = self.processes[idx].remaining_time;
            self.dispatch(idx, work);
        }
        Ok(())
    }

    /// Runs `processes[idx]` for `units` ticks as one timeline entry.
    fn dispatch(&mut self, idx: usize, units: i64) {
        let start = self.tick;
        let p = &mut self.processes[idx];
        debug!(process = %p.name, start, units, "dispatch");

        self.timeline
            .push(TimelineEntry::new(&p.name, start, start + units, p.arrival_time));
        p.mark_started(start);
        self.tick += units;
        p.execute(units, self.tick);
    }

    // ======================== Remaining-time-first ========================

    fn run_remaining_time_first(&mut self, rules: &RuleEngine) -> SimResult<()> {
        let mut latest: Option<usize> = None;

        while !self.is_done() {
            let Some(current) = self.select(rules)? else {
                break;
            };
            if let Some(previous) = latest.filter(|&prev| prev != current) {
                self.close_burst(previous);
            }
            self.step(current);
            latest = Some(current);
        }

        // The last burst never switches away, so it is flushed here.
        if let Some(last) = latest {
            self.close_burst(last);
        }
        Ok(())
    }

    /// Executes one tick of `processes[idx]`, extending its current burst.
    fn step(&mut self, idx: usize) {
        let tick = self.tick;
        let p = &mut self.processes[idx];
        p.mark_started(tick);
        if p.row_start_time.is_none() {
            p.row_start_time = Some(tick);
        }
        p.row += 1;
        self.tick += 1;
        p.execute(1, self.tick);
    }

    /// Records the open burst of `processes[idx]` and resets it.
    fn close_burst(&mut self, idx: usize) {
        let p = &mut self.processes[idx];
        if let Some(start) = p.row_start_time.take() {
            if p.row > 0 {
                debug!(process = %p.name, start, units = p.row, "burst closed");
                self.timeline
                    .push(TimelineEntry::new(&p.name, start, start + p.row, p.arrival_time));
            }
        }
        p.row = 0;
    }

    // ======================== Round-robin ========================

    fn run_round_robin(&mut self, rules: &RuleEngine, quantum: i64) -> SimResult<()> {
        let mut processed: HashSet<usize> = HashSet::new();

        while !self.is_done() {
            let candidates = self.eligible()?;
            let ordered = rules.sort_indices(&self.processes, &candidates, &self.context());

            let current = match ordered.iter().find(|idx| !processed.contains(idx)) {
                Some(&idx) => idx,
                None => {
                    // Everyone eligible had a turn: start a new cycle.
                    processed.clear();
                    let Some(&first) = ordered.first() else {
                        break;
                    };
                    first
                }
            };

            let slice = quantum.min(self.processes[current].remaining_time);
            self.dispatch(current, slice);
            processed.insert(current);
        }
        Ok(())
    }
}
