//! Simulator facade.
//!
//! Owns the process registry and hands every run its own snapshot. This is
//! the surface a presentation layer talks to.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SimResult;
use crate::ga::{EvolutionaryOptimizer, GaConfig};
use crate::models::{Algorithm, Discipline, EmptyWorkload, ProcessRegistry};
use crate::scheduler::{CancellationToken, RunOptions, RunStats, SchedulingEngine, SimulationResult};
use crate::workload::WorkloadWarning;

/// Options for [`Simulator::run_all`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Options for the classical disciplines.
    pub run: RunOptions,
    /// Options for the evolutionary sequencer.
    pub ga: GaConfig,
}

impl CompareOptions {
    /// Sets the classical run options.
    pub fn with_run(mut self, run: RunOptions) -> Self {
        self.run = run;
        self
    }

    /// Sets the GA configuration.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }
}

/// Process registry plus the run entry points.
///
/// # Example
///
/// ```
/// use u_cpusched::models::Discipline;
/// use u_cpusched::scheduler::RunOptions;
/// use u_cpusched::simulator::Simulator;
///
/// let mut sim = Simulator::new();
/// sim.add("A", 5, 0).unwrap();
/// sim.add("B", 3, 0).unwrap();
///
/// let result = sim.run(Discipline::RoundRobin, &RunOptions::default()).unwrap();
/// let spans: Vec<_> = result.timeline.iter().map(|e| (e.start, e.end)).collect();
/// assert_eq!(spans, vec![(0, 3), (3, 6), (6, 8)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    registry: ProcessRegistry,
    cancel: Option<CancellationToken>,
}

impl Simulator {
    /// Creates a simulator with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing registry.
    pub fn with_registry(registry: ProcessRegistry) -> Self {
        Self {
            registry,
            cancel: None,
        }
    }

    /// Sets the registry's empty-workload policy.
    pub fn with_empty_policy(mut self, policy: EmptyWorkload) -> Self {
        self.registry = self.registry.with_empty_policy(policy);
        self
    }

    /// Attaches a cancellation token shared by every subsequent run.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The process registry.
    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    /// Mutable access to the process registry.
    pub fn registry_mut(&mut self) -> &mut ProcessRegistry {
        &mut self.registry
    }

    /// Adds or replaces a process.
    pub fn add(&mut self, name: impl Into<String>, duration: i64, arrival_time: i64) -> SimResult<()> {
        self.registry.add(name, duration, arrival_time)
    }

    /// Removes a process by name. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.registry.remove(name).is_some()
    }

    /// Removes every process.
    pub fn clear(&mut self) {
        self.registry.clear();
    }

    /// Loads `name,duration,arrival_time` records into the registry.
    pub fn load_workload(&mut self, input: &str) -> Vec<WorkloadWarning> {
        self.registry.load_workload(input)
    }

    /// Runs one classical discipline on a fresh snapshot.
    pub fn run(&self, discipline: Discipline, options: &RunOptions) -> SimResult<SimulationResult> {
        let mut engine = SchedulingEngine::new().with_options(*options);
        if let Some(token) = &self.cancel {
            engine = engine.with_cancellation(token.clone());
        }
        engine.run(discipline, self.registry.snapshot()?)
    }

    /// Runs a classical discipline given its string id (`fcfs`, `rr`, ...).
    pub fn run_by_id(&self, id: &str, options: &RunOptions) -> SimResult<SimulationResult> {
        self.run(id.parse()?, options)
    }

    /// Runs the evolutionary sequencer on a fresh snapshot.
    pub fn run_ga(&self, config: &GaConfig) -> SimResult<SimulationResult> {
        let mut optimizer = EvolutionaryOptimizer::new().with_config(config.clone());
        if let Some(token) = &self.cancel {
            optimizer = optimizer.with_cancellation(token.clone());
        }
        optimizer.run(self.registry.snapshot()?)
    }

    /// Runs any algorithm.
    pub fn run_algorithm(&self, algorithm: Algorithm, options: &CompareOptions) -> SimResult<SimulationResult> {
        match algorithm.discipline() {
            Some(discipline) => self.run(discipline, &options.run),
            None => self.run_ga(&options.ga),
        }
    }

    /// Runs every algorithm, each on its own snapshot, and returns the
    /// aggregate statistics keyed by algorithm.
    ///
    /// Algorithms run concurrently on the rayon pool. The first failure
    /// aborts the comparison.
    pub fn run_all(&self, options: &CompareOptions) -> SimResult<BTreeMap<Algorithm, RunStats>> {
        let stats = Algorithm::ALL
            .par_iter()
            .map(|&algorithm| {
                self.run_algorithm(algorithm, options)
                    .map(|result| (algorithm, result.stats))
            })
            .collect::<SimResult<BTreeMap<_, _>>>()?;

        info!(algorithms = stats.len(), processes = self.registry.len(), "comparison finished");
        Ok(stats)
    }
}
