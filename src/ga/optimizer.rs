//! Evolutionary sequencer entry point.

use tracing::info;

use super::chromosome::SequenceChromosome;
use super::{GaConfig, GaResult, GaRunner, SequencingProblem};
use crate::error::{SimError, SimResult};
use crate::models::{Algorithm, Process};
use crate::scheduler::{CancellationToken, SimulationResult};
use crate::validation::validate_workload;

/// Searches for a low-waiting process order and replays it.
///
/// The best order found is executed sequentially, idling until each
/// process arrives, and reported like any other run.
///
/// # Example
///
/// ```
/// use u_cpusched::ga::{EvolutionaryOptimizer, GaConfig};
/// use u_cpusched::models::Process;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(10)
///     .with_seed(42);
/// let result = EvolutionaryOptimizer::new()
///     .with_config(config)
///     .run(vec![Process::new("A", 4, 0), Process::new("B", 1, 0)])
///     .unwrap();
/// assert_eq!(result.timeline.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EvolutionaryOptimizer {
    config: GaConfig,
    cancel: Option<CancellationToken>,
}

impl EvolutionaryOptimizer {
    /// Creates an optimizer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the GA configuration.
    pub fn with_config(mut self, config: GaConfig) -> Self {
        self.config = config;
        self
    }

    /// Attaches a cancellation token, checked between generations.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Evolves an order for `processes` and replays the elite.
    pub fn run(&self, processes: Vec<Process>) -> SimResult<SimulationResult> {
        self.run_detailed(processes).map(|(result, _)| result)
    }

    /// Like [`run`](Self::run), also returning the raw GA outcome.
    ///
    /// # Errors
    /// - [`SimError::EmptyWorkload`] for an empty snapshot.
    /// - [`SimError::Invalid`] for an unusable configuration or a workload
    ///   whose time horizon overflows the clock.
    /// - [`SimError::Cancelled`] if the token fires.
    pub fn run_detailed(
        &self,
        processes: Vec<Process>,
    ) -> SimResult<(SimulationResult, GaResult<SequenceChromosome>)> {
        if processes.is_empty() {
            return Err(SimError::EmptyWorkload);
        }
        validate_workload(&processes)?;

        let rate = self.config.effective_mutation_rate(processes.len());
        let problem = SequencingProblem::new(processes).with_mutation_rate(rate);
        let outcome = GaRunner::run_with_cancellation(&problem, &self.config, self.cancel.as_ref())?;

        let (finished, timeline) = problem.decode(&outcome.best);
        info!(
            best_fitness = outcome.best_fitness,
            makespan = timeline.makespan(),
            "evolutionary sequencing finished"
        );
        let result = SimulationResult::from_run(Algorithm::Evolutionary, finished, timeline)?;
        Ok((result, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(20)
            .with_max_generations(15)
            .with_seed(42)
    }

    fn workload() -> Vec<Process> {
        vec![
            Process::new("A", 6, 0),
            Process::new("B", 2, 1),
            Process::new("C", 3, 2),
            Process::new("D", 1, 4),
        ]
    }

    #[test]
    fn test_run_completes_every_process() {
        let result = EvolutionaryOptimizer::new()
            .with_config(small_config())
            .run(workload())
            .unwrap();

        assert_eq!(result.algorithm, Algorithm::Evolutionary);
        assert_eq!(result.timeline.len(), 4);
        assert_eq!(result.timeline.busy_time(), 12);
        for p in &result.processes {
            assert_eq!(p.remaining_time, 0);
            let end = p.end_time.unwrap();
            assert!(end >= p.arrival_time + p.duration);
        }
    }

    #[test]
    fn test_seeded_runs_match() {
        let optimizer = EvolutionaryOptimizer::new().with_config(small_config());
        let a = optimizer.run(workload()).unwrap();
        let b = optimizer.run(workload()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_detailed_history() {
        let (_, outcome) = EvolutionaryOptimizer::new()
            .with_config(small_config())
            .run_detailed(workload())
            .unwrap();
        assert_eq!(outcome.history.len(), 16);
        assert!(outcome.best.is_valid(4));
    }

    #[test]
    fn test_single_process() {
        let result = EvolutionaryOptimizer::new()
            .with_config(small_config())
            .run(vec![Process::new("solo", 5, 3)])
            .unwrap();
        let entry = &result.timeline.entries()[0];
        assert_eq!((entry.start, entry.end), (3, 8));
        assert_eq!(result.stats.waiting_mean, 0.0);
    }

    #[test]
    fn test_horizon_overflow_rejected() {
        let huge = i64::MAX / 2 + 1;
        let err = EvolutionaryOptimizer::new()
            .with_config(small_config())
            .run(vec![Process::new("A", huge, 0), Process::new("B", huge, 0)])
            .unwrap_err();
        assert!(matches!(err, SimError::Invalid(_)));
    }

    #[test]
    fn test_empty_rejected() {
        let err = EvolutionaryOptimizer::new().run(Vec::new()).unwrap_err();
        assert_eq!(err, SimError::EmptyWorkload);
    }

    #[test]
    fn test_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let err = EvolutionaryOptimizer::new()
            .with_config(small_config())
            .with_cancellation(token)
            .run(workload())
            .unwrap_err();
        assert_eq!(err, SimError::Cancelled);
    }
}
