//! GA configuration.

use serde::{Deserialize, Serialize};

/// Configuration of the genetic process sequencer.
///
/// # Example
///
/// ```
/// use u_cpusched::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_max_generations(40)
///     .with_seed(42)
///     .with_parallel(false);
/// assert_eq!(config.tournament_size, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Generations to evolve.
    pub max_generations: usize,
    /// Probability that a selected pair is recombined.
    pub crossover_rate: f64,
    /// Per-position swap probability. `None` = `1 / N` for N processes.
    pub mutation_rate: Option<f64>,
    /// Individuals sampled per tournament.
    pub tournament_size: usize,
    /// RNG seed. `None` = seeded from the OS, results vary per run.
    pub seed: Option<u64>,
    /// Evaluate each generation's fitness on the rayon pool.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            max_generations: 150,
            crossover_rate: 0.6,
            mutation_rate: None,
            tournament_size: 3,
            seed: None,
            parallel: true,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the per-position mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Mutation rate for a workload of `process_count` processes.
    pub fn effective_mutation_rate(&self, process_count: usize) -> f64 {
        self.mutation_rate
            .unwrap_or_else(|| 1.0 / process_count.max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mutation_rate_is_inverse_n() {
        let config = GaConfig::default();
        assert!((config.effective_mutation_rate(4) - 0.25).abs() < 1e-10);
        assert!((config.effective_mutation_rate(0) - 1.0).abs() < 1e-10);
        assert!((config.with_mutation_rate(0.1).effective_mutation_rate(4) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: GaConfig =
            serde_json::from_str(r#"{"population_size": 20, "seed": 7}"#).unwrap();
        assert_eq!(config.population_size, 20);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_generations, 150);
        assert!(config.parallel);
    }
}
