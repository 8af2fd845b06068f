//! Generational GA loop.
//!
//! # Algorithm
//!
//! 1. Create and evaluate `population_size` random individuals.
//! 2. Per generation: tournament selection → pairwise crossover with
//!    probability `crossover_rate` → mutation of every offspring →
//!    re-evaluation → elite update.
//! 3. The best individual ever seen (hall of fame of size 1) is returned,
//!    whatever its fitness.
//!
//! Fitness evaluation within a generation is independent per individual
//! and fans out over rayon when `parallel` is set. Randomness is drawn
//! only on the calling thread, so a seeded run is reproducible with or
//! without parallel evaluation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use super::operators::{compare_fitness, tournament_select};
use super::GaConfig;
use crate::error::{SimError, SimResult};
use crate::scheduler::CancellationToken;
use crate::validation::validate_ga_config;

/// A candidate solution with a scalar fitness (lower = better).
pub trait Individual: Clone + Send + Sync {
    /// Current fitness.
    fn fitness(&self) -> f64;

    /// Stores an evaluated fitness.
    fn set_fitness(&mut self, fitness: f64);
}

/// Problem definition consumed by [`GaRunner`].
pub trait GaProblem: Sync {
    /// Candidate solution type.
    type Individual: Individual;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Computes fitness (lower = better). Must be pure.
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Recombines two parents into offspring.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> Vec<Self::Individual>;

    /// Mutates an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rng: &mut R);
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I> {
    /// Best individual ever seen.
    pub best: I,
    /// Fitness of `best`.
    pub best_fitness: f64,
    /// Generations evolved.
    pub generations: usize,
    /// Elite fitness after initialization and after each generation.
    pub history: Vec<f64>,
}

/// Runs the generational GA.
pub struct GaRunner;

impl GaRunner {
    /// Runs with an RNG seeded from `config.seed` (or the OS).
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> SimResult<GaResult<P::Individual>> {
        Self::run_with_cancellation(problem, config, None)
    }

    /// Runs with an optional cancellation token, checked once per generation.
    pub fn run_with_cancellation<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<&CancellationToken>,
    ) -> SimResult<GaResult<P::Individual>> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::run_with_rng(problem, config, cancel, &mut rng)
    }

    /// Runs with an injected random source.
    ///
    /// # Errors
    /// - [`SimError::Invalid`] for an unusable configuration.
    /// - [`SimError::Cancelled`] if the token fires between generations.
    pub fn run_with_rng<P: GaProblem, R: Rng>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<&CancellationToken>,
        rng: &mut R,
    ) -> SimResult<GaResult<P::Individual>> {
        validate_ga_config(config)?;

        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(rng))
            .collect();
        evaluate_population(problem, &mut population, config.parallel);

        let mut best = fittest(&population)
            .cloned()
            .ok_or_else(|| SimError::Invalid(Vec::new()))?;
        let mut history = Vec::with_capacity(config.max_generations + 1);
        history.push(best.fitness());

        for generation in 0..config.max_generations {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                debug!(generation, "GA cancelled");
                return Err(SimError::Cancelled);
            }

            let mut offspring = tournament_select(
                &population,
                config.population_size,
                config.tournament_size,
                rng,
            );

            for pair in offspring.chunks_exact_mut(2) {
                if rng.random_bool(config.crossover_rate) {
                    let mut children = problem.crossover(&pair[0], &pair[1], rng).into_iter();
                    if let (Some(a), Some(b)) = (children.next(), children.next()) {
                        pair[0] = a;
                        pair[1] = b;
                    }
                }
            }
            for individual in offspring.iter_mut() {
                problem.mutate(individual, rng);
            }
            evaluate_population(problem, &mut offspring, config.parallel);

            if let Some(candidate) = fittest(&offspring) {
                if candidate.fitness() < best.fitness() {
                    best = candidate.clone();
                }
            }
            population = offspring;
            history.push(best.fitness());

            debug!(generation, best_fitness = best.fitness(), "generation evolved");
        }

        info!(
            generations = config.max_generations,
            best_fitness = best.fitness(),
            "GA finished"
        );
        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations: config.max_generations,
            history,
        })
    }
}

fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) {
    if parallel {
        population.par_iter_mut().for_each(|individual| {
            let fitness = problem.evaluate(individual);
            individual.set_fitness(fitness);
        });
    } else {
        for individual in population.iter_mut() {
            let fitness = problem.evaluate(individual);
            individual.set_fitness(fitness);
        }
    }
}

fn fittest<I: Individual>(population: &[I]) -> Option<&I> {
    population.iter().min_by(|a, b| compare_fitness(*a, *b))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimizes |x - 10| over integers; crossover averages, mutation nudges.
    struct Target;

    #[derive(Debug, Clone)]
    struct Num {
        x: i64,
        fitness: f64,
    }

    impl Individual for Num {
        fn fitness(&self) -> f64 {
            self.fitness
        }
        fn set_fitness(&mut self, fitness: f64) {
            self.fitness = fitness;
        }
    }

    impl GaProblem for Target {
        type Individual = Num;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Num {
            Num {
                x: rng.random_range(-100..100),
                fitness: f64::INFINITY,
            }
        }

        fn evaluate(&self, individual: &Num) -> f64 {
            (individual.x - 10).abs() as f64
        }

        fn crossover<R: Rng>(&self, a: &Num, b: &Num, _rng: &mut R) -> Vec<Num> {
            let mid = (a.x + b.x) / 2;
            vec![
                Num { x: mid, fitness: f64::INFINITY },
                Num { x: mid, fitness: f64::INFINITY },
            ]
        }

        fn mutate<R: Rng>(&self, individual: &mut Num, rng: &mut R) {
            individual.x += rng.random_range(-2..=2);
        }
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_converges_and_history_monotone() {
        let result = GaRunner::run(&Target, &config()).unwrap();
        assert_eq!(result.generations, 40);
        assert_eq!(result.history.len(), 41);
        assert!(result.best_fitness <= 2.0);
        assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let a = GaRunner::run(&Target, &config()).unwrap();
        let b = GaRunner::run(&Target, &config().with_parallel(true)).unwrap();
        assert_eq!(a.best.x, b.best.x);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_zero_generations_returns_initial_elite() {
        let result = GaRunner::run(&Target, &config().with_max_generations(0)).unwrap();
        assert_eq!(result.generations, 0);
        assert_eq!(result.history.len(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = GaRunner::run(&Target, &config().with_population_size(0)).unwrap_err();
        assert!(matches!(err, SimError::Invalid(_)));
    }

    #[test]
    fn test_cancelled_between_generations() {
        let token = CancellationToken::new();
        token.cancel();
        let err = GaRunner::run_with_cancellation(&Target, &config(), Some(&token)).unwrap_err();
        assert_eq!(err, SimError::Cancelled);
    }
}
