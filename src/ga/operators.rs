//! Genetic operators for process sequencing.
//!
//! Bundles the recombination and mutation operators used by
//! [`SequencingProblem`](super::SequencingProblem) in
//! [`GeneticOperators`], plus generic tournament selection used by the
//! runner.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::ga::operators::GeneticOperators;
//!
//! let ops = GeneticOperators::for_process_count(4);
//! assert!((ops.mutation_rate - 0.25).abs() < 1e-12);
//! ```

use std::cmp::Ordering;

use rand::Rng;

use super::chromosome::{order_crossover, shuffle_mutation, SequenceChromosome};
use super::Individual;

/// Crossover and mutation for sequence chromosomes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneticOperators {
    /// Per-position swap probability.
    pub mutation_rate: f64,
}

impl GeneticOperators {
    /// Operators with the conventional `1 / N` mutation rate.
    pub fn for_process_count(n: usize) -> Self {
        Self {
            mutation_rate: 1.0 / n.max(1) as f64,
        }
    }

    /// Two-point order crossover.
    pub fn crossover<R: Rng>(
        &self,
        p1: &SequenceChromosome,
        p2: &SequenceChromosome,
        rng: &mut R,
    ) -> (SequenceChromosome, SequenceChromosome) {
        order_crossover(p1, p2, rng)
    }

    /// Index-shuffle mutation at the configured rate.
    pub fn mutate<R: Rng>(&self, chromosome: &mut SequenceChromosome, rng: &mut R) {
        shuffle_mutation(chromosome, self.mutation_rate, rng);
    }
}

/// Tournament selection.
///
/// Forms `count` winners; each tournament samples `tournament_size`
/// individuals uniformly with replacement and keeps the fittest (lowest).
/// Returns an empty vector for an empty population.
pub fn tournament_select<I: Individual, R: Rng>(
    population: &[I],
    count: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<I> {
    if population.is_empty() {
        return Vec::new();
    }
    let rounds = tournament_size.max(1);

    (0..count)
        .map(|_| {
            let mut winner = &population[rng.random_range(0..population.len())];
            for _ in 1..rounds {
                let challenger = &population[rng.random_range(0..population.len())];
                if compare_fitness(challenger, winner) == Ordering::Less {
                    winner = challenger;
                }
            }
            winner.clone()
        })
        .collect()
}

/// Orders individuals by fitness, treating NaN as equal.
pub(crate) fn compare_fitness<I: Individual>(a: &I, b: &I) -> Ordering {
    a.fitness()
        .partial_cmp(&b.fitness())
        .unwrap_or(Ordering::Equal)
}
