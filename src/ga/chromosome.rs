//! Permutation chromosome for process sequencing.
//!
//! # Encoding
//!
//! A chromosome is a permutation of snapshot indices: `order[k] = i` means
//! process `i` runs k-th. Processes are matched by index, which is their
//! identity since names are unique within a snapshot.
//!
//! # Reference
//! Davis (1985), "Applying adaptive algorithms to epistatic domains" (OX)

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::Individual;

/// Process-order chromosome.
///
/// Lower fitness = better ordering (minimization convention).
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceChromosome {
    /// Execution order as snapshot indices.
    pub order: Vec<usize>,
    /// Fitness value (lower = better).
    pub fitness: f64,
}

impl Individual for SequenceChromosome {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl SequenceChromosome {
    /// Wraps an explicit order (unevaluated).
    pub fn from_order(order: Vec<usize>) -> Self {
        Self {
            order,
            fitness: f64::INFINITY,
        }
    }

    /// Creates a uniformly random permutation of `0..n`.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        Self::from_order(order)
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `order` is a permutation of `0..n` (no duplicates, no gaps).
    pub fn is_valid(&self, n: usize) -> bool {
        if self.order.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &gene in &self.order {
            if gene >= n || seen[gene] {
                return false;
            }
            seen[gene] = true;
        }
        true
    }
}

// ======================== Crossover ========================

/// Two-point order-preserving crossover.
///
/// Picks `index1 < index2`; child 1 keeps parent 1's segment
/// `[index1, index2]` in place and fills the other positions with the
/// remaining genes in parent 2's order. Child 2 is built symmetrically.
/// Both children are valid permutations.
pub fn order_crossover<R: Rng>(
    p1: &SequenceChromosome,
    p2: &SequenceChromosome,
    rng: &mut R,
) -> (SequenceChromosome, SequenceChromosome) {
    let len = p1.len().min(p2.len());
    if len < 2 {
        return (
            SequenceChromosome::from_order(p1.order.clone()),
            SequenceChromosome::from_order(p2.order.clone()),
        );
    }

    let (start, end) = two_points(len, rng);
    let child1 = build_child(&p1.order, &p2.order, start, end);
    let child2 = build_child(&p2.order, &p1.order, start, end);
    (
        SequenceChromosome::from_order(child1),
        SequenceChromosome::from_order(child2),
    )
}

/// Two distinct cut points, ordered.
fn two_points<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..len);
    let mut b = rng.random_range(0..len - 1);
    if b >= a {
        b += 1;
    }
    (a.min(b), a.max(b))
}

fn build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let segment: HashSet<usize> = template[start..=end].iter().copied().collect();
    let mut fill = donor.iter().copied().filter(|gene| !segment.contains(gene));

    let mut child = Vec::with_capacity(template.len());
    for (pos, &gene) in template.iter().enumerate() {
        if (start..=end).contains(&pos) {
            child.push(gene);
        } else if let Some(next) = fill.next() {
            child.push(next);
        }
    }
    child
}

// ======================== Mutation ========================

/// Index-shuffle mutation.
///
/// Each position is, with independent probability `rate`, swapped with a
/// different uniformly chosen position.
pub fn shuffle_mutation<R: Rng>(chromosome: &mut SequenceChromosome, rate: f64, rng: &mut R) {
    let len = chromosome.order.len();
    if len < 2 {
        return;
    }
    let mut mutated = false;
    for i in 0..len {
        if rng.random_bool(rate) {
            let mut j = rng.random_range(0..len - 1);
            if j >= i {
                j += 1;
            }
            chromosome.order.swap(i, j);
            mutated = true;
        }
    }
    if mutated {
        chromosome.fitness = f64::INFINITY;
    }
}
