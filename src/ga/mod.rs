//! Evolutionary process sequencing.
//!
//! Searches over process orders with a generational genetic algorithm and
//! replays the best order found as a sequential run.
//!
//! # Encoding
//!
//! A chromosome is a permutation of snapshot indices giving the execution
//! order. Every operator preserves permutation validity.
//!
//! # Operators
//!
//! - Two-point order crossover
//! - Index-shuffle mutation (per-position swap, default rate `1 / N`)
//! - Tournament selection (default size 3)
//! - Elitism of size one: the best individual ever seen is kept
//!
//! # Submodules
//!
//! - [`operators`]: Crossover, mutation and selection operators
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"
//! - Oliver et al. (1987), "A study of permutation crossover operators on the TSP"

mod chromosome;
mod config;
pub mod operators;
mod optimizer;
mod problem;
mod runner;

pub use chromosome::{order_crossover, shuffle_mutation, SequenceChromosome};
pub use config::GaConfig;
pub use optimizer::EvolutionaryOptimizer;
pub use problem::SequencingProblem;
pub use runner::{GaProblem, GaResult, GaRunner, Individual};
