//! Error taxonomy for the simulator.
//!
//! Failures are concentrated at the input boundary (registry mutation,
//! option parsing). Once a run has started the algorithms are total over a
//! valid snapshot; the only remaining exits are cancellation and asking for
//! statistics of a run that never completed.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by registry mutation, option validation and runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// One or more inputs failed validation.
    #[error("invalid input: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),

    /// The registry holds no processes and the placeholder policy is off.
    #[error("empty workload: the process registry has no processes")]
    EmptyWorkload,

    /// Statistics were requested for a process that never finished.
    #[error("simulation not complete: process '{process}' has no end time")]
    Incomplete {
        /// Name of the unfinished process.
        process: String,
    },

    /// The run observed its cancellation token.
    #[error("simulation cancelled")]
    Cancelled,

    /// An algorithm id did not match any known discipline.
    #[error("unknown algorithm id '{0}'")]
    UnknownAlgorithm(String),
}

impl From<Vec<ValidationError>> for SimError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimError::Invalid(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;
