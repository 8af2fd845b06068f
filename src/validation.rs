//! Input validation at the simulator boundary.
//!
//! Checks process definitions and run configuration before a run starts.
//! Detects:
//! - Empty process names
//! - Non-positive durations and negative arrival times
//! - A zero round-robin quantum
//! - Out-of-range GA rates and sizes
//! - Workloads whose time horizon does not fit the integer clock
//!
//! Every validator collects all problems it finds instead of stopping at
//! the first one.

use thiserror::Error;

use crate::ga::GaConfig;
use crate::models::Process;
use crate::scheduler::RunOptions;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A process has an empty (or whitespace-only) name.
    EmptyName,
    /// A process duration is zero or negative.
    NonPositiveDuration,
    /// A process arrives before tick 0.
    NegativeArrival,
    /// Round-robin quantum is zero.
    InvalidQuantum,
    /// A probability lies outside `[0, 1]`.
    InvalidRate,
    /// A GA population, generation count or tournament size is unusable.
    InvalidSize,
    /// Total work plus the latest arrival overflows the tick counter.
    HorizonOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process definition before it enters the registry.
pub fn validate_process(name: &str, duration: i64, arrival_time: i64) -> ValidationResult {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyName,
            "Process name is empty",
        ));
    }
    if duration <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveDuration,
            format!("Process '{name}' has non-positive duration {duration}"),
        ));
    }
    if arrival_time < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeArrival,
            format!("Process '{name}' has negative arrival time {arrival_time}"),
        ));
    }

    finish(errors)
}

/// Validates that a snapshot can be simulated without clock overflow.
///
/// The horizon is the total work plus the latest arrival; every tick,
/// waiting time and statistic sum of a run is bounded by a small multiple
/// of it. The check requires `3 * (n + 1) * horizon` to fit in `i64`.
pub fn validate_workload(processes: &[Process]) -> ValidationResult {
    let horizon = processes
        .iter()
        .try_fold(0_i64, |work, p| work.checked_add(p.duration.max(0)))
        .and_then(|work| {
            let latest = processes
                .iter()
                .map(|p| p.arrival_time.unsigned_abs())
                .max()
                .unwrap_or(0);
            work.checked_add(i64::try_from(latest).ok()?)
        });
    let bounded = horizon.and_then(|h| {
        let factor = i64::try_from(processes.len()).ok()?.checked_add(1)?.checked_mul(3)?;
        h.checked_mul(factor)
    });

    if bounded.is_some() {
        Ok(())
    } else {
        Err(vec![ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            format!(
                "Workload of {} processes exceeds the simulated time range",
                processes.len()
            ),
        )])
    }
}

/// Validates options for the classical disciplines.
pub fn validate_run_options(options: &RunOptions) -> ValidationResult {
    let mut errors = Vec::new();
    if options.quantum == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            "Round-robin quantum must be at least 1",
        ));
    }
    finish(errors)
}

/// Validates a GA configuration.
///
/// Checks:
/// 1. Population size of at least 2 (crossover needs pairs)
/// 2. Tournament size of at least 1
/// 3. Crossover and mutation rates within `[0, 1]`
pub fn validate_ga_config(config: &GaConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.population_size < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSize,
            format!(
                "Population size must be at least 2, got {}",
                config.population_size
            ),
        ));
    }
    if config.tournament_size == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSize,
            "Tournament size must be at least 1",
        ));
    }
    if !(0.0..=1.0).contains(&config.crossover_rate) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidRate,
            format!("Crossover rate {} is outside [0, 1]", config.crossover_rate),
        ));
    }
    if let Some(rate) = config.mutation_rate {
        if !(0.0..=1.0).contains(&rate) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRate,
                format!("Mutation rate {rate} is outside [0, 1]"),
            ));
        }
    }

    finish(errors)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
