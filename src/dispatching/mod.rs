//! Dispatching rules and rule engine.
//!
//! Provides the priority rules behind the classical disciplines (FCFS, SJF,
//! HRRN, SRTF, LRTF) and a rule engine that picks one process from the
//! eligible set.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{RuleEngine, SchedulingContext};
//! use u_cpusched::dispatching::rules;
//! use u_cpusched::models::Process;
//!
//! let processes = vec![Process::new("long", 8, 0), Process::new("short", 2, 0)];
//! let engine = RuleEngine::new().with_rule(rules::Sjf);
//!
//! let best = engine.select_best(&processes, &[0, 1], &SchedulingContext::at_tick(0));
//! assert_eq!(best, Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Brinch Hansen (1971), "Short-term scheduling in multiprogramming systems" (HRRN)

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::RuleEngine;

use crate::models::{Discipline, Process};
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = f64;

/// A dispatching rule that evaluates process priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules that prefer large values
/// (LRTF, HRRN) return the negated quantity.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "HRRN").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a process at the current tick.
    fn evaluate(&self, process: &Process, context: &SchedulingContext) -> RuleScore;
}

/// Builds the rule engine that selects processes for a discipline.
///
/// Round-robin rotates over the eligible set in arrival order, so it is
/// backed by the FCFS rule.
pub fn engine_for(discipline: Discipline) -> RuleEngine {
    let engine = RuleEngine::new();
    match discipline {
        Discipline::Fcfs | Discipline::RoundRobin => engine.with_rule(rules::Fcfs),
        Discipline::Sjf => engine.with_rule(rules::Sjf),
        Discipline::Hrrn => engine.with_rule(rules::Hrrn),
        Discipline::Srtf => engine.with_rule(rules::Srtf),
        Discipline::Lrtf => engine.with_rule(rules::Lrtf),
    }
}
