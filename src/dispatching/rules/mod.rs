//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Arrival-based**: FCFS
//! - **Work-based**: SJF, SRTF, LRTF
//! - **Aging**: HRRN
//!
//! # Score Convention
//! All rules return lower scores for higher priority processes.

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::Process;

// ======================== Arrival-based rules ========================

/// First Come First Served.
///
/// Prioritizes the process that arrived earliest.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl DispatchingRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        process.arrival_time as f64
    }
}

// ======================== Work-based rules ========================

/// Shortest Job First.
///
/// Prioritizes the process with the least work left. Under non-preemptive
/// dispatch this equals the full duration.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl DispatchingRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        process.remaining_time as f64
    }
}

/// Shortest Remaining Time First.
///
/// Re-evaluated every tick by the preemptive engine.
#[derive(Debug, Clone, Copy)]
pub struct Srtf;

impl DispatchingRule for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        process.remaining_time as f64
    }
}

/// Longest Remaining Time First.
#[derive(Debug, Clone, Copy)]
pub struct Lrtf;

impl DispatchingRule for Lrtf {
    fn name(&self) -> &'static str {
        "LRTF"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        -(process.remaining_time as f64)
    }
}

// ======================== Aging rules ========================

/// Highest Response Ratio Next.
///
/// Response ratio = `((t - arrival) + duration) / duration`. Long waits
/// raise the ratio, so long jobs cannot starve behind a stream of short
/// ones. Depends on the current tick.
#[derive(Debug, Clone, Copy)]
pub struct Hrrn;

impl DispatchingRule for Hrrn {
    fn name(&self) -> &'static str {
        "HRRN"
    }

    fn evaluate(&self, process: &Process, context: &SchedulingContext) -> RuleScore {
        -process.response_ratio(context.current_tick)
    }
}
