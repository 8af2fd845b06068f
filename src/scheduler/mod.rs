//! Classical scheduling engine and run statistics.
//!
//! Provides the discrete-event engine for the six classical disciplines,
//! the statistics calculator, and cooperative cancellation.
//!
//! # Algorithm
//!
//! `SchedulingEngine` steps an integer clock over a private snapshot of the
//! workload, asking the discipline's rule engine which eligible process
//! runs next. Non-preemptive disciplines run the choice to completion,
//! remaining-time-first disciplines re-decide every tick, and round-robin
//! rotates with a fixed quantum.
//!
//! # Statistics
//!
//! `RunStats` computes mean and median waiting and turnaround time from the
//! finished snapshot.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod cancel;
mod engine;
mod result;
mod stats;

pub use cancel::CancellationToken;
pub use engine::{RunOptions, SchedulingEngine, DEFAULT_QUANTUM};
pub use result::SimulationResult;
pub use stats::{ProcessStats, RunStats};
