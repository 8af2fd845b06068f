//! CPU scheduling simulator.
//!
//! Simulates how a single CPU would serve a workload of processes under the
//! classical scheduling disciplines, and searches for a low-waiting process
//! order with a genetic algorithm. Every run reports a timeline of execution
//! intervals plus waiting and turnaround statistics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessRegistry`, `Timeline`,
//!   `Discipline`, `Algorithm`
//! - **`dispatching`**: Priority rules (FCFS, SJF, HRRN, SRTF, LRTF) and the
//!   rule engine that picks the next process
//! - **`scheduler`**: Discrete-time engine for the six classical disciplines,
//!   run statistics, cancellation
//! - **`ga`**: Permutation GA for process sequencing
//! - **`simulator`**: Facade owning the registry; `run`, `run_ga`, `run_all`
//! - **`workload`**: `name,duration,arrival_time` record parsing
//! - **`validation`**: Input integrity checks at the registry and option boundary
//!
//! # Architecture
//!
//! The registry is the single source of truth. Each run deep-copies it into
//! a private snapshot, so runs are independent and may execute concurrently.
//! Rendering, charting and file dialogs are left to the caller; this crate
//! returns plain data that serializes with serde.
//!
//! # Example
//!
//! ```
//! use u_cpusched::models::Discipline;
//! use u_cpusched::scheduler::RunOptions;
//! use u_cpusched::Simulator;
//!
//! let mut sim = Simulator::new();
//! sim.add("A", 4, 0).unwrap();
//! sim.add("B", 2, 1).unwrap();
//!
//! let result = sim.run(Discipline::Srtf, &RunOptions::default()).unwrap();
//! assert_eq!(result.timeline.len(), 3);
//! assert_eq!(result.process("B").unwrap().end_time, Some(3));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts"
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"

pub mod dispatching;
pub mod error;
pub mod ga;
pub mod models;
pub mod scheduler;
pub mod simulator;
pub mod validation;
pub mod workload;

pub use error::{SimError, SimResult};
pub use simulator::{CompareOptions, Simulator};
