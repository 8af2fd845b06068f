//! Simulation domain models.
//!
//! Provides the data types for describing a CPU workload and the output of
//! a simulated run.
//!
//! # Domain Mappings
//!
//! | u-cpusched | Operating system | Batch queue |
//! |------------|------------------|-------------|
//! | Process | Process/thread | Job |
//! | ProcessRegistry | Ready-queue population | Submitted jobs |
//! | Timeline | CPU Gantt chart | Execution log |
//! | Discipline | Scheduler policy | Queue policy |

mod discipline;
mod process;
mod registry;
mod timeline;

pub use discipline::{Algorithm, Discipline};
pub use process::Process;
pub use registry::{EmptyWorkload, ProcessRegistry, PLACEHOLDER_NAME};
pub use timeline::{Timeline, TimelineEntry};
