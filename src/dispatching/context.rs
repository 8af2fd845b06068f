//! Scheduling context for dispatching rule evaluation.

/// Runtime scheduling state passed to dispatching rules.
///
/// Rules such as HRRN depend on the current clock, so the context is
/// rebuilt at every decision point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulingContext {
    /// Current simulation tick.
    pub current_tick: i64,
}

impl SchedulingContext {
    /// Creates a context at the given tick.
    pub fn at_tick(current_tick: i64) -> Self {
        Self { current_tick }
    }
}
