//! Rule engine for process selection.
//!
//! Composes dispatching rules in sequence: the first rule decides, later
//! rules only break ties, and exact ties keep candidate (registry) order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchingRule, SchedulingContext};
use crate::models::Process;

/// A composable rule engine for process prioritization.
///
/// # Example
/// ```
/// use u_cpusched::dispatching::{RuleEngine, SchedulingContext};
/// use u_cpusched::dispatching::rules;
/// use u_cpusched::models::Process;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Sjf)
///     .with_rule(rules::Fcfs);
///
/// let procs = vec![Process::new("a", 2, 3), Process::new("b", 2, 1)];
/// let ctx = SchedulingContext::at_tick(5);
/// assert_eq!(engine.sort_indices(&procs, &[0, 1], &ctx), vec![1, 0]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// Appends a rule. Rules after the first only break ties.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sorts candidate indices by priority (highest priority first).
    ///
    /// `candidates` index into `processes`. The sort is stable, so equal
    /// candidates keep their given order.
    pub fn sort_indices(
        &self,
        processes: &[Process],
        candidates: &[usize],
        context: &SchedulingContext,
    ) -> Vec<usize> {
        let mut indices = candidates.to_vec();
        indices.sort_by(|&a, &b| self.compare(&processes[a], &processes[b], context));
        indices
    }

    /// Returns the index of the highest-priority candidate.
    pub fn select_best(
        &self,
        processes: &[Process],
        candidates: &[usize],
        context: &SchedulingContext,
    ) -> Option<usize> {
        candidates.iter().copied().reduce(|best, idx| {
            // strictly better only, so the earlier candidate wins ties
            if self.compare(&processes[idx], &processes[best], context) == Ordering::Less {
                idx
            } else {
                best
            }
        })
    }

    fn compare(&self, a: &Process, b: &Process, context: &SchedulingContext) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a, context);
            let score_b = rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("epsilon", &self.epsilon)
            .finish()
    }
}
