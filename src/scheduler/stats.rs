//! Run statistics.
//!
//! Derives waiting and turnaround figures from a finished snapshot.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting time | end - arrival - duration |
//! | Turnaround time | end - arrival |
//!
//! Both are reported as mean and median over all processes. The median of
//! an even count is the mean of the two middle values.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::models::Process;

/// Aggregate statistics of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Mean waiting time (ticks).
    pub waiting_mean: f64,
    /// Median waiting time (ticks).
    pub waiting_median: f64,
    /// Mean turnaround time (ticks).
    pub turnaround_mean: f64,
    /// Median turnaround time (ticks).
    pub turnaround_median: f64,
}

/// Waiting and turnaround of a single process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStats {
    /// Process name.
    pub name: String,
    /// Waiting time (ticks).
    pub waiting_time: i64,
    /// Turnaround time (ticks).
    pub turnaround_time: i64,
}

impl ProcessStats {
    /// Per-process statistics, in snapshot order.
    ///
    /// # Errors
    /// [`SimError::Incomplete`] if any process lacks an end time.
    pub fn calculate(processes: &[Process]) -> SimResult<Vec<Self>> {
        processes
            .iter()
            .map(|p| match (p.waiting_time(), p.turnaround_time()) {
                (Some(waiting_time), Some(turnaround_time)) => Ok(ProcessStats {
                    name: p.name.clone(),
                    waiting_time,
                    turnaround_time,
                }),
                _ => Err(SimError::Incomplete {
                    process: p.name.clone(),
                }),
            })
            .collect()
    }
}

impl RunStats {
    /// Computes statistics over a finished snapshot.
    ///
    /// # Errors
    /// - [`SimError::Incomplete`] if any process lacks an end time.
    /// - [`SimError::EmptyWorkload`] for an empty snapshot.
    pub fn calculate(processes: &[Process]) -> SimResult<Self> {
        if processes.is_empty() {
            return Err(SimError::EmptyWorkload);
        }
        let per_process = ProcessStats::calculate(processes)?;

        let waiting: Vec<i64> = per_process.iter().map(|s| s.waiting_time).collect();
        let turnaround: Vec<i64> = per_process.iter().map(|s| s.turnaround_time).collect();

        Ok(Self {
            waiting_mean: mean(&waiting),
            waiting_median: median(&waiting),
            turnaround_mean: mean(&turnaround),
            turnaround_median: median(&turnaround),
        })
    }

    /// Values in report order: waiting mean, waiting median, turnaround
    /// mean, turnaround median.
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.waiting_mean,
            self.waiting_median,
            self.turnaround_mean,
            self.turnaround_median,
        ]
    }
}

fn mean(values: &[i64]) -> f64 {
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

fn median(values: &[i64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(name: &str, duration: i64, arrival: i64, end: i64) -> Process {
        let mut p = Process::new(name, duration, arrival);
        p.execute(duration, end);
        p
    }

    #[test]
    fn test_stats_basic() {
        // waits: 0, 3, 4 ; turnarounds: 5, 6, 10
        let procs = vec![
            finished("A", 5, 0, 5),
            finished("B", 3, 2, 8),
            finished("C", 6, 4, 14),
        ];
        let stats = RunStats::calculate(&procs).unwrap();
        assert!((stats.waiting_mean - 7.0 / 3.0).abs() < 1e-10);
        assert!((stats.waiting_median - 3.0).abs() < 1e-10);
        assert!((stats.turnaround_mean - 7.0).abs() < 1e-10);
        assert!((stats.turnaround_median - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_even_median() {
        let procs = vec![finished("A", 5, 0, 5), finished("B", 3, 0, 8)];
        let stats = RunStats::calculate(&procs).unwrap();
        // waits 0, 5 → 2.5 ; turnarounds 5, 8 → 6.5
        assert!((stats.waiting_median - 2.5).abs() < 1e-10);
        assert!((stats.turnaround_median - 6.5).abs() < 1e-10);
        assert_eq!(stats.as_array()[3], stats.turnaround_median);
    }

    #[test]
    fn test_incomplete_run_fails() {
        let procs = vec![finished("A", 5, 0, 5), Process::new("B", 3, 0)];
        assert_eq!(
            RunStats::calculate(&procs),
            Err(SimError::Incomplete {
                process: "B".into()
            })
        );
    }

    #[test]
    fn test_empty_snapshot_fails() {
        assert_eq!(RunStats::calculate(&[]), Err(SimError::EmptyWorkload));
    }

    #[test]
    fn test_process_stats() {
        let procs = vec![finished("A", 4, 2, 10)];
        let stats = ProcessStats::calculate(&procs).unwrap();
        assert_eq!(
            stats,
            vec![ProcessStats {
                name: "A".into(),
                waiting_time: 4,
                turnaround_time: 8,
            }]
        );
    }
}
