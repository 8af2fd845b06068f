//! Algorithm identifiers.
//!
//! [`Discipline`] names the six classical dispatch disciplines run by the
//! scheduling engine; [`Algorithm`] adds the evolutionary sequencer and
//! keys the comparison report.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// A classical dispatch discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    /// First Come First Served (non-preemptive).
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Highest Response Ratio Next (non-preemptive).
    Hrrn,
    /// Shortest Remaining Time First (preemptive).
    Srtf,
    /// Longest Remaining Time First (preemptive).
    Lrtf,
    /// Round Robin with a fixed quantum.
    #[serde(rename = "rr")]
    RoundRobin,
}

impl Discipline {
    /// All disciplines in report order.
    pub const ALL: [Discipline; 6] = [
        Discipline::Fcfs,
        Discipline::Sjf,
        Discipline::Hrrn,
        Discipline::Srtf,
        Discipline::Lrtf,
        Discipline::RoundRobin,
    ];

    /// Short id (e.g., "fcfs", "rr").
    pub fn id(&self) -> &'static str {
        Algorithm::from(*self).id()
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        Algorithm::from(*self).title()
    }

    /// Whether the running process can be displaced before it finishes.
    pub fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Discipline::Srtf | Discipline::Lrtf | Discipline::RoundRobin
        )
    }
}

/// Any algorithm the simulator can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// First Come First Served.
    Fcfs,
    /// Shortest Job First.
    Sjf,
    /// Highest Response Ratio Next.
    Hrrn,
    /// Shortest Remaining Time First.
    Srtf,
    /// Longest Remaining Time First.
    Lrtf,
    /// Round Robin.
    #[serde(rename = "rr")]
    RoundRobin,
    /// Genetic-algorithm process sequencing.
    #[serde(rename = "ea")]
    Evolutionary,
}

impl Algorithm {
    /// All algorithms in report order.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Hrrn,
        Algorithm::Srtf,
        Algorithm::Lrtf,
        Algorithm::RoundRobin,
        Algorithm::Evolutionary,
    ];

    /// Short id used as the comparison-report key.
    pub fn id(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::Hrrn => "hrrn",
            Algorithm::Srtf => "srtf",
            Algorithm::Lrtf => "lrtf",
            Algorithm::RoundRobin => "rr",
            Algorithm::Evolutionary => "ea",
        }
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "First Come First Served",
            Algorithm::Sjf => "Shortest Job First",
            Algorithm::Hrrn => "Highest Response Ratio Next",
            Algorithm::Srtf => "Shortest Remaining Time First",
            Algorithm::Lrtf => "Longest Remaining Time First",
            Algorithm::RoundRobin => "Round Robin",
            Algorithm::Evolutionary => "Evolutionary Algorithm",
        }
    }

    /// The classical discipline, or `None` for the evolutionary sequencer.
    pub fn discipline(&self) -> Option<Discipline> {
        match self {
            Algorithm::Fcfs => Some(Discipline::Fcfs),
            Algorithm::Sjf => Some(Discipline::Sjf),
            Algorithm::Hrrn => Some(Discipline::Hrrn),
            Algorithm::Srtf => Some(Discipline::Srtf),
            Algorithm::Lrtf => Some(Discipline::Lrtf),
            Algorithm::RoundRobin => Some(Discipline::RoundRobin),
            Algorithm::Evolutionary => None,
        }
    }
}

impl From<Discipline> for Algorithm {
    fn from(d: Discipline) -> Self {
        match d {
            Discipline::Fcfs => Algorithm::Fcfs,
            Discipline::Sjf => Algorithm::Sjf,
            Discipline::Hrrn => Algorithm::Hrrn,
            Discipline::Srtf => Algorithm::Srtf,
            Discipline::Lrtf => Algorithm::Lrtf,
            Discipline::RoundRobin => Algorithm::RoundRobin,
        }
    }
}

impl FromStr for Algorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SimError::UnknownAlgorithm(s.to_string()))
    }
}

impl FromStr for Discipline {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Algorithm>()?
            .discipline()
            .ok_or_else(|| SimError::UnknownAlgorithm(s.to_string()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        assert_eq!("fcfs".parse::<Discipline>().unwrap(), Discipline::Fcfs);
        assert_eq!("RR".parse::<Discipline>().unwrap(), Discipline::RoundRobin);
        assert_eq!("ea".parse::<Algorithm>().unwrap(), Algorithm::Evolutionary);
    }

    #[test]
    fn test_evolutionary_is_not_a_discipline() {
        assert_eq!(
            "ea".parse::<Discipline>(),
            Err(SimError::UnknownAlgorithm("ea".into()))
        );
        assert!("mlfq".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_ids_round_trip() {
        for a in Algorithm::ALL {
            assert_eq!(a.id().parse::<Algorithm>().unwrap(), a);
        }
        for d in Discipline::ALL {
            assert_eq!(Algorithm::from(d).discipline(), Some(d));
        }
    }

    #[test]
    fn test_preemptive_flags() {
        assert!(!Discipline::Fcfs.is_preemptive());
        assert!(!Discipline::Hrrn.is_preemptive());
        assert!(Discipline::Srtf.is_preemptive());
        assert!(Discipline::RoundRobin.is_preemptive());
    }
}
