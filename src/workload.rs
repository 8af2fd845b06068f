//! Workload ingestion.
//!
//! Parses `name,duration,arrival_time` records. The first record is a
//! header and is skipped; blank lines are ignored. Malformed records are
//! never dropped silently: each one yields a [`WorkloadWarning`] and a
//! `warn!` event.

use tracing::warn;

use crate::validation::ValidationError;

/// One parsed workload record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadRecord {
    /// 1-based source line.
    pub line: usize,
    /// Process name.
    pub name: String,
    /// Work units.
    pub duration: i64,
    /// Arrival tick.
    pub arrival_time: i64,
}

/// A record that was skipped, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadWarning {
    /// 1-based source line.
    pub line: usize,
    /// Reason.
    pub kind: WorkloadWarningKind,
}

/// Reasons a workload record is skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkloadWarningKind {
    /// Fewer than three fields (carries the field count).
    TooFewFields(usize),
    /// A numeric field is not an integer.
    InvalidNumber {
        /// Field name (`duration` or `arrival_time`).
        field: &'static str,
        /// Raw field text.
        value: String,
    },
    /// Parsed, but rejected by registry validation.
    Rejected(ValidationError),
}

/// Parsed workload: accepted records plus warnings for skipped ones.
#[derive(Debug, Clone, Default)]
pub struct ParsedWorkload {
    /// Well-formed records in input order.
    pub records: Vec<WorkloadRecord>,
    /// Skipped records.
    pub warnings: Vec<WorkloadWarning>,
}

/// Parses workload text.
///
/// Fields beyond the third are ignored. Fields are trimmed.
pub fn parse_workload(input: &str) -> ParsedWorkload {
    let mut parsed = ParsedWorkload::default();

    for (idx, raw) in input.lines().enumerate().skip(1) {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
        if fields.len() < 3 {
            warn!(line, fields = fields.len(), "workload record has too few fields");
            parsed.warnings.push(WorkloadWarning {
                line,
                kind: WorkloadWarningKind::TooFewFields(fields.len()),
            });
            continue;
        }

        let duration = parse_field(fields[1], "duration");
        let arrival_time = parse_field(fields[2], "arrival_time");
        match (duration, arrival_time) {
            (Ok(duration), Ok(arrival_time)) => parsed.records.push(WorkloadRecord {
                line,
                name: fields[0].to_string(),
                duration,
                arrival_time,
            }),
            (Err(kind), _) | (_, Err(kind)) => {
                warn!(line, reason = ?kind, "workload record has an invalid number");
                parsed.warnings.push(WorkloadWarning { line, kind });
            }
        }
    }

    parsed
}

fn parse_field(value: &str, field: &'static str) -> Result<i64, WorkloadWarningKind> {
    value
        .parse::<i64>()
        .map_err(|_| WorkloadWarningKind::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_skipped() {
        let parsed = parse_workload("name,duration,arrival_time\na,11,0\nb,17,0\n");
        assert_eq!(parsed.records.len(), 2);
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.records[0].name, "a");
        assert_eq!(parsed.records[1].duration, 17);
        assert_eq!(parsed.records[1].line, 3);
    }

    #[test]
    fn test_fields_trimmed_and_extra_ignored() {
        let parsed = parse_workload("h\n x , 19 , 57 , extra\r\n");
        assert_eq!(
            parsed.records,
            vec![WorkloadRecord {
                line: 2,
                name: "x".into(),
                duration: 19,
                arrival_time: 57,
            }]
        );
    }

    #[test]
    fn test_short_record_warned() {
        let parsed = parse_workload("h\na,1\n\nb,2,3\n");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(
            parsed.warnings,
            vec![WorkloadWarning {
                line: 2,
                kind: WorkloadWarningKind::TooFewFields(2),
            }]
        );
    }

    #[test]
    fn test_invalid_number_warned() {
        let parsed = parse_workload("h\na,five,0\n");
        assert!(parsed.records.is_empty());
        assert_eq!(
            parsed.warnings[0].kind,
            WorkloadWarningKind::InvalidNumber {
                field: "duration",
                value: "five".into(),
            }
        );
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse_workload("");
        assert!(parsed.records.is_empty());
        assert!(parsed.warnings.is_empty());
    }
}
