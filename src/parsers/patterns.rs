//! Field patterns for benchmark run sections.
//!
//! Each pattern is searched anywhere in a section, so fragments may appear in
//! any order and on any line. The harness pads counters with `%8lu`, hence the
//! `\s*` around numbers.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};

use super::types::ExtractError;

/// Process-wide pattern table, compiled on first use and never mutated
pub static PATTERNS: LazyLock<PatternSet> = LazyLock::new(PatternSet::standard);

/// Values captured directly from section text
///
/// Declared in record column order so the first failing capture matches the
/// first missing column.
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumIter, IntoStaticStr, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum Capture {
    Workload,
    Threads,
    LoadedKeys,
    RunningKeys,
    LoadedThroughput,
    RunThroughput,
    DramConsumption,
    PageSize,
    WriteCount,
    ReadCount,
    Filesize,
    /// Sectors read, in thousands of 512-byte units
    ZoneReadUnits,
    /// Sectors written, in thousands of 512-byte units
    ZoneWrittenUnits,
}

/// How a captured string is coerced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Real,
}

/// A coerced capture
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(u64),
    Real(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Integer(v) => write!(f, "{}", v),
            Scalar::Real(v) => write!(f, "{}", v),
        }
    }
}

/// Extraction rule for one captured value
#[derive(Clone, Debug)]
pub struct FieldPattern {
    pub capture: Capture,
    pub regex: Regex,
    /// Capture group holding the value
    pub group: usize,
    pub kind: ValueKind,
}

impl FieldPattern {
    fn new(capture: Capture, pattern: &str, group: usize, kind: ValueKind) -> Self {
        Self {
            capture,
            regex: Regex::new(pattern).expect("Invalid field pattern"),
            group,
            kind,
        }
    }

    /// Find the raw captured text in a section
    pub fn find<'s>(&self, section: &'s str) -> Option<&'s str> {
        self.regex
            .captures(section)
            .and_then(|caps| caps.get(self.group))
            .map(|m| m.as_str())
    }

    /// Find and coerce the value, failing on absence or a non-number
    pub fn extract(&self, section: &str) -> Result<Scalar, ExtractError> {
        let raw = self
            .find(section)
            .ok_or(ExtractError::MissingField(self.capture))?;

        let malformed = || ExtractError::MalformedField {
            field: self.capture,
            value: raw.to_string(),
        };

        match self.kind {
            ValueKind::Text => Ok(Scalar::Text(raw.to_string())),
            ValueKind::Integer => raw
                .parse::<u64>()
                .map(Scalar::Integer)
                .map_err(|_| malformed()),
            ValueKind::Real => raw.parse::<f64>().map(Scalar::Real).map_err(|_| malformed()),
        }
    }
}

/// The fixed set of field patterns
#[derive(Clone, Debug)]
pub struct PatternSet {
    patterns: Vec<FieldPattern>,
}

impl PatternSet {
    /// Patterns matching the benchmark harness output
    pub fn standard() -> Self {
        use Capture::*;
        use ValueKind::*;

        let write_read = r"Write_count=\s*(\d+)\s+read_count=\s*(\d+)";
        let zone = r"\[Zone\] Read:\s*(\d+)\s*Units, Written:\s*(\d+)\s*Units";

        Self {
            patterns: vec![
                FieldPattern::new(Workload, r"workload:\s*(\w+),", 1, Text),
                FieldPattern::new(Threads, r"threads:\s*(\d+)", 1, Integer),
                FieldPattern::new(LoadedKeys, r"Load size:\s*(\d+),", 1, Integer),
                FieldPattern::new(RunningKeys, r"Run size:\s*(\d+)", 1, Integer),
                FieldPattern::new(
                    LoadedThroughput,
                    r"Throughput: load,\s*([\d.]+)\s*Kops/s",
                    1,
                    Real,
                ),
                FieldPattern::new(
                    RunThroughput,
                    r"Throughput: run,\s*([\d.]+)\s*Kops/s",
                    1,
                    Real,
                ),
                FieldPattern::new(
                    DramConsumption,
                    r"DRAM consumption:\s*([\d.]+)\s*MB\b",
                    1,
                    Real,
                ),
                FieldPattern::new(PageSize, r"PAGE=\s*(\d+)\s*Bytes", 1, Integer),
                FieldPattern::new(WriteCount, write_read, 1, Integer),
                FieldPattern::new(ReadCount, write_read, 2, Integer),
                FieldPattern::new(Filesize, r"fielsize=\s*(\d+)", 1, Integer),
                FieldPattern::new(ZoneReadUnits, zone, 1, Integer),
                FieldPattern::new(ZoneWrittenUnits, zone, 2, Integer),
            ],
        }
    }

    pub fn get(&self, capture: Capture) -> Option<&FieldPattern> {
        self.patterns.iter().find(|p| p.capture == capture)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldPattern> {
        self.patterns.iter()
    }

    /// Extract one capture, treating an unregistered capture as missing
    pub fn extract(&self, capture: Capture, section: &str) -> Result<Scalar, ExtractError> {
        self.get(capture)
            .ok_or(ExtractError::MissingField(capture))?
            .extract(section)
    }

    pub fn text(&self, capture: Capture, section: &str) -> Result<String, ExtractError> {
        match self.extract(capture, section)? {
            Scalar::Text(s) => Ok(s),
            other => Ok(other.to_string()),
        }
    }

    /// Extract an integer, rejecting values that overflow `T`
    pub fn integer<T: TryFrom<u64>>(
        &self,
        capture: Capture,
        section: &str,
    ) -> Result<T, ExtractError> {
        match self.extract(capture, section)? {
            Scalar::Integer(v) => T::try_from(v).map_err(|_| ExtractError::MalformedField {
                field: capture,
                value: v.to_string(),
            }),
            other => Err(ExtractError::MalformedField {
                field: capture,
                value: other.to_string(),
            }),
        }
    }

    pub fn real(&self, capture: Capture, section: &str) -> Result<f64, ExtractError> {
        match self.extract(capture, section)? {
            Scalar::Real(v) => Ok(v),
            Scalar::Integer(v) => Ok(v as f64),
            other => Err(ExtractError::MalformedField {
                field: capture,
                value: other.to_string(),
            }),
        }
    }
}
