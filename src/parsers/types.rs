use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

use super::patterns::Capture;
use crate::error::LogError;

/// Output columns of a benchmark record, in CSV column order
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Field {
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
    ZoneRead,
    ZoneWritten,
}

impl Field {
    /// Whether the column holds a number that can be aggregated
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Field::Workload)
    }

    /// Whether the column is computed rather than matched in the log text
    pub fn is_derived(&self) -> bool {
        matches!(self, Field::ZoneRead | Field::ZoneWritten)
    }

    /// Display unit for the column
    pub fn unit(&self) -> &'static str {
        match self {
            Field::LoadedThroughput | Field::RunThroughput => "Kops/s",
            Field::DramConsumption => "MB",
            Field::PageSize => "B",
            Field::ZoneRead | Field::ZoneWritten => "pages",
            _ => "",
        }
    }
}

/// One benchmark run extracted from a log section.
///
/// Field declaration order is the CSV column order; it must stay in sync
/// with [`Field`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub workload: String,
    pub threads: u32,
    pub loaded_keys: u64,
    pub running_keys: u64,
    /// Kops/s
    pub loaded_throughput: f64,
    /// Kops/s
    pub run_throughput: f64,
    /// MB
    pub dram_consumption: f64,
    /// Bytes, never zero
    pub page_size: u32,
    pub write_count: u64,
    pub read_count: u64,
    pub filesize: u64,
    /// Logical pages read from the zoned device
    pub zone_read: f64,
    /// Logical pages written to the zoned device
    pub zone_written: f64,
}

impl Record {
    /// Numeric value of a column, `None` for the workload name
    pub fn metric(&self, field: Field) -> Option<f64> {
        let value = match field {
            Field::Workload => return None,
            Field::Threads => f64::from(self.threads),
            Field::LoadedKeys => self.loaded_keys as f64,
            Field::RunningKeys => self.running_keys as f64,
            Field::LoadedThroughput => self.loaded_throughput,
            Field::RunThroughput => self.run_throughput,
            Field::DramConsumption => self.dram_consumption,
            Field::PageSize => f64::from(self.page_size),
            Field::WriteCount => self.write_count as f64,
            Field::ReadCount => self.read_count as f64,
            Field::Filesize => self.filesize as f64,
            Field::ZoneRead => self.zone_read,
            Field::ZoneWritten => self.zone_written,
        };
        Some(value)
    }
}

/// Ordered, non-empty collection of records from one log file
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset, returning `None` when there is nothing to hold
    pub fn new(records: Vec<Record>) -> Option<Self> {
        if records.is_empty() {
            None
        } else {
            Some(Self { records })
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Reasons a run section is discarded
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ExtractError {
    #[error("required field `{0}` not found")]
    MissingField(Capture),

    #[error("field `{field}` has malformed value {value:?}")]
    MalformedField { field: Capture, value: String },

    #[error("page_size is zero, cannot derive `{0}`")]
    ZeroPageSize(Field),
}

impl ExtractError {
    /// Name of the field that caused the failure
    pub fn field_name(&self) -> &'static str {
        match self {
            ExtractError::MissingField(capture) => <&'static str>::from(*capture),
            ExtractError::MalformedField { field, .. } => <&'static str>::from(*field),
            ExtractError::ZeroPageSize(field) => <&'static str>::from(*field),
        }
    }
}

/// A discarded section and why it was discarded
#[derive(Clone, Debug, PartialEq)]
pub struct SectionDiagnostic {
    /// Zero-based index among non-empty sections
    pub section: usize,
    pub error: ExtractError,
}

impl fmt::Display for SectionDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section {}: {}", self.section, self.error)
    }
}

/// Result of parsing one log
#[derive(Clone, Debug)]
pub struct ParseReport {
    pub dataset: Dataset,
    /// Number of non-empty sections scanned
    pub sections: usize,
    pub diagnostics: Vec<SectionDiagnostic>,
}

impl ParseReport {
    pub fn record_count(&self) -> usize {
        self.dataset.records().len()
    }

    pub fn discarded(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Trait for log file parsers
pub trait Parseable {
    fn parse(&self, contents: &str) -> Result<ParseReport, LogError>;
}
