use super::patterns::{Capture, PatternSet, PATTERNS};
use super::section::{split_sections, RawSection};
use super::types::{Dataset, ExtractError, ParseReport, Parseable, Record, SectionDiagnostic};
use crate::derived;
use crate::error::LogError;
use crate::normalize::normalize_log_text;

/// Directly extracted fields of one run, before derived metrics
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateRecord {
    pub workload: String,
    pub threads: u32,
    pub loaded_keys: u64,
    pub running_keys: u64,
    pub loaded_throughput: f64,
    pub run_throughput: f64,
    pub dram_consumption: f64,
    pub page_size: u32,
    pub write_count: u64,
    pub read_count: u64,
    pub filesize: u64,
    pub zone_read_units: u64,
    pub zone_written_units: u64,
}

impl CandidateRecord {
    /// Pull every field out of a section, stopping at the first failure
    pub fn extract(patterns: &PatternSet, text: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            workload: patterns.text(Capture::Workload, text)?,
            threads: patterns.integer(Capture::Threads, text)?,
            loaded_keys: patterns.integer(Capture::LoadedKeys, text)?,
            running_keys: patterns.integer(Capture::RunningKeys, text)?,
            loaded_throughput: patterns.real(Capture::LoadedThroughput, text)?,
            run_throughput: patterns.real(Capture::RunThroughput, text)?,
            dram_consumption: patterns.real(Capture::DramConsumption, text)?,
            page_size: patterns.integer(Capture::PageSize, text)?,
            write_count: patterns.integer(Capture::WriteCount, text)?,
            read_count: patterns.integer(Capture::ReadCount, text)?,
            filesize: patterns.integer(Capture::Filesize, text)?,
            zone_read_units: patterns.integer(Capture::ZoneReadUnits, text)?,
            zone_written_units: patterns.integer(Capture::ZoneWrittenUnits, text)?,
        })
    }

    /// Compute derived metrics and produce the final record
    pub fn finish(self) -> Result<Record, ExtractError> {
        let zone =
            derived::zone_traffic(self.zone_read_units, self.zone_written_units, self.page_size)?;

        Ok(Record {
            workload: self.workload,
            threads: self.threads,
            loaded_keys: self.loaded_keys,
            running_keys: self.running_keys,
            loaded_throughput: self.loaded_throughput,
            run_throughput: self.run_throughput,
            dram_consumption: self.dram_consumption,
            page_size: self.page_size,
            write_count: self.write_count,
            read_count: self.read_count,
            filesize: self.filesize,
            zone_read: zone.read,
            zone_written: zone.written,
        })
    }
}

/// Parser for B+Tree benchmark harness logs
#[derive(Clone, Debug)]
pub struct BenchmarkLog {
    patterns: &'static PatternSet,
    strip_ansi: bool,
}

impl Default for BenchmarkLog {
    fn default() -> Self {
        Self {
            patterns: &PATTERNS,
            strip_ansi: true,
        }
    }
}

impl BenchmarkLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable removal of terminal colour codes before matching
    pub fn with_ansi_stripping(mut self, strip_ansi: bool) -> Self {
        self.strip_ansi = strip_ansi;
        self
    }

    /// Turn one section into a complete record
    pub fn extract_section(&self, section: &RawSection<'_>) -> Result<Record, ExtractError> {
        CandidateRecord::extract(self.patterns, section.text)?.finish()
    }
}

impl Parseable for BenchmarkLog {
    fn parse(&self, contents: &str) -> Result<ParseReport, LogError> {
        let text = normalize_log_text(contents, self.strip_ansi);

        let mut records = Vec::new();
        let mut diagnostics = Vec::new();
        let mut sections = 0;

        for section in split_sections(&text) {
            sections += 1;
            match self.extract_section(&section) {
                Ok(record) => {
                    tracing::debug!(
                        section = section.index,
                        workload = %record.workload,
                        threads = record.threads,
                        page_size = record.page_size,
                        "Extracted run section"
                    );
                    records.push(record);
                }
                Err(error) => {
                    tracing::warn!(
                        section = section.index,
                        field = error.field_name(),
                        "Discarding run section: {}",
                        error
                    );
                    diagnostics.push(SectionDiagnostic {
                        section: section.index,
                        error,
                    });
                }
            }
        }

        let dataset = Dataset::new(records).ok_or(LogError::EmptyDataset { sections })?;

        Ok(ParseReport {
            dataset,
            sections,
            diagnostics,
        })
    }
}
