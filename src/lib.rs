//! benchlog - benchmark log extraction for B+Tree storage experiments
//!
//! This library turns the free-text logs written by the B+Tree benchmark
//! harness into fixed-schema CSV tables, one row per run section.
//!
//! ## Module Structure
//!
//! - [`parsers`] - Section splitting, field patterns and record extraction
//! - [`derived`] - Metrics computed from extracted fields (zone page traffic)
//! - [`normalize`] - Log text clean-up before matching (terminal colour codes)
//! - [`export`] - CSV sink and source for datasets
//! - [`convert`] - Single-file log-to-table conversion
//! - [`batch`] - Directory-wide conversion
//! - [`pivot`] - Workload x threads comparison tables for charting
//! - [`settings`] - Persistent settings
//! - [`cli`] - Command-line interface
//! - [`error`] - Pipeline error types

pub mod batch;
pub mod cli;
pub mod convert;
pub mod derived;
pub mod error;
pub mod export;
pub mod normalize;
pub mod parsers;
pub mod pivot;
pub mod settings;

pub use error::LogError;
pub use parsers::{BenchmarkLog, Dataset, Field, ParseReport, Parseable, Record};
