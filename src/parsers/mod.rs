pub mod benchmark;
pub mod patterns;
pub mod section;
pub mod types;

pub use benchmark::BenchmarkLog;
pub use types::{Dataset, Field, ParseReport, Parseable, Record};
