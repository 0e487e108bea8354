//! CSV sink and source for datasets.
//!
//! The header row comes from the [`Record`] field names, so column order is
//! fixed by the struct declaration. Reals are written in shortest round-trip
//! form (`125.0`), integers without a decimal point.

use std::fs;
use std::io;
use std::path::Path;

use strum::IntoEnumIterator;

use crate::error::LogError;
use crate::parsers::types::{Dataset, Field, Record};

/// Column names in output order
pub fn header() -> Vec<String> {
    Field::iter().map(|f| f.to_string()).collect()
}

/// Serialize a dataset as CSV into any writer
pub fn write_dataset<W: io::Write>(dataset: &Dataset, writer: W) -> Result<(), csv::Error> {
    // Non-flexible: a row whose width differs from the header is an error
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_writer(writer);

    for record in dataset {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render a dataset to a CSV string
pub fn to_csv_string(dataset: &Dataset) -> Result<String, LogError> {
    let mut buffer = Vec::new();
    write_dataset(dataset, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Write a dataset to a file.
///
/// The whole table is rendered in memory first so a serialization failure
/// never leaves a truncated file behind.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<(), LogError> {
    let mut buffer = Vec::new();
    write_dataset(dataset, &mut buffer)?;
    fs::write(path, buffer).map_err(|e| LogError::write(path, e))
}

/// Read a dataset back from CSV, checking the header against the schema
pub fn read_dataset<R: io::Read>(reader: R) -> Result<Dataset, LogError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let found: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let expected = header();
    if found != expected {
        return Err(LogError::Schema { expected, found });
    }

    let records = rdr
        .deserialize::<Record>()
        .collect::<Result<Vec<_>, _>>()?;

    Dataset::new(records).ok_or(LogError::EmptyTable)
}

/// Read a dataset from a CSV file
pub fn read_csv(path: &Path) -> Result<Dataset, LogError> {
    let file = fs::File::open(path).map_err(|e| LogError::read(path, e))?;
    read_dataset(io::BufReader::new(file))
}
