//! Derived metric calculations.
//!
//! The harness reports zoned-device traffic as counts of 512-byte sectors in
//! thousands. Dividing by the configured page size turns that into logical
//! pages, which is what makes runs with different page sizes comparable.

use crate::parsers::types::{ExtractError, Field};

/// Bytes per device sector
pub const SECTOR_BYTES: f64 = 512.0;

/// The harness prints unit counts in thousands
pub const UNIT_SCALE: f64 = 1000.0;

/// Zoned-device traffic in logical pages
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneTraffic {
    pub read: f64,
    pub written: f64,
}

/// Convert reported units into logical pages, `None` for a zero page size
pub fn units_to_pages(units: u64, page_size: u32) -> Option<f64> {
    if page_size == 0 {
        return None;
    }
    Some(units as f64 * UNIT_SCALE * SECTOR_BYTES / f64::from(page_size))
}

/// Compute both zone metrics for one run
pub fn zone_traffic(
    read_units: u64,
    written_units: u64,
    page_size: u32,
) -> Result<ZoneTraffic, ExtractError> {
    let read =
        units_to_pages(read_units, page_size).ok_or(ExtractError::ZeroPageSize(Field::ZoneRead))?;
    let written = units_to_pages(written_units, page_size)
        .ok_or(ExtractError::ZeroPageSize(Field::ZoneWritten))?;

    Ok(ZoneTraffic { read, written })
}
