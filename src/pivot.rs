//! Workload × thread-count comparison tables.
//!
//! Produces the `workload,tid-1,tid-8,...` layout the chart scripts read:
//! one row per workload, one column per thread count, each cell holding a
//! single metric.

use std::collections::BTreeSet;
use std::io;
use std::str::FromStr;

use thiserror::Error;

use crate::parsers::types::{Dataset, Field};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PivotError {
    #[error("`{0}` is not a numeric field")]
    NonNumericMetric(Field),

    #[error("unknown field `{0}`")]
    UnknownMetric(String),
}

/// Parse a metric name as written in a CSV header
pub fn parse_metric(name: &str) -> Result<Field, PivotError> {
    let field = Field::from_str(name).map_err(|_| PivotError::UnknownMetric(name.to_string()))?;
    if !field.is_numeric() {
        return Err(PivotError::NonNumericMetric(field));
    }
    Ok(field)
}

#[derive(Clone, Debug, PartialEq)]
pub struct PivotRow {
    pub workload: String,
    /// One cell per entry of [`PivotTable::threads`]
    pub values: Vec<Option<f64>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PivotTable {
    pub metric: Field,
    /// Column thread counts, ascending
    pub threads: Vec<u32>,
    /// Rows in order of each workload's first appearance
    pub rows: Vec<PivotRow>,
}

/// Build a pivot table of `metric`.
///
/// Several records for the same workload and thread count are averaged.
pub fn pivot(dataset: &Dataset, metric: Field) -> Result<PivotTable, PivotError> {
    if !metric.is_numeric() {
        return Err(PivotError::NonNumericMetric(metric));
    }

    let threads: Vec<u32> = dataset
        .iter()
        .map(|r| r.threads)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut workloads: Vec<&str> = Vec::new();
    for record in dataset {
        if !workloads.contains(&record.workload.as_str()) {
            workloads.push(&record.workload);
        }
    }

    // (sum, count) per cell
    let mut cells = vec![vec![(0.0_f64, 0_usize); threads.len()]; workloads.len()];
    for record in dataset {
        let (Some(row), Ok(col), Some(value)) = (
            workloads.iter().position(|w| *w == record.workload),
            threads.binary_search(&record.threads),
            record.metric(metric),
        ) else {
            continue;
        };
        let cell = &mut cells[row][col];
        cell.0 += value;
        cell.1 += 1;
    }

    let rows = workloads
        .iter()
        .zip(cells)
        .map(|(workload, row)| PivotRow {
            workload: workload.to_string(),
            values: row
                .into_iter()
                .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
                .collect(),
        })
        .collect();

    Ok(PivotTable {
        metric,
        threads,
        rows,
    })
}

impl PivotTable {
    /// Header row: `workload,tid-<n>,...`
    pub fn header(&self) -> Vec<String> {
        std::iter::once("workload".to_string())
            .chain(self.threads.iter().map(|t| format!("tid-{}", t)))
            .collect()
    }

    /// Cell value for a workload and thread count
    pub fn value(&self, workload: &str, threads: u32) -> Option<f64> {
        let col = self.threads.binary_search(&threads).ok()?;
        self.rows
            .iter()
            .find(|r| r.workload == workload)
            .and_then(|r| r.values[col])
    }

    /// Write the table as CSV; empty cells mark missing combinations
    pub fn write_csv<W: io::Write>(&self, writer: W, include_header: bool) -> Result<(), csv::Error> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        if include_header {
            wtr.write_record(self.header())?;
        }
        for row in &self.rows {
            let mut fields = Vec::with_capacity(row.values.len() + 1);
            fields.push(row.workload.clone());
            fields.extend(row.values.iter().map(|v| v.map(format_cell).unwrap_or_default()));
            wtr.write_record(&fields)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Format a cell the way the record table formats reals
fn format_cell(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}
