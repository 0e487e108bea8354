//! Directory-wide conversion.
//!
//! Files are converted one at a time in sorted order. A file that fails is
//! recorded and skipped; it never stops the rest of the batch. When two logs
//! map to one table (`a.log` and `a.LOG`), the first converted keeps it and
//! the other fails with [`LogError::DuplicateOutput`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::convert::{self, Conversion};
use crate::error::LogError;
use crate::settings::Settings;

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub converted: Vec<Conversion>,
    pub failed: Vec<(PathBuf, LogError)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// List regular files in `dir` whose extension is `extension`, sorted by path
pub fn discover_logs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, LogError> {
    let entries = fs::read_dir(dir).map_err(|e| LogError::read(dir, e))?;

    let mut logs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LogError::read(dir, e))?;
        let path = entry.path();
        let matches = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            logs.push(path);
        }
    }
    logs.sort();
    Ok(logs)
}

/// Convert every log in a directory
pub fn convert_dir(dir: &Path, settings: &Settings) -> Result<BatchSummary, LogError> {
    let logs = discover_logs(dir, &settings.log_extension)?;
    if logs.is_empty() {
        tracing::warn!("No .{} files found in {}", settings.log_extension, dir.display());
    }

    let mut summary = BatchSummary::default();
    // table path -> log that wrote it
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    for path in logs {
        let output = convert::output_path(
            &path,
            &settings.table_extension,
            settings.output_dir.as_deref(),
        );
        if let Some(first) = claimed.get(&output) {
            let e = LogError::DuplicateOutput {
                path: output,
                claimed_by: first.clone(),
            };
            tracing::error!("Skipping {}: {}", path.display(), e);
            summary.failed.push((path, e));
            continue;
        }

        match convert::convert_file(&path, settings) {
            Ok(conversion) => {
                claimed.insert(conversion.output.clone(), path);
                summary.converted.push(conversion);
            }
            Err(e) => {
                tracing::error!("Failed to convert {}: {}", path.display(), e);
                summary.failed.push((path, e));
            }
        }
    }

    tracing::info!(
        converted = summary.converted.len(),
        failed = summary.failed.len(),
        "Batch complete for {}",
        dir.display()
    );
    Ok(summary)
}
