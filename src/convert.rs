//! Log-to-table conversion for a single file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LogError;
use crate::export;
use crate::parsers::{BenchmarkLog, ParseReport, Parseable};
use crate::settings::Settings;

/// Outcome of converting one log
#[derive(Clone, Debug)]
pub struct Conversion {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: ParseReport,
}

/// Where the table for `input` goes: same base name, table extension,
/// optionally moved into `output_dir`.
///
/// The extension only names the file; the content is always comma-separated.
pub fn output_path(input: &Path, extension: &str, output_dir: Option<&Path>) -> PathBuf {
    let renamed = input.with_extension(extension);
    match (output_dir, renamed.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => renamed,
    }
}

/// Whether `output` names `input` once `.`, `..` and symlinks are resolved.
///
/// The output need not exist yet, so only its directory is canonicalized.
fn is_same_file(input: &Path, output: &Path) -> bool {
    if input == output {
        return true;
    }
    let Ok(input) = input.canonicalize() else {
        return false;
    };
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (dir.canonicalize(), output.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name) == input,
        _ => false,
    }
}

/// Parse a log held in memory using the configured options
pub fn parse_contents(contents: &str, settings: &Settings) -> Result<ParseReport, LogError> {
    BenchmarkLog::new()
        .with_ansi_stripping(settings.strip_ansi)
        .parse(contents)
}

/// Read a log from disk and parse it without writing anything
pub fn parse_file(input: &Path, settings: &Settings) -> Result<ParseReport, LogError> {
    let contents = fs::read_to_string(input).map_err(|e| LogError::read(input, e))?;
    parse_contents(&contents, settings)
}

/// Parse a log and write its table.
///
/// Nothing is written when the log yields no records.
pub fn convert_file(input: &Path, settings: &Settings) -> Result<Conversion, LogError> {
    let output = output_path(
        input,
        &settings.table_extension,
        settings.output_dir.as_deref(),
    );
    if is_same_file(input, &output) {
        return Err(LogError::SameInputOutput { path: output });
    }

    let report = parse_file(input, settings)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| LogError::write(parent, e))?;
    }
    export::write_csv(&report.dataset, &output)?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        records = report.record_count(),
        discarded = report.discarded(),
        "Parsed benchmark log"
    );

    Ok(Conversion {
        input: input.to_path_buf(),
        output,
        report,
    })
}
