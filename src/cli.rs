//! Command-line interface definitions and command execution.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use crate::{batch, convert, export, pivot, settings::Settings};

/// Extract benchmark run records from harness logs into CSV tables
#[derive(Debug, Parser)]
#[command(name = "benchlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert one or more logs, writing a table next to each
    Parse {
        /// Benchmark log files
        #[arg(required = true)]
        logs: Vec<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Convert every log in a directory
    Batch {
        /// Directory holding benchmark logs
        dir: PathBuf,

        /// Extension of the logs to pick up
        #[arg(long, value_name = "EXT")]
        log_extension: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Parse a log and report what would be extracted, without writing
    Inspect {
        log: PathBuf,

        /// Keep terminal colour codes instead of stripping them
        #[arg(long)]
        keep_ansi: bool,
    },

    /// Reshape a table into workload x threads for one metric
    Pivot {
        /// Table written by `parse` or `batch`
        table: PathBuf,

        /// Column to spread across thread counts
        #[arg(short, long, value_name = "FIELD")]
        metric: Option<String>,

        /// Write here instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Omit the header row
        #[arg(long)]
        no_header: bool,
    },
}

#[derive(Debug, clap::Args)]
pub struct OutputArgs {
    /// Directory for the generated tables
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Extension of the generated tables (content stays comma-separated)
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Keep terminal colour codes instead of stripping them
    #[arg(long)]
    pub keep_ansi: bool,
}

impl OutputArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.output_dir {
            settings.output_dir = Some(dir.clone());
        }
        if let Some(ext) = &self.extension {
            settings.table_extension = ext.trim_start_matches('.').to_string();
        }
        if self.keep_ansi {
            settings.strip_ansi = false;
        }
    }
}

impl Cli {
    /// Maximum level for the diagnostic stream
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    fn settings(&self) -> Result<Settings> {
        match &self.config {
            Some(path) => Ok(Settings::load_from(path)?),
            None => Ok(Settings::load()),
        }
    }

    pub fn run(self) -> Result<()> {
        let mut settings = self.settings()?;
        let stdout = io::stdout();
        let mut out = stdout.lock();

        match self.command {
            Commands::Parse { logs, output } => {
                output.apply(&mut settings);

                let mut failures = 0;
                for log in &logs {
                    match convert::convert_file(log, &settings) {
                        Ok(conversion) => writeln!(
                            out,
                            "parsed {} ({} records, {} sections discarded) -> {}",
                            log.display(),
                            conversion.report.record_count(),
                            conversion.report.discarded(),
                            conversion.output.display()
                        )?,
                        Err(e) => {
                            tracing::error!("{}: {}", log.display(), e);
                            failures += 1;
                        }
                    }
                }
                if failures > 0 {
                    bail!("{} of {} logs failed to convert", failures, logs.len());
                }
            }

            Commands::Batch {
                dir,
                log_extension,
                output,
            } => {
                output.apply(&mut settings);
                if let Some(ext) = log_extension {
                    settings.log_extension = ext.trim_start_matches('.').to_string();
                }

                let summary = batch::convert_dir(&dir, &settings)
                    .with_context(|| format!("cannot scan {}", dir.display()))?;

                for conversion in &summary.converted {
                    writeln!(
                        out,
                        "parsed {} ({} records) -> {}",
                        conversion.input.display(),
                        conversion.report.record_count(),
                        conversion.output.display()
                    )?;
                }
                for (path, e) in &summary.failed {
                    writeln!(out, "failed {}: {}", path.display(), e)?;
                }
                writeln!(
                    out,
                    "{} of {} logs converted",
                    summary.converted.len(),
                    summary.total()
                )?;
                if !summary.is_clean() {
                    bail!("{} logs failed to convert", summary.failed.len());
                }
            }

            Commands::Inspect { log, keep_ansi } => {
                if keep_ansi {
                    settings.strip_ansi = false;
                }
                let report = convert::parse_file(&log, &settings)
                    .with_context(|| format!("cannot inspect {}", log.display()))?;

                writeln!(out, "{}", log.display())?;
                writeln!(out, "  sections:  {}", report.sections)?;
                writeln!(out, "  records:   {}", report.record_count())?;
                writeln!(out, "  discarded: {}", report.discarded())?;
                for diagnostic in &report.diagnostics {
                    writeln!(out, "    {}", diagnostic)?;
                }
                for record in &report.dataset {
                    writeln!(
                        out,
                        "  {:<12} threads={:<3} page={:<6} load={:.2} run={:.2} Kops/s",
                        record.workload,
                        record.threads,
                        record.page_size,
                        record.loaded_throughput,
                        record.run_throughput
                    )?;
                }
            }

            Commands::Pivot {
                table,
                metric,
                output,
                no_header,
            } => {
                let metric = match metric {
                    Some(name) => pivot::parse_metric(&name)?,
                    None => settings.pivot_metric,
                };
                let dataset = export::read_csv(&table)
                    .with_context(|| format!("cannot load table {}", table.display()))?;
                let pivoted = pivot::pivot(&dataset, metric)?;

                match output {
                    Some(path) => {
                        let mut buffer = Vec::new();
                        pivoted.write_csv(&mut buffer, !no_header)?;
                        fs::write(&path, buffer)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        writeln!(out, "{}", path.display())?;
                    }
                    None => pivoted.write_csv(&mut out, !no_header)?,
                }
            }
        }

        Ok(())
    }
}
