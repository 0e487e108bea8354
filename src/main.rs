//! benchlog - extract benchmark run records from harness logs
//!
//! Reads logs made of run sections separated by 48-dash lines and writes one
//! CSV row per complete section. Discarded sections are reported on stderr.

use std::process::ExitCode;

use benchlog::cli::Cli;
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; diagnostics go to stderr so stdout stays clean
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
