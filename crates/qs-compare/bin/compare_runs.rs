//! Compare two simulation session files side by side.
//!
//! Loads a baseline and a candidate `session.json`, computes relative
//! error statistics for each against the baseline's Cornell reference
//! series, and prints the comparison report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use qs_compare::report::{ComparisonReport, ReportError};
use qs_session::{SessionError, load_session};

/// Side-by-side error comparison of two training runs
#[derive(Parser, Debug)]
#[command(name = "compare-runs")]
#[command(version, about = "Compare two simulation runs' session files", long_about = None)]
struct Args {
    /// Baseline run's session file
    path_a: PathBuf,

    /// Candidate run's session file
    path_b: PathBuf,

    /// Display name for the baseline run
    #[arg(long = "label-a", default_value = "baseline")]
    label_a: String,

    /// Display name for the candidate run
    #[arg(long = "label-b", default_value = "candidate")]
    label_b: String,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

fn run(args: &Args) -> Result<(), CliError> {
    let baseline = load_session(&args.path_a)?;
    let candidate = load_session(&args.path_b)?;

    let report = ComparisonReport::build(&baseline, &candidate, &args.label_a, &args.label_b)?;
    println!("{report}");

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("compare-runs: {e}");
            ExitCode::FAILURE
        }
    }
}
