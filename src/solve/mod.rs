//! The `solve` and `dataset` subcommands.
//!
//! # Usage Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use blendopt::solve::{SolveArgs, solve_main};
//!
//! let args = SolveArgs {
//!     input: None,            // built-in food manufacture data
//!     relaxed: false,
//!     time_limit: Some(60.0),
//!     report: Some("plan.rpt".into()),
//!     csv: Some("plan.csv".into()),
//! };
//!
//! solve_main(args)?;
//! # Ok(())
//! # }
//! ```

use std::{
    fs,
    io::{BufWriter, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::*;
use clap::Parser;

use crate::{
    AppError,
    data::{BlendData, canonical_input, read_input, write_input},
    extract::extract,
    lp_solver::SolverBackend,
    model::build_model,
};

pub mod report;

/// Command-line arguments for the solve command.
#[derive(Parser, Debug)]
pub struct SolveArgs {
    /// JSON dataset (default: the built-in Williams food manufacture data)
    pub input: Option<PathBuf>,

    /// Drop the lot-size, cardinality and implication rules and solve the pure LP
    #[clap(long)]
    pub relaxed: bool,

    /// Solver time limit in seconds
    #[clap(short('t'), long)]
    pub time_limit: Option<f64>,

    /// Output report file (default: stdout)
    #[clap(long)]
    pub report: Option<PathBuf>,

    /// Output CSV file with buy/use/stock per material and month
    #[clap(long)]
    pub csv: Option<PathBuf>,
}

fn time_limit(seconds: Option<f64>) -> Result<Option<Duration>> {
    seconds
        .map(|secs| {
            Duration::try_from_secs_f64(secs)
                .map_err(|err| anyhow!("Invalid time limit {}: {}", secs, err))
        })
        .transpose()
}

/// Validate, build, solve and report a blending problem.
///
/// A solve that ends without a plan (infeasible, unbounded, or out of time
/// with no incumbent) is written to the report and returned as an
/// [`AppError`].
pub fn solve_main(args: SolveArgs) -> Result<()> {
    let SolveArgs {
        input,
        relaxed,
        time_limit: seconds,
        report,
        csv,
    } = args;
    let time_limit = time_limit(seconds)?;

    let mut writer: Box<dyn Write> = match report {
        Some(path) => Box::new(BufWriter::new(fs::File::create(path)?)),
        None => Box::new(std::io::stdout()),
    };

    let input = match &input {
        Some(path) => read_input(path)?,
        None => canonical_input(),
    };
    let input = if relaxed { input.relaxed() } else { input };

    let data = BlendData::validate(input)?;
    let model = build_model(&data)?;

    let backend = SolverBackend::from_env_or_default()?;
    tracing::info!(%backend, ?time_limit, "solving");
    let solved = model.solve(&backend, time_limit)?;

    if let Some(err) = AppError::from_status(solved.status()) {
        writeln!(writer, "Status: {}", solved.status())?;
        writer.flush()?;
        return Err(err.into());
    }

    let plan = extract(&solved)?;
    report::write_report(&plan, &mut writer)?;
    writer.flush()?;

    if let Some(path) = csv {
        let mut csv_file = BufWriter::new(fs::File::create(path)?);
        report::write_csv(&plan, &mut csv_file)?;
        csv_file.flush()?;
    }

    Ok(())
}

/// Command-line arguments for the dataset command.
#[derive(Parser, Debug)]
pub struct DatasetArgs {
    /// Output JSON file (default: stdout)
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

/// Write the built-in dataset as JSON, as a starting point for custom data.
pub fn dataset_main(args: DatasetArgs) -> Result<()> {
    let mut writer: Box<dyn Write> = match args.output {
        Some(path) => Box::new(BufWriter::new(fs::File::create(path)?)),
        None => Box::new(std::io::stdout()),
    };
    write_input(&canonical_input(), &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_limit_parsing() {
        assert_eq!(time_limit(None).expect("none"), None);
        assert_eq!(
            time_limit(Some(2.5)).expect("valid"),
            Some(Duration::from_millis(2500))
        );
        assert!(time_limit(Some(-1.0)).is_err());
        assert!(time_limit(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_dataset_main_writes_canonical_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("oils.json");
        dataset_main(DatasetArgs {
            output: Some(path.clone()),
        })
        .expect("dataset");

        let written = read_input(&path).expect("read back");
        assert_eq!(written, canonical_input());
    }

    #[cfg(any(feature = "microlp", feature = "coin_cbc", feature = "gurobi"))]
    #[test]
    fn test_solve_main_relaxed_report_and_csv() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = dir.path().join("plan.rpt");
        let csv = dir.path().join("plan.csv");

        solve_main(SolveArgs {
            input: None,
            relaxed: true,
            time_limit: None,
            report: Some(report.clone()),
            csv: Some(csv.clone()),
        })
        .expect("solve");

        let text = fs::read_to_string(&report).expect("report");
        assert!(text.contains("Status: optimal"));
        assert!(text.contains("Total Profit: £107,842.5"));
        assert!(text.contains("Refining Plan (Tons Used):"));

        let rows = fs::read_to_string(&csv).expect("csv");
        let mut lines = rows.lines();
        assert_eq!(lines.next(), Some("material,period,buy,use,stock"));
        assert_eq!(lines.count(), 30);
    }
}
