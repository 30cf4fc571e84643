use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use outbreak_sim::logging::{set_log_level, LevelFilter};
use outbreak_sim::report::write_csv_file;
use outbreak_sim::{simulate, OutbreakError, Parameters, Summary};

/// Simulates an outbreak day by day and writes the daily counts to a CSV file.
///
/// With no arguments the baseline scenario is run and the results are written to
/// `simulation_results.csv` in the current directory.
#[derive(Parser, Debug)]
#[command(name = "outbreak")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file overriding any of the baseline parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the results are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Name of the results file
    #[arg(long, default_value = "simulation_results.csv")]
    file_name: String,

    /// Maximum log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Overwrite the results file if it already exists
    #[arg(short, long)]
    force_overwrite: bool,
}

fn run(args: &Args) -> Result<(), OutbreakError> {
    let parameters = match &args.config {
        Some(path) => Parameters::from_json_file(path)?,
        None => Parameters::default(),
    };

    let output_path = args.output_dir.join(&args.file_name);
    if output_path.exists() && !args.force_overwrite {
        return Err(OutbreakError::OutbreakError(format!(
            "{} already exists; pass --force-overwrite to replace it",
            output_path.display()
        )));
    }

    let records = simulate(&parameters)?;
    write_csv_file(&output_path, &records)?;
    info!("wrote {} daily records to {}", records.len(), output_path.display());

    if let Some(summary) = Summary::from_records(&records) {
        info!("{summary}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = set_log_level(args.log_level) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
