//! Summarizes the `c2c` results Criterion wrote to disk.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use fftbench::results::{Format, Measurement, load, render};
use fftbench_hal::init_logging;

#[derive(Parser)]
#[command(name = "collect")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tabulate mean C2C transform times from a Criterion output directory")]
struct Cli {
    /// Criterion output directory, usually `target/criterion`
    #[arg(default_value = "target/criterion")]
    dir: PathBuf,

    /// Only report this dimensionality
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    dims: Option<u8>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

fn main() -> ExitCode {
    init_logging();
    let cli: Cli = Cli::parse();

    let measurements: Vec<Measurement> = match load(&cli.dir) {
        Ok(measurements) => measurements,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    print!("{}", render(&measurements, cli.dims.map(usize::from), cli.format));
    ExitCode::SUCCESS
}
