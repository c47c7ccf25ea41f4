//! Builds a single plan with the selected library, executes it once and
//! tears it down. Handy for checking linkage and for profiling one setup.

use std::process::ExitCode;

use clap::Parser;
use fftbench_backend::{NAME, SUPPORTED_DIMS, THREADED, run_once_selected};
use fftbench_hal::{
    config::{Effort, PlanConfig, Threading},
    init_logging,
    scenario::{OnceTiming, label},
    source::Source,
};

#[derive(Parser)]
#[command(name = "plan_once")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Plan, execute and destroy one forward C2C transform")]
struct Cli {
    /// Extent along every axis
    #[arg(default_value_t = 1024)]
    extent: usize,

    /// Transform dimensionality
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    dims: u8,

    /// Planner effort: estimate, measure, patient or exhaustive
    #[arg(long, default_value_t = Effort::Estimate)]
    effort: Effort,

    /// Seed for the input buffer; OS entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    init_logging();
    let cli: Cli = Cli::parse();
    let dims: usize = usize::from(cli.dims);

    if !SUPPORTED_DIMS.contains(&dims) {
        log::error!("{NAME} does not plan {dims}-d transforms (supported: {SUPPORTED_DIMS:?})");
        return ExitCode::FAILURE;
    }

    let threading: Threading = if THREADED {
        match Threading::from_env() {
            Ok(threading) => threading,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        Threading::Single
    };

    let config: PlanConfig = PlanConfig {
        effort: cli.effort,
        threading,
    };
    let mut source: Source = cli.seed.map_or_else(Source::from_entropy, Source::from_u64);

    let name: String = format!("{}/{}", label(NAME, &threading), vec![cli.extent.to_string(); dims].join("x"));
    match run_once_selected(dims, cli.extent, &config, &mut source) {
        Ok(OnceTiming { setup, execute }) => {
            log::info!("{name}: setup {setup:?}, execute {execute:?} ({} effort)", config.effort);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{name}: {err}");
            ExitCode::FAILURE
        }
    }
}
