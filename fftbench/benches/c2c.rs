use std::process::ExitCode;

use criterion::Criterion;
use fftbench_backend::{THREADED, bench_selected};
use fftbench_hal::{config::BenchConfig, init_logging};

// Hand-written main instead of `criterion_main!`: the configuration comes
// from the environment and a malformed value must fail the run.
fn main() -> ExitCode {
    init_logging();

    let config: BenchConfig = match BenchConfig::from_env(THREADED) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut c: Criterion = Criterion::default().configure_from_args();
    bench_selected(&mut c, &config);
    c.final_summary();

    ExitCode::SUCCESS
}
