//! FFT library adapters.
//!
//! Exactly one library feature (`mkl`, `fftw3`, `rustfft` or `ndrustfft`)
//! must be enabled; the adapter it names is exported as [`Selected`]. The
//! `threads` feature switches the build to multi-threaded plans.

#[cfg(any(feature = "fftw3", feature = "mkl"))]
pub mod fftw_abi;

#[cfg(feature = "ndrustfft")]
pub mod nd_rust_fft;

#[cfg(feature = "rustfft")]
pub mod rust_fft;

#[cfg(test)]
mod tests;

use criterion::Criterion;
use fftbench_hal::{
    config::{BenchConfig, PlanConfig},
    error::PlanError,
    layouts::Backend,
    scenario::{OnceTiming, label},
    source::Source,
};

cfg_if::cfg_if! {
    if #[cfg(any(
        all(feature = "mkl", feature = "fftw3"),
        all(feature = "mkl", feature = "rustfft"),
        all(feature = "mkl", feature = "ndrustfft"),
        all(feature = "fftw3", feature = "rustfft"),
        all(feature = "fftw3", feature = "ndrustfft"),
        all(feature = "rustfft", feature = "ndrustfft"),
    ))] {
        compile_error!("enable exactly one of the `mkl`, `fftw3`, `rustfft` and `ndrustfft` features");
    } else if #[cfg(all(feature = "rustfft", feature = "threads"))] {
        compile_error!("rustfft has no multi-threaded plans; drop the `threads` feature");
    } else if #[cfg(feature = "mkl")] {
        pub use fftw_abi::{Mkl as Selected, SUPPORTED_DIMS};
    } else if #[cfg(feature = "fftw3")] {
        pub use fftw_abi::{Fftw3 as Selected, SUPPORTED_DIMS};
    } else if #[cfg(feature = "rustfft")] {
        pub use rust_fft::{RustFft as Selected, SUPPORTED_DIMS};
    } else if #[cfg(feature = "ndrustfft")] {
        pub use nd_rust_fft::{NdRustFft as Selected, SUPPORTED_DIMS};
    } else {
        compile_error!("enable one of the `mkl`, `fftw3`, `rustfft` and `ndrustfft` features");
    }
}

/// Whether this build benchmarks multi-threaded plans.
pub const THREADED: bool = cfg!(feature = "threads");

/// Name of the selected library.
pub const NAME: &str = <Selected as Backend>::NAME;

/// Registers every scenario of the selected library with Criterion.
pub fn bench_selected(c: &mut Criterion, config: &BenchConfig) {
    let label: String = label(NAME, &config.plan.threading);
    log::info!(
        "benchmarking {label}: dims {SUPPORTED_DIMS:?}, effort {}, {} thread(s), 2^{} elements max",
        config.plan.effort,
        config.plan.threading.threads(),
        config.max_log_len
    );
    Selected::bench_all(c, &label, config);
}

/// Sets up, executes once and tears down one cube of the selected library.
pub fn run_once_selected(
    dims: usize,
    extent: usize,
    config: &PlanConfig,
    source: &mut Source,
) -> Result<OnceTiming, PlanError> {
    Selected::run_once(dims, extent, config, source)
}
