//! # fftbench-hal
//!
//! A trait-based abstraction layer for timing forward complex-to-complex FFTs
//! of one, two and three dimensions across third-party FFT libraries.
//!
//! The crate owns everything a benchmark scenario needs except the transform
//! itself: aligned buffers, random initialization, the plan lifecycle, the
//! scenario registry and the Criterion timing loop. The FFT libraries are
//! wrapped by backend crates that implement the [`oep`] traits.
//!
//! ## Core Concepts
//!
//! **Shape:** a [`layouts::Shape`] holds `D` per-axis extents in row-major
//! order (axis 0 varies slowest). `D` is a const generic restricted to
//! `1..=3` at compile time.
//!
//! **Buffers:** [`layouts::ComplexBuf`] is an owned, zero-initialized,
//! [`DEFAULTALIGN`]-aligned run of interleaved `re, im` doubles exposed as
//! [`num_complex::Complex64`].
//!
//! **Plan:** a [`layouts::Plan`] owns exactly one backend handle (FFTW plan
//! pointer, boxed planner state, ...). It is built once per scenario, reused
//! for every timed iteration and destroyed once by `Drop`.
//!
//! ## Architecture
//!
//! 1. **[`api`]** -- safe traits ([`api::PlanNew`], [`api::PlanExecute`])
//!    used by the benchmark and test suites.
//! 2. **[`oep`]** -- `unsafe` extension points implemented by backends. A
//!    backend that cannot transform a given dimensionality simply does not
//!    implement [`oep::PlanNewImpl`] for it, so requesting it is a compile
//!    error.
//! 3. **[`delegates`]** -- blanket glue from [`api`] to [`oep`].
//!
//! ## Testing and Benchmarking
//!
//! [`bench_suite`] times scenarios with Criterion; [`test_suite`] holds
//! backend-generic checks instantiated through [`backend_test_suite!`].

#![deny(rustdoc::broken_intra_doc_links)]

/// Safe, user-facing plan traits.
pub mod api;

/// Criterion-based benchmark harnesses, generic over any backend.
pub mod bench_suite;

/// Environment-driven configuration of effort, threading and scenario sizes.
pub mod config;

/// Blanket implementations connecting [`api`] traits to [`oep`] traits.
pub mod delegates;

/// Error types shared by every crate of the workspace.
pub mod error;

/// Random initialization of scenario buffers.
pub mod init;

/// Shapes, aligned complex buffers and the plan container.
pub mod layouts;

/// Open Extension Points: `unsafe` traits that backend crates implement.
pub mod oep;

/// Scenario registry: extents per dimensionality, names and per-scenario state.
pub mod scenario;

/// Deterministic pseudorandom number generation based on ChaCha8.
pub mod source;

/// Per-thread counters of live plans and buffers.
pub mod stats;

/// Backend-generic test functions.
pub mod test_suite;

pub use num_complex::Complex64;

/// Highest transform dimensionality the harness registers.
pub const MAX_DIMS: usize = 3;

/// Default memory alignment in bytes for all allocated buffers.
///
/// 64 bytes covers a cache line and the widest SIMD loads any wrapped
/// library issues.
pub const DEFAULTALIGN: usize = 64;

/// Returns `true` if `ptr` is aligned to [`DEFAULTALIGN`] bytes.
pub fn is_aligned<T>(ptr: *const T) -> bool {
    (ptr as usize).is_multiple_of(DEFAULTALIGN)
}

/// Installs the `env_logger` backend, reading `RUST_LOG` with an `info` default.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
