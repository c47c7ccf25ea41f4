//! # fftbench
//!
//! Entry points of the FFT microbenchmark: the `c2c` Criterion bench, a
//! `plan_once` smoke binary and a `collect` binary that summarizes the
//! results Criterion leaves under `target/criterion`.
//!
//! The library part holds only the result collector; scenario setup and
//! timing live in `fftbench-hal` and the library adapters in
//! `fftbench-backend`.

/// Reading and tabulating Criterion results of the `c2c` bench.
pub mod results;
