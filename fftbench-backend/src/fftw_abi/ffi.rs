//! The subset of the FFTW3 C interface used by the harness.
//!
//! MKL exports the same symbols from `mkl_rt`, so one set of declarations
//! serves both libraries; which one is linked is decided by the build script.

#![allow(non_camel_case_types)]

use std::os::raw::{c_int, c_uint};

use fftbench_hal::Complex64;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct fftw_plan_s {
    _unused: [u8; 0],
}
pub type FFTW_PLAN = fftw_plan_s;

pub const FFTW_FORWARD: c_int = -1;

pub const FFTW_MEASURE: c_uint = 0;
pub const FFTW_EXHAUSTIVE: c_uint = 1 << 3;
pub const FFTW_PATIENT: c_uint = 1 << 5;
pub const FFTW_ESTIMATE: c_uint = 1 << 6;

unsafe extern "C" {
    pub unsafe fn fftw_plan_dft(
        rank: c_int,
        n: *const c_int,
        in_: *mut Complex64,
        out: *mut Complex64,
        sign: c_int,
        flags: c_uint,
    ) -> *mut FFTW_PLAN;
}
unsafe extern "C" {
    pub unsafe fn fftw_execute_dft(p: *const FFTW_PLAN, in_: *mut Complex64, out: *mut Complex64);
}
unsafe extern "C" {
    pub unsafe fn fftw_destroy_plan(p: *mut FFTW_PLAN);
}

#[cfg(feature = "threads")]
unsafe extern "C" {
    pub unsafe fn fftw_init_threads() -> c_int;
}
#[cfg(feature = "threads")]
unsafe extern "C" {
    pub unsafe fn fftw_plan_with_nthreads(nthreads: c_int);
}
