//! Adapters for libraries exposing the FFTW3 planner interface: FFTW itself
//! and MKL's FFTW3 wrappers.
//!
//! Plans are built against scratch arrays with the same alignment as the
//! scenario buffers and later applied to those buffers through the new-array
//! execute call, so planning (which overwrites its arrays under
//! `FFTW_MEASURE` and above) never clobbers scenario input.

mod ffi;

use std::{
    os::raw::{c_int, c_uint},
    ptr::NonNull,
    sync::{Mutex, PoisonError},
};

use criterion::Criterion;
use fftbench_hal::{
    Complex64,
    bench_suite::bench_c2c,
    config::{BenchConfig, Effort, PlanConfig, Threading},
    error::PlanError,
    layouts::{ComplexBuf, Plan, Shape},
    scenario::{OnceTiming, time_once},
    source::Source,
};

use ffi::{
    FFTW_ESTIMATE, FFTW_EXHAUSTIVE, FFTW_FORWARD, FFTW_MEASURE, FFTW_PATIENT, FFTW_PLAN, fftw_destroy_plan,
    fftw_execute_dft, fftw_plan_dft,
};

/// Dimensionalities the FFTW3 interface plans natively.
pub const SUPPORTED_DIMS: &[usize] = &[1, 2, 3];

// Only execute is thread-safe in FFTW; planning and destruction share global
// planner state.
static PLANNER: Mutex<()> = Mutex::new(());

fn planner_flags(effort: Effort) -> c_uint {
    match effort {
        Effort::Estimate => FFTW_ESTIMATE,
        Effort::Measure => FFTW_MEASURE,
        Effort::Patient => FFTW_PATIENT,
        Effort::Exhaustive => FFTW_EXHAUSTIVE,
    }
}

#[cfg(feature = "threads")]
fn configure_threads(backend: &'static str, threading: Threading) -> Result<(), PlanError> {
    use std::sync::OnceLock;

    static THREADS_READY: OnceLock<bool> = OnceLock::new();

    if !*THREADS_READY.get_or_init(|| unsafe { ffi::fftw_init_threads() } != 0) {
        return Err(PlanError::Library {
            backend,
            reason: "fftw_init_threads failed".to_string(),
        });
    }

    let threads: c_int = c_int::try_from(threading.threads()).map_err(|_| PlanError::Unsupported {
        backend,
        reason: format!("{} threads", threading.threads()),
    })?;
    unsafe { ffi::fftw_plan_with_nthreads(threads) };
    Ok(())
}

#[cfg(not(feature = "threads"))]
fn configure_threads(backend: &'static str, threading: Threading) -> Result<(), PlanError> {
    match threading {
        Threading::Single => Ok(()),
        Threading::Multi(n) => Err(PlanError::Unsupported {
            backend,
            reason: format!("{n} threads requested from a build without the `threads` feature"),
        }),
    }
}

fn plan_dft<const D: usize>(
    backend: &'static str,
    shape: &Shape<D>,
    config: &PlanConfig,
) -> Result<NonNull<FFTW_PLAN>, PlanError> {
    // Shape guarantees every extent and the product fit in a C int.
    let dims: [c_int; D] = shape.extents().map(|n| n as c_int);

    let mut scratch_in: ComplexBuf = ComplexBuf::alloc(shape.len())?;
    let mut scratch_out: ComplexBuf = ComplexBuf::alloc(shape.len())?;

    let _planner = PLANNER.lock().unwrap_or_else(PoisonError::into_inner);

    configure_threads(backend, config.threading)?;

    let ptr: *mut FFTW_PLAN = unsafe {
        fftw_plan_dft(
            D as c_int,
            dims.as_ptr(),
            scratch_in.as_mut_ptr(),
            scratch_out.as_mut_ptr(),
            FFTW_FORWARD,
            planner_flags(config.effort),
        )
    };

    NonNull::new(ptr).ok_or_else(|| PlanError::Library {
        backend,
        reason: format!("planner returned no plan for {shape} ({})", config.effort),
    })
}

unsafe fn destroy_plan(handle: NonNull<FFTW_PLAN>) {
    let _planner = PLANNER.lock().unwrap_or_else(PoisonError::into_inner);
    unsafe { fftw_destroy_plan(handle.as_ptr()) }
}

unsafe fn execute_plan(handle: NonNull<FFTW_PLAN>, input: &[Complex64], output: &mut [Complex64]) {
    // Out-of-place complex transforms leave their input untouched; the C
    // signature is merely non-const.
    unsafe { fftw_execute_dft(handle.as_ptr(), input.as_ptr() as *mut Complex64, output.as_mut_ptr()) }
}

macro_rules! fftw_backend {
    ($(#[$attr:meta])* $backend:ident, $name:literal) => {
        $(#[$attr])*
        pub struct $backend;

        impl fftbench_hal::layouts::Backend for $backend {
            type Handle = FFTW_PLAN;
            const NAME: &'static str = $name;

            unsafe fn destroy(handle: NonNull<Self::Handle>) {
                unsafe { destroy_plan(handle) }
            }
        }

        unsafe impl<const D: usize> fftbench_hal::oep::PlanNewImpl<D> for $backend {
            fn plan_new_impl(shape: &Shape<D>, config: &PlanConfig) -> Result<Plan<Self, D>, PlanError> {
                let ptr: NonNull<FFTW_PLAN> = plan_dft($name, shape, config)?;
                Ok(unsafe { Plan::from_nonnull(ptr, *shape, config.threading.threads()) })
            }
        }

        unsafe impl fftbench_hal::oep::PlanExecuteImpl for $backend {
            #[inline]
            unsafe fn execute_impl(handle: NonNull<Self::Handle>, input: &[Complex64], output: &mut [Complex64]) {
                unsafe { execute_plan(handle, input, output) }
            }
        }

        impl $backend {
            /// Registers 1-D, 2-D and 3-D scenarios with Criterion.
            pub fn bench_all(c: &mut Criterion, label: &str, config: &BenchConfig) {
                bench_c2c::<$backend, 1>(c, label, config);
                bench_c2c::<$backend, 2>(c, label, config);
                bench_c2c::<$backend, 3>(c, label, config);
            }

            /// Sets up, executes once and tears down a cube of `extent` per axis.
            pub fn run_once(
                dims: usize,
                extent: usize,
                config: &PlanConfig,
                source: &mut Source,
            ) -> Result<OnceTiming, PlanError> {
                match dims {
                    1 => time_once::<$backend, 1>(&Shape::cube(extent)?, config, source),
                    2 => time_once::<$backend, 2>(&Shape::cube(extent)?, config, source),
                    3 => time_once::<$backend, 3>(&Shape::cube(extent)?, config, source),
                    _ => Err(PlanError::Unsupported {
                        backend: $name,
                        reason: format!("{dims}-d transforms"),
                    }),
                }
            }
        }
    };
}

#[cfg(feature = "fftw3")]
fftw_backend!(
    /// FFTW3, linked from `libfftw3` (and `libfftw3_threads` with `threads`).
    Fftw3,
    "fftw3"
);

#[cfg(feature = "mkl")]
fftw_backend!(
    /// Intel MKL through its FFTW3 interface wrappers in `mkl_rt`.
    Mkl,
    "mkl"
);
