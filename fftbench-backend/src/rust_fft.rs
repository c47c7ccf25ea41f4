//! Adapter for `rustfft`, a pure-Rust one-dimensional FFT library.
//!
//! Only [`PlanNewImpl<1>`] is provided: asking for a 2-D or 3-D `RustFft`
//! plan does not compile.
//!
//! ```compile_fail
//! use fftbench_backend::rust_fft::RustFft;
//! use fftbench_hal::{api::PlanNew, config::PlanConfig, layouts::{Plan, Shape}};
//!
//! let shape: Shape<3> = Shape::cube(8).unwrap();
//! let _plan = Plan::<RustFft, 3>::new(&shape, &PlanConfig::default());
//! ```

use std::{ptr::NonNull, sync::Arc};

use criterion::Criterion;
use fftbench_hal::{
    Complex64,
    bench_suite::bench_c2c,
    config::{BenchConfig, PlanConfig, Threading},
    error::PlanError,
    layouts::{Backend, Plan, Shape},
    oep::{PlanExecuteImpl, PlanNewImpl},
    scenario::{OnceTiming, time_once},
    source::Source,
};
use rustfft::{Fft, FftPlanner};

pub const SUPPORTED_DIMS: &[usize] = &[1];

pub struct RustFft;

/// Planned algorithm plus the scratch space it asks for.
pub struct RustFftHandle {
    fft: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
}

impl Backend for RustFft {
    type Handle = RustFftHandle;
    const NAME: &'static str = "rustfft";

    unsafe fn destroy(handle: NonNull<Self::Handle>) {
        unsafe {
            drop(Box::from_raw(handle.as_ptr()));
        }
    }
}

unsafe impl PlanNewImpl<1> for RustFft {
    fn plan_new_impl(shape: &Shape<1>, config: &PlanConfig) -> Result<Plan<Self, 1>, PlanError> {
        if let Threading::Multi(n) = config.threading {
            return Err(PlanError::Unsupported {
                backend: Self::NAME,
                reason: format!("{n} threads requested, rustfft plans are single-threaded"),
            });
        }

        // rustfft picks its algorithm heuristically; there is no effort knob.
        let mut planner: FftPlanner<f64> = FftPlanner::new();
        let fft: Arc<dyn Fft<f64>> = planner.plan_fft_forward(shape.len());
        let scratch: Vec<Complex64> = vec![Complex64::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        let ptr: NonNull<RustFftHandle> = NonNull::from(Box::leak(Box::new(RustFftHandle { fft, scratch })));
        Ok(unsafe { Plan::from_nonnull(ptr, *shape, 1) })
    }
}

unsafe impl PlanExecuteImpl for RustFft {
    #[inline]
    unsafe fn execute_impl(handle: NonNull<Self::Handle>, input: &[Complex64], output: &mut [Complex64]) {
        let handle: &mut RustFftHandle = unsafe { &mut *handle.as_ptr() };
        // rustfft's out-of-place entry point consumes its input as scratch;
        // transform a copy in place instead.
        output.copy_from_slice(input);
        handle.fft.process_with_scratch(output, &mut handle.scratch);
    }
}

impl RustFft {
    /// Registers 1-D scenarios with Criterion.
    pub fn bench_all(c: &mut Criterion, label: &str, config: &BenchConfig) {
        bench_c2c::<RustFft, 1>(c, label, config);
    }

    pub fn run_once(dims: usize, extent: usize, config: &PlanConfig, source: &mut Source) -> Result<OnceTiming, PlanError> {
        match dims {
            1 => time_once::<RustFft, 1>(&Shape::cube(extent)?, config, source),
            _ => Err(PlanError::Unsupported {
                backend: Self::NAME,
                reason: format!("{dims}-d transforms, only 1-d is available"),
            }),
        }
    }
}
