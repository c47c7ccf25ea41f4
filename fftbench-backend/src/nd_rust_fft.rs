//! Adapter for `ndrustfft`, which applies `rustfft` along one axis of an
//! `ndarray` at a time.
//!
//! A `D`-dimensional transform is `D` axis passes that alternate between the
//! output buffer and a scratch array owned by the plan, arranged so the last
//! pass lands in the output. Multi-threaded plans own a rayon pool sized to
//! the requested thread count and run each pass with `ndfft_par` inside it.

use std::ptr::NonNull;

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
use ndarray::{ArrayBase, ArrayD, ArrayViewD, ArrayViewMutD, Data, DataMut, IxDyn};
use ndrustfft::{FftHandler, ndfft, ndfft_par};
use rayon::{ThreadPool, ThreadPoolBuilder};

pub const SUPPORTED_DIMS: &[usize] = &[1, 2, 3];

pub struct NdRustFft;

pub struct NdRustFftHandle {
    dim: IxDyn,
    handlers: Vec<FftHandler<f64>>,
    scratch: ArrayD<Complex64>,
    pool: Option<ThreadPool>,
}

impl Backend for NdRustFft {
    type Handle = NdRustFftHandle;
    const NAME: &'static str = "ndrustfft";

    unsafe fn destroy(handle: NonNull<Self::Handle>) {
        unsafe {
            drop(Box::from_raw(handle.as_ptr()));
        }
    }
}

unsafe impl<const D: usize> PlanNewImpl<D> for NdRustFft {
    fn plan_new_impl(shape: &Shape<D>, config: &PlanConfig) -> Result<Plan<Self, D>, PlanError> {
        let pool: Option<ThreadPool> = match config.threading {
            Threading::Single => None,
            Threading::Multi(n) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(n.get())
                    .thread_name(|i| format!("ndrustfft-{i}"))
                    .build()
                    .map_err(|err| PlanError::ThreadPool(err.to_string()))?,
            ),
        };

        let dim: IxDyn = IxDyn(shape.extents());
        let handlers: Vec<FftHandler<f64>> = shape.extents().iter().map(|&n| FftHandler::new(n)).collect();
        let scratch: ArrayD<Complex64> = if D > 1 {
            ArrayD::zeros(dim.clone())
        } else {
            ArrayD::zeros(IxDyn(&[0]))
        };

        let handle: NdRustFftHandle = NdRustFftHandle {
            dim,
            handlers,
            scratch,
            pool,
        };

        let ptr: NonNull<NdRustFftHandle> = NonNull::from(Box::leak(Box::new(handle)));
        Ok(unsafe { Plan::from_nonnull(ptr, *shape, config.threading.threads()) })
    }
}

fn transform<R, S>(
    input: &ArrayBase<R, IxDyn>,
    output: &mut ArrayBase<S, IxDyn>,
    handler: &FftHandler<f64>,
    axis: usize,
    pool: Option<&ThreadPool>,
) where
    R: Data<Elem = Complex64> + Sync,
    S: DataMut<Elem = Complex64> + Send,
{
    match pool {
        Some(pool) => pool.install(|| ndfft_par(input, output, handler, axis)),
        None => ndfft(input, output, handler, axis),
    }
}

unsafe impl PlanExecuteImpl for NdRustFft {
    unsafe fn execute_impl(handle: NonNull<Self::Handle>, input: &[Complex64], output: &mut [Complex64]) {
        let handle: &mut NdRustFftHandle = unsafe { &mut *handle.as_ptr() };
        let pool: Option<&ThreadPool> = handle.pool.as_ref();

        // Both lengths equal the product of `dim`, checked by the caller.
        let src: ArrayViewD<Complex64> = unsafe { ArrayViewD::from_shape_ptr(handle.dim.clone(), input.as_ptr()) };
        let mut dst: ArrayViewMutD<Complex64> =
            unsafe { ArrayViewMutD::from_shape_ptr(handle.dim.clone(), output.as_mut_ptr()) };

        let axes: usize = handle.handlers.len();
        for (axis, handler) in handle.handlers.iter().enumerate() {
            let into_output: bool = (axes - 1 - axis) % 2 == 0;
            match (axis == 0, into_output) {
                (true, true) => transform(&src, &mut dst, handler, axis, pool),
                (true, false) => transform(&src, &mut handle.scratch, handler, axis, pool),
                (false, true) => transform(&handle.scratch, &mut dst, handler, axis, pool),
                (false, false) => transform(&dst, &mut handle.scratch, handler, axis, pool),
            }
        }
    }
}

impl NdRustFft {
    /// Registers 1-D, 2-D and 3-D scenarios with Criterion.
    pub fn bench_all(c: &mut Criterion, label: &str, config: &BenchConfig) {
        bench_c2c::<NdRustFft, 1>(c, label, config);
        bench_c2c::<NdRustFft, 2>(c, label, config);
        bench_c2c::<NdRustFft, 3>(c, label, config);
    }

    pub fn run_once(dims: usize, extent: usize, config: &PlanConfig, source: &mut Source) -> Result<OnceTiming, PlanError> {
        match dims {
            1 => time_once::<NdRustFft, 1>(&Shape::cube(extent)?, config, source),
            2 => time_once::<NdRustFft, 2>(&Shape::cube(extent)?, config, source),
            3 => time_once::<NdRustFft, 3>(&Shape::cube(extent)?, config, source),
            _ => Err(PlanError::Unsupported {
                backend: Self::NAME,
                reason: format!("{dims}-d transforms"),
            }),
        }
    }
}
