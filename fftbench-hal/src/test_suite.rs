//! Backend-generic test functions.
//!
//! Backend crates instantiate these through [`backend_test_suite!`]; the
//! dimensionality-specific checks are listed only for the dimensionalities a
//! backend implements.

use std::{f64::consts::PI, time::Instant};

use approx::assert_abs_diff_eq;

use crate::{
    Complex64,
    api::{PlanExecute, PlanNew},
    config::PlanConfig,
    layouts::{Backend, ComplexBuf, Plan, Shape},
    scenario::Scenario,
    source::Source,
    stats,
};

#[macro_export]
macro_rules! backend_test_suite {
    (
        mod $modname:ident,
        backend = $backend:ty,
        config = $config:expr,
        tests = {
            $( $(#[$attr:meta])* $test_name:ident => $impl:ident ),+ $(,)?
        }
    ) => {
        mod $modname {
            use $crate::config::PlanConfig;

            use once_cell::sync::Lazy;

            static CONFIG: Lazy<PlanConfig> = Lazy::new(|| $config);

            $(
                $(#[$attr])*
                #[test]
                fn $test_name() {
                    $crate::test_suite::$impl::<$backend>(&*CONFIG);
                }
            )+
        }
    };
}

/// Unnormalised forward DFT (`exp(-2 pi i k n / N)` per axis) of a row-major
/// array, computed term by term.
pub fn naive_dft<const D: usize>(shape: &Shape<D>, input: &[Complex64]) -> Vec<Complex64> {
    let extents: &[usize; D] = shape.extents();
    let unravel = |mut idx: usize| -> [usize; D] {
        let mut coords: [usize; D] = [0; D];
        for axis in (0..D).rev() {
            coords[axis] = idx % extents[axis];
            idx /= extents[axis];
        }
        coords
    };

    (0..shape.len())
        .map(|k| {
            let kc: [usize; D] = unravel(k);
            input
                .iter()
                .enumerate()
                .map(|(n, x)| {
                    let nc: [usize; D] = unravel(n);
                    let phase: f64 = (0..D)
                        .map(|axis| ((kc[axis] * nc[axis]) % extents[axis]) as f64 / extents[axis] as f64)
                        .sum::<f64>();
                    x * Complex64::from_polar(1.0, -2.0 * PI * phase)
                })
                .sum()
        })
        .collect()
}

fn check_against_naive<B: Backend, const D: usize>(shape: Shape<D>, config: &PlanConfig)
where
    Plan<B, D>: PlanNew<B, D> + PlanExecute,
{
    let mut source: Source = Source::from_u64(0xfeed);
    let mut scenario: Scenario<B, D> = Scenario::<B, D>::setup(&shape, config, &mut source).unwrap();
    scenario.execute();

    let want: Vec<Complex64> = naive_dft(&shape, scenario.input());
    let tol: f64 = 1e-9 * shape.len() as f64;
    for (got, want) in scenario.output().iter().zip(want.iter()) {
        assert_abs_diff_eq!(got.re, want.re, epsilon = tol);
        assert_abs_diff_eq!(got.im, want.im, epsilon = tol);
    }
}

/// Output of a 1-D plan matches the textbook forward DFT, including a size
/// that is not a power of two.
pub fn test_forward_dft_1d<B: Backend>(config: &PlanConfig)
where
    Plan<B, 1>: PlanNew<B, 1> + PlanExecute,
{
    let _ = env_logger::builder().is_test(true).try_init();
    check_against_naive::<B, 1>(Shape::new([16]).unwrap(), config);
    check_against_naive::<B, 1>(Shape::new([12]).unwrap(), config);
}

pub fn test_forward_dft_2d<B: Backend>(config: &PlanConfig)
where
    Plan<B, 2>: PlanNew<B, 2> + PlanExecute,
{
    check_against_naive::<B, 2>(Shape::cube(8).unwrap(), config);
    check_against_naive::<B, 2>(Shape::new([4, 6]).unwrap(), config);
}

pub fn test_forward_dft_3d<B: Backend>(config: &PlanConfig)
where
    Plan<B, 3>: PlanNew<B, 3> + PlanExecute,
{
    check_against_naive::<B, 3>(Shape::cube(4).unwrap(), config);
    check_against_naive::<B, 3>(Shape::new([2, 4, 8]).unwrap(), config);
}

/// A unit impulse transforms to all ones.
pub fn test_impulse_1d<B: Backend>(config: &PlanConfig)
where
    Plan<B, 1>: PlanNew<B, 1> + PlanExecute,
{
    let shape: Shape<1> = Shape::new([256]).unwrap();
    let mut plan: Plan<B, 1> = Plan::<B, 1>::new(&shape, config).unwrap();
    let mut input: ComplexBuf = ComplexBuf::alloc(shape.len()).unwrap();
    let mut output: ComplexBuf = ComplexBuf::alloc(shape.len()).unwrap();
    input[0] = Complex64::new(1.0, 0.0);
    plan.execute(&input, &mut output);
    for z in output.iter() {
        assert_abs_diff_eq!(z.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(z.im, 0.0, epsilon = 1e-12);
    }
}

/// Repeated construct/destroy cycles leave no plan or buffer behind.
pub fn test_plan_teardown_balances<B: Backend>(config: &PlanConfig)
where
    Plan<B, 1>: PlanNew<B, 1> + PlanExecute,
{
    let plans: isize = stats::live_plans();
    let buffers: isize = stats::live_buffers();

    for log_n in [6, 8, 10, 6, 8, 10] {
        let shape: Shape<1> = Shape::new([1 << log_n]).unwrap();
        let mut source: Source = Source::from_u64(log_n as u64);
        let mut scenario: Scenario<B, 1> = Scenario::<B, 1>::setup(&shape, config, &mut source).unwrap();
        assert_eq!(stats::live_plans(), plans + 1);
        assert_eq!(stats::live_buffers(), buffers + 2);
        scenario.execute();
    }

    assert_eq!(stats::live_plans(), plans);
    assert_eq!(stats::live_buffers(), buffers);
}

/// One-dimensional transform of 1024 samples from setup to teardown.
pub fn test_end_to_end_1d_1024<B: Backend>(config: &PlanConfig)
where
    Plan<B, 1>: PlanNew<B, 1> + PlanExecute,
{
    let plans: isize = stats::live_plans();
    let buffers: isize = stats::live_buffers();
    {
        let shape: Shape<1> = Shape::new([1024]).unwrap();
        let mut scenario: Scenario<B, 1> =
            Scenario::<B, 1>::setup(&shape, config, &mut Source::from_entropy()).unwrap();

        assert_eq!(bytemuck::cast_slice::<Complex64, f64>(scenario.input()).len(), 2048);
        assert_eq!(bytemuck::cast_slice::<Complex64, f64>(scenario.output()).len(), 2048);
        assert_eq!(scenario.plan().len(), 1024);
        assert_eq!(scenario.plan().threads(), config.threading.threads());

        let start: Instant = Instant::now();
        for _ in 0..4 {
            scenario.execute();
        }
        let per_iter: f64 = start.elapsed().as_secs_f64() / 4.0;
        assert!(per_iter >= 0.0);
        assert!(scenario.output().iter().any(|z| z.norm_sqr() > 0.0));
    }
    assert_eq!(stats::live_plans(), plans);
    assert_eq!(stats::live_buffers(), buffers);
}

/// Executing a plan never writes to its input.
pub fn test_input_untouched<B: Backend>(config: &PlanConfig)
where
    Plan<B, 1>: PlanNew<B, 1> + PlanExecute,
{
    let shape: Shape<1> = Shape::new([512]).unwrap();
    let mut scenario: Scenario<B, 1> = Scenario::<B, 1>::setup(&shape, config, &mut Source::from_u64(3)).unwrap();
    let before: Vec<Complex64> = scenario.input().to_vec();
    scenario.execute();
    scenario.execute();
    assert_eq!(scenario.input(), before.as_slice());
}

/// Running another scenario first does not change the result of this one.
pub fn test_scenario_independence<B: Backend>(config: &PlanConfig)
where
    Plan<B, 1>: PlanNew<B, 1> + PlanExecute,
{
    let shape_a: Shape<1> = Shape::new([2048]).unwrap();
    let shape_b: Shape<1> = Shape::new([256]).unwrap();

    let isolated: Vec<Complex64> = {
        let mut b: Scenario<B, 1> = Scenario::<B, 1>::setup(&shape_b, config, &mut Source::from_u64(9)).unwrap();
        b.execute();
        b.output().to_vec()
    };

    {
        let mut a: Scenario<B, 1> = Scenario::<B, 1>::setup(&shape_a, config, &mut Source::from_u64(8)).unwrap();
        a.execute();
    }

    let mut b: Scenario<B, 1> = Scenario::<B, 1>::setup(&shape_b, config, &mut Source::from_u64(9)).unwrap();
    b.execute();

    for (got, want) in b.output().iter().zip(isolated.iter()) {
        assert_abs_diff_eq!(got.re, want.re, epsilon = 1e-9);
        assert_abs_diff_eq!(got.im, want.im, epsilon = 1e-9);
    }
}
