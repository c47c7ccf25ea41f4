use std::num::NonZeroUsize;

use fftbench_hal::{
    api::PlanNew,
    backend_test_suite,
    config::{Effort, PlanConfig, Threading},
    error::PlanError,
    layouts::{Plan, Shape},
    scenario::OnceTiming,
    source::Source,
};

use crate::{NAME, SUPPORTED_DIMS, Selected, run_once_selected};

fn two_threads() -> Threading {
    Threading::Multi(NonZeroUsize::new(2).unwrap())
}

backend_test_suite! {
    mod single_threaded,
    backend = crate::Selected,
    config = fftbench_hal::config::PlanConfig {
        effort: fftbench_hal::config::Effort::Estimate,
        threading: fftbench_hal::config::Threading::Single,
    },
    tests = {
        forward_dft_1d => test_forward_dft_1d,
        #[cfg(not(feature = "rustfft"))]
        forward_dft_2d => test_forward_dft_2d,
        #[cfg(not(feature = "rustfft"))]
        forward_dft_3d => test_forward_dft_3d,
        impulse_1d => test_impulse_1d,
        plan_teardown_balances => test_plan_teardown_balances,
        end_to_end_1d_1024 => test_end_to_end_1d_1024,
        input_untouched => test_input_untouched,
        scenario_independence => test_scenario_independence,
    }
}

backend_test_suite! {
    mod measured,
    backend = crate::Selected,
    config = fftbench_hal::config::PlanConfig {
        effort: fftbench_hal::config::Effort::Measure,
        threading: fftbench_hal::config::Threading::Single,
    },
    tests = {
        forward_dft_1d => test_forward_dft_1d,
        input_untouched => test_input_untouched,
    }
}

#[cfg(any(feature = "ndrustfft", all(feature = "threads", not(feature = "rustfft"))))]
backend_test_suite! {
    mod multi_threaded,
    backend = crate::Selected,
    config = fftbench_hal::config::PlanConfig {
        effort: fftbench_hal::config::Effort::Estimate,
        threading: super::two_threads(),
    },
    tests = {
        forward_dft_1d => test_forward_dft_1d,
        forward_dft_2d => test_forward_dft_2d,
        forward_dft_3d => test_forward_dft_3d,
        plan_teardown_balances => test_plan_teardown_balances,
        end_to_end_1d_1024 => test_end_to_end_1d_1024,
        input_untouched => test_input_untouched,
    }
}

#[test]
fn supported_dims_are_listed() {
    assert!(SUPPORTED_DIMS.contains(&1));
    assert!(SUPPORTED_DIMS.iter().all(|d| (1..=3).contains(d)));
    assert!(!NAME.is_empty());
}

#[test]
fn run_once_reports_timings() {
    let mut source: Source = Source::from_u64(1);
    let timing: OnceTiming = run_once_selected(1, 1024, &PlanConfig::default(), &mut source).unwrap();
    assert!(timing.setup.as_nanos() > 0);
}

#[test]
fn run_once_rejects_unsupported_dims() {
    let mut source: Source = Source::from_u64(1);
    for dims in [0, 4] {
        let err: PlanError = run_once_selected(dims, 8, &PlanConfig::default(), &mut source).unwrap_err();
        assert!(matches!(err, PlanError::Unsupported { backend, .. } if backend == NAME));
    }
}

#[test]
fn run_once_rejects_bad_extent() {
    let mut source: Source = Source::from_u64(1);
    let err: PlanError = run_once_selected(1, 0, &PlanConfig::default(), &mut source).unwrap_err();
    assert!(matches!(err, PlanError::InvalidShape { .. }));
}

#[cfg(feature = "rustfft")]
#[test]
fn rustfft_is_one_dimensional_and_single_threaded() {
    let mut source: Source = Source::from_u64(1);
    assert!(matches!(
        run_once_selected(2, 16, &PlanConfig::default(), &mut source),
        Err(PlanError::Unsupported { .. })
    ));

    let config: PlanConfig = PlanConfig {
        effort: Effort::Estimate,
        threading: two_threads(),
    };
    let shape: Shape<1> = Shape::new([64]).unwrap();
    assert!(matches!(
        Plan::<Selected, 1>::new(&shape, &config),
        Err(PlanError::Unsupported { backend: "rustfft", .. })
    ));
}

#[cfg(all(any(feature = "fftw3", feature = "mkl"), not(feature = "threads")))]
#[test]
fn fftw_abi_without_threads_refuses_multi() {
    let config: PlanConfig = PlanConfig {
        effort: Effort::Estimate,
        threading: two_threads(),
    };
    let shape: Shape<2> = Shape::cube(8).unwrap();
    assert!(matches!(
        Plan::<Selected, 2>::new(&shape, &config),
        Err(PlanError::Unsupported { .. })
    ));
}

#[cfg(feature = "ndrustfft")]
#[test]
fn ndrustfft_plan_records_thread_count() {
    let config: PlanConfig = PlanConfig {
        effort: Effort::Patient,
        threading: two_threads(),
    };
    let shape: Shape<3> = Shape::new([2, 3, 4]).unwrap();
    let plan: Plan<Selected, 3> = Plan::<Selected, 3>::new(&shape, &config).unwrap();
    assert_eq!(plan.threads(), 2);
    assert_eq!(plan.len(), 24);
}
