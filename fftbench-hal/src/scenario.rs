//! Scenario registry.
//!
//! A scenario is one (backend, per-axis extent, dimensionality) triple. The
//! per-axis extents are powers of two; the registry only lists those whose
//! total element count stays within the configured cap.

use std::{
    hint::black_box,
    ops::RangeInclusive,
    time::{Duration, Instant},
};

use crate::{
    Complex64,
    api::{PlanExecute, PlanNew},
    config::{PlanConfig, Threading},
    error::PlanError,
    init::initialize_arrays,
    layouts::{Backend, ComplexBuf, Plan, Shape},
    source::Source,
};

/// `log2` of the per-axis extents registered for each dimensionality.
pub const LOG_EXTENTS: [RangeInclusive<u32>; 3] = [8..=25, 4..=12, 3..=8];

/// Per-axis extents registered for `dims`-dimensional transforms, ascending.
///
/// Extents whose total element count exceeds `2^max_log_len` are dropped.
pub fn extents(dims: usize, max_log_len: u32) -> Vec<usize> {
    assert!((1..=LOG_EXTENTS.len()).contains(&dims), "unsupported dimensionality {dims}");
    LOG_EXTENTS[dims - 1]
        .clone()
        .filter(|&log_n| log_n * dims as u32 <= max_log_len)
        .map(|log_n| 1usize << log_n)
        .collect()
}

/// Label of a backend build: its name, suffixed with `-mt` when threaded.
pub fn label(backend: &str, threading: &Threading) -> String {
    if threading.is_multi() {
        format!("{backend}-mt")
    } else {
        backend.to_string()
    }
}

/// Criterion group name of every scenario sharing `dims` and `label`.
pub fn group_name(dims: usize, label: &str) -> String {
    format!("c2c_{dims}d::{label}")
}

/// Owned state of one scenario: initialized buffers and the plan built for
/// them.
///
/// Field order matters: the plan is dropped before the buffers it was
/// planned against.
pub struct Scenario<B: Backend, const D: usize> {
    plan: Plan<B, D>,
    input: ComplexBuf,
    output: ComplexBuf,
}

impl<B: Backend, const D: usize> Scenario<B, D>
where
    Plan<B, D>: PlanNew<B, D> + PlanExecute,
{
    /// Allocates and initializes both buffers, then builds the plan.
    ///
    /// On error everything acquired so far has already been released.
    pub fn setup(shape: &Shape<D>, config: &PlanConfig, source: &mut Source) -> Result<Self, PlanError> {
        let mut input: ComplexBuf = ComplexBuf::alloc(shape.len())?;
        let mut output: ComplexBuf = ComplexBuf::alloc(shape.len())?;
        initialize_arrays(source, &mut input, &mut output);

        let plan: Plan<B, D> = Plan::<B, D>::new(shape, config)?;

        Ok(Self { plan, input, output })
    }

    /// One full forward transform; the body of the timed loop.
    #[inline]
    pub fn execute(&mut self) {
        self.plan.execute(&self.input, &mut self.output);
        black_box(&mut self.output);
    }

    pub fn plan(&self) -> &Plan<B, D> {
        &self.plan
    }

    pub fn input(&self) -> &[Complex64] {
        &self.input
    }

    pub fn output(&self) -> &[Complex64] {
        &self.output
    }
}

/// Wall-clock cost of setting up one scenario and running it once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OnceTiming {
    pub setup: Duration,
    pub execute: Duration,
}

/// Sets up a scenario, executes it a single time and tears it down.
pub fn time_once<B: Backend, const D: usize>(
    shape: &Shape<D>,
    config: &PlanConfig,
    source: &mut Source,
) -> Result<OnceTiming, PlanError>
where
    Plan<B, D>: PlanNew<B, D> + PlanExecute,
{
    let start: Instant = Instant::now();
    let mut scenario: Scenario<B, D> = Scenario::<B, D>::setup(shape, config, source)?;
    let setup: Duration = start.elapsed();

    let start: Instant = Instant::now();
    scenario.execute();
    let execute: Duration = start.elapsed();

    Ok(OnceTiming { setup, execute })
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn default_tables() {
        let one: Vec<usize> = extents(1, 25);
        assert_eq!(one.first(), Some(&256));
        assert_eq!(one.last(), Some(&(1 << 25)));
        assert_eq!(one.len(), 18);

        assert_eq!(extents(2, 25), (4..=12).map(|l| 1usize << l).collect::<Vec<_>>());
        assert_eq!(extents(3, 25), vec![8, 16, 32, 64, 128, 256]);
    }

    #[test]
    fn cap_limits_total_length() {
        assert_eq!(extents(1, 10), vec![256, 512, 1024]);
        assert_eq!(extents(2, 10), vec![16, 32]);
        assert_eq!(extents(3, 12), vec![8, 16]);
        assert!(extents(3, 8).is_empty());
    }

    #[test]
    fn names_are_unique() {
        let single: Threading = Threading::Single;
        let multi: Threading = Threading::parse(Some("4")).unwrap();
        let names: Vec<String> = ["fftw3", "mkl"]
            .iter()
            .flat_map(|b| [label(b, &single), label(b, &multi)])
            .flat_map(|l| (1..=3).map(move |d| group_name(d, &l)))
            .flat_map(|g| extents(1, 25).into_iter().map(move |n| format!("{g}/{n}")))
            .collect();
        assert_eq!(names.iter().unique().count(), names.len());
        assert!(names.contains(&"c2c_2d::mkl-mt/1024".to_string()));
    }
}
