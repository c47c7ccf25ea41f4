//! Criterion-based benchmark harnesses, generic over any backend.
//!
//! Backend crates call [`bench_c2c`] once per dimensionality they support.

use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};

use criterion::{BenchmarkId, Criterion, Throughput};

use crate::{
    api::{PlanExecute, PlanNew},
    config::BenchConfig,
    error::PlanError,
    layouts::{Backend, Plan, Shape},
    scenario::{self, Scenario},
    source::Source,
};

/// Unwind payload marking a scenario whose setup failed and was logged.
struct SetupFailed;

/// Times forward `D`-dimensional complex-to-complex transforms for every
/// registered per-axis extent.
///
/// A scenario is set up on the first call Criterion makes into it, so
/// benchmarks excluded by a command-line filter never allocate or plan. Its
/// buffers and plan are released before the next scenario is set up. A
/// scenario that fails to set up is logged and skipped; the remaining ones
/// still run.
pub fn bench_c2c<B: Backend, const D: usize>(c: &mut Criterion, label: &str, config: &BenchConfig)
where
    Plan<B, D>: PlanNew<B, D> + PlanExecute,
{
    let group_name: String = scenario::group_name(D, label);

    let mut group = c.benchmark_group(&group_name);

    let mut source: Source = config.source();

    for extent in scenario::extents(D, config.max_log_len) {
        let (_, mut branch) = source.branch();

        let shape: Shape<D> = match Shape::<D>::cube(extent) {
            Ok(shape) => shape,
            Err(err) => {
                log::error!("{group_name}/{extent}: {err}");
                continue;
            }
        };

        let mut scenario: Option<Result<Scenario<B, D>, PlanError>> = None;

        let id: BenchmarkId = BenchmarkId::from_parameter(extent);
        group.throughput(Throughput::Elements(shape.len() as u64));

        // Criterion insists that every call iterates, so a failed setup
        // unwinds out of the group call instead of returning.
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            group.bench_with_input(id, &shape, |b, shape| {
                match scenario.get_or_insert_with(|| Scenario::<B, D>::setup(shape, &config.plan, &mut branch)) {
                    Ok(scenario) => b.iter(|| scenario.execute()),
                    Err(err) => {
                        log::error!("{group_name}/{extent}: scenario skipped: {err}");
                        resume_unwind(Box::new(SetupFailed));
                    }
                }
            });
        }));

        drop(scenario);

        if let Err(payload) = outcome {
            if !payload.is::<SetupFailed>() {
                resume_unwind(payload);
            }
        }
    }

    group.finish();
}
