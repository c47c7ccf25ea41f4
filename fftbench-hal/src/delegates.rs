use crate::{
    Complex64,
    api::{PlanExecute, PlanNew},
    config::PlanConfig,
    error::PlanError,
    layouts::{Backend, Plan, Shape},
    oep::{PlanExecuteImpl, PlanNewImpl},
};

impl<B, const D: usize> PlanNew<B, D> for Plan<B, D>
where
    B: Backend + PlanNewImpl<D>,
{
    fn new(shape: &Shape<D>, config: &PlanConfig) -> Result<Self, PlanError> {
        let plan: Plan<B, D> = B::plan_new_impl(shape, config)?;
        log::debug!(
            "{}: planned {}-d transform of {} ({:?}, {} thread(s))",
            B::NAME,
            D,
            shape,
            config.effort,
            plan.threads()
        );
        Ok(plan)
    }
}

impl<B, const D: usize> PlanExecute for Plan<B, D>
where
    B: Backend + PlanExecuteImpl,
{
    #[inline]
    fn execute(&mut self, input: &[Complex64], output: &mut [Complex64]) {
        assert_eq!(input.len(), self.len(), "input length does not match plan");
        assert_eq!(output.len(), self.len(), "output length does not match plan");
        unsafe { B::execute_impl(self.handle(), input, output) }
    }
}
