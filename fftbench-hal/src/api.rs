use crate::{
    Complex64,
    config::PlanConfig,
    error::PlanError,
    layouts::{Backend, Shape},
};

/// Instantiate a new [crate::layouts::Plan].
pub trait PlanNew<B: Backend, const D: usize>: Sized {
    fn new(shape: &Shape<D>, config: &PlanConfig) -> Result<Self, PlanError>;
}

/// Run one forward transform from `input` into `output`.
///
/// Both slices must hold exactly [crate::layouts::Plan::len] samples.
/// `input` is only read.
pub trait PlanExecute {
    fn execute(&mut self, input: &[Complex64], output: &mut [Complex64]);
}
