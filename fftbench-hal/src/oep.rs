//! Open Extension Points (OEP) for backend crates.
//!
//! Each trait mirrors a safe trait in [`crate::api`] with an `Impl` suffix.
//! The traits are `unsafe` because the plan handle crosses into foreign code
//! and the HAL relies on the implementor for memory safety.

use std::ptr::NonNull;

use crate::{
    Complex64,
    config::PlanConfig,
    error::PlanError,
    layouts::{Backend, Plan, Shape},
};

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// # Safety
/// The returned plan's handle must stay valid for transforms of `shape`
/// until [`Backend::destroy`] is called on it, and planning must not read or
/// write any caller-visible buffer.
#[diagnostic::on_unimplemented(
    message = "the `{Self}` backend does not provide this transform dimensionality",
    label = "no `PlanNewImpl` for this dimensionality",
    note = "only the dimensionalities a backend implements `PlanNewImpl<D>` for can be registered"
)]
pub unsafe trait PlanNewImpl<const D: usize>: Backend {
    fn plan_new_impl(shape: &Shape<D>, config: &PlanConfig) -> Result<Plan<Self, D>, PlanError>;
}

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// # Safety
/// Callers guarantee that `input` and `output` both hold the plan's element
/// count; implementors must not write through `input`.
pub unsafe trait PlanExecuteImpl: Backend {
    unsafe fn execute_impl(handle: NonNull<Self::Handle>, input: &[Complex64], output: &mut [Complex64]);
}
