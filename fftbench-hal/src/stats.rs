//! Live-object counters used to check that plans and buffers are torn down
//! exactly once.
//!
//! Counters are thread-local: a scenario creates and drops its plan and
//! buffers on the thread that runs it, so concurrent tests do not disturb
//! each other.

use std::cell::Cell;

thread_local! {
    static LIVE_PLANS: Cell<isize> = const { Cell::new(0) };
    static LIVE_BUFFERS: Cell<isize> = const { Cell::new(0) };
}

/// Plans created minus plans dropped on the current thread.
pub fn live_plans() -> isize {
    LIVE_PLANS.with(Cell::get)
}

/// Buffers allocated minus buffers freed on the current thread.
pub fn live_buffers() -> isize {
    LIVE_BUFFERS.with(Cell::get)
}

pub(crate) fn plan_created() {
    LIVE_PLANS.with(|c| c.set(c.get() + 1));
}

pub(crate) fn plan_dropped() {
    LIVE_PLANS.with(|c| c.set(c.get() - 1));
}

pub(crate) fn buffer_created() {
    LIVE_BUFFERS.with(|c| c.set(c.get() + 1));
}

pub(crate) fn buffer_dropped() {
    LIVE_BUFFERS.with(|c| c.set(c.get() - 1));
}
