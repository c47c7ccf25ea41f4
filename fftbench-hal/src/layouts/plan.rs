use std::{
    fmt::{Debug, Formatter},
    marker::PhantomData,
    ptr::NonNull,
};

use crate::{layouts::Shape, stats};

/// One FFT library integration.
///
/// `Handle` is whatever the library hands back from planning: an opaque C
/// struct behind a pointer, or a heap-allocated Rust planner state.
#[allow(clippy::missing_safety_doc)]
pub trait Backend: Sized + 'static {
    type Handle: 'static;

    /// Short name used in scenario labels, e.g. `fftw3`.
    const NAME: &'static str;

    unsafe fn destroy(handle: NonNull<Self::Handle>);
}

/// A prepared forward complex-to-complex transform over a fixed [`Shape`].
///
/// Owns its backend handle exclusively; the handle is destroyed exactly once
/// when the plan is dropped.
pub struct Plan<B: Backend, const D: usize> {
    ptr: NonNull<B::Handle>,
    shape: Shape<D>,
    threads: usize,
    _marker: PhantomData<B>,
}

impl<B: Backend, const D: usize> Plan<B, D> {
    /// Takes ownership of a freshly created backend handle.
    ///
    /// # Safety
    /// `ptr` must be a live handle valid for transforms of `shape`, not owned
    /// by anything else, and releasable through [`Backend::destroy`].
    #[inline]
    pub unsafe fn from_nonnull(ptr: NonNull<B::Handle>, shape: Shape<D>, threads: usize) -> Self {
        stats::plan_created();
        Self {
            ptr,
            shape,
            threads,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn handle(&self) -> NonNull<B::Handle> {
        self.ptr
    }

    #[inline]
    pub fn shape(&self) -> &Shape<D> {
        &self.shape
    }

    /// Number of complex samples per transform.
    #[inline]
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Worker threads the plan was configured with.
    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl<B: Backend, const D: usize> Drop for Plan<B, D> {
    fn drop(&mut self) {
        unsafe { B::destroy(self.ptr) }
        stats::plan_dropped();
    }
}

impl<B: Backend, const D: usize> Debug for Plan<B, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plan")
            .field("backend", &B::NAME)
            .field("shape", &self.shape)
            .field("threads", &self.threads)
            .finish()
    }
}
