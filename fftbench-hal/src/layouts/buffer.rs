use std::{
    alloc::Layout,
    fmt::{Debug, Formatter},
    ops::{Deref, DerefMut},
    ptr::NonNull,
};

use crate::{Complex64, DEFAULTALIGN, error::PlanError, stats};

/// Owned, zero-initialized run of complex samples aligned to [`DEFAULTALIGN`].
///
/// Unlike a `Vec` built over a custom-aligned allocation, the buffer keeps the
/// exact [`Layout`] it was allocated with and frees through it.
pub struct ComplexBuf {
    ptr: NonNull<Complex64>,
    len: usize,
    layout: Layout,
}

unsafe impl Send for ComplexBuf {}
unsafe impl Sync for ComplexBuf {}

impl ComplexBuf {
    /// Allocates `len` zeroed complex samples.
    ///
    /// Returns [`PlanError::Alloc`] instead of aborting when the allocator
    /// cannot serve the request.
    pub fn alloc(len: usize) -> Result<Self, PlanError> {
        if len == 0 {
            return Err(PlanError::invalid_shape("buffer length must be positive"));
        }

        let bytes: usize = len
            .checked_mul(size_of::<Complex64>())
            .and_then(|b| b.checked_next_multiple_of(DEFAULTALIGN))
            .ok_or(PlanError::Alloc { bytes: usize::MAX })?;

        let layout: Layout = Layout::from_size_align(bytes, DEFAULTALIGN).map_err(|_| PlanError::Alloc { bytes })?;

        let ptr: NonNull<Complex64> = unsafe {
            let raw: *mut u8 = std::alloc::alloc_zeroed(layout);
            NonNull::new(raw as *mut Complex64).ok_or(PlanError::Alloc { bytes })?
        };

        debug_assert!(crate::is_aligned(ptr.as_ptr()));
        stats::buffer_created();

        Ok(Self { ptr, len, layout })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_ptr(&self) -> *const Complex64 {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut Complex64 {
        self.ptr.as_ptr()
    }

    /// Interleaved `re, im` view: `2 * len` doubles.
    pub fn as_f64s(&self) -> &[f64] {
        bytemuck::cast_slice(self.deref())
    }

    pub fn as_f64s_mut(&mut self) -> &mut [f64] {
        bytemuck::cast_slice_mut(self.deref_mut())
    }
}

impl Deref for ComplexBuf {
    type Target = [Complex64];

    #[inline]
    fn deref(&self) -> &[Complex64] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl DerefMut for ComplexBuf {
    #[inline]
    fn deref_mut(&mut self) -> &mut [Complex64] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for ComplexBuf {
    fn drop(&mut self) {
        unsafe { std::alloc::dealloc(self.ptr.as_ptr() as *mut u8, self.layout) };
        stats::buffer_dropped();
    }
}

impl Debug for ComplexBuf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplexBuf")
            .field("len", &self.len)
            .field("bytes", &self.layout.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_is_zeroed_and_aligned() {
        let buf: ComplexBuf = ComplexBuf::alloc(1000).unwrap();
        assert_eq!(buf.len(), 1000);
        assert_eq!(buf.as_f64s().len(), 2000);
        assert!(crate::is_aligned(buf.as_ptr()));
        assert!(buf.as_f64s().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn f64_view_is_interleaved() {
        let mut buf: ComplexBuf = ComplexBuf::alloc(2).unwrap();
        buf[1] = Complex64::new(3.0, -4.0);
        assert_eq!(buf.as_f64s(), &[0.0, 0.0, 3.0, -4.0]);
    }

    #[test]
    fn drop_balances_counter() {
        let before: isize = stats::live_buffers();
        {
            let _a: ComplexBuf = ComplexBuf::alloc(8).unwrap();
            let _b: ComplexBuf = ComplexBuf::alloc(8).unwrap();
            assert_eq!(stats::live_buffers(), before + 2);
        }
        assert_eq!(stats::live_buffers(), before);
    }

    #[test]
    fn zero_len_is_rejected() {
        assert!(ComplexBuf::alloc(0).is_err());
    }
}
