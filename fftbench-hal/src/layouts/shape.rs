use std::fmt::{Display, Formatter};

use crate::{MAX_DIMS, error::PlanError};

/// Per-axis extents of a `D`-dimensional transform, row-major (axis 0 is the
/// slowest-varying).
///
/// Every extent is positive and the total element count fits both `usize`
/// and the C `int` used by FFTW-style planners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape<const D: usize> {
    extents: [usize; D],
}

impl<const D: usize> Shape<D> {
    pub fn new(extents: [usize; D]) -> Result<Self, PlanError> {
        const {
            assert!(
                D >= 1 && D <= MAX_DIMS,
                "transform dimensionality must be 1, 2 or 3"
            )
        };

        if let Some(axis) = extents.iter().position(|&n| n == 0) {
            return Err(PlanError::invalid_shape(format!("extent of axis {axis} is zero")));
        }

        let len: usize = extents
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or_else(|| PlanError::invalid_shape(format!("{extents:?} overflows usize")))?;

        if len > i32::MAX as usize {
            return Err(PlanError::invalid_shape(format!(
                "{extents:?} has {len} elements, more than {} are not addressable",
                i32::MAX
            )));
        }

        Ok(Self { extents })
    }

    /// Equal extent along every axis.
    pub fn cube(extent: usize) -> Result<Self, PlanError> {
        Self::new([extent; D])
    }

    #[inline]
    pub fn extents(&self) -> &[usize; D] {
        &self.extents
    }

    #[inline]
    pub fn dims(&self) -> usize {
        D
    }

    /// Total number of complex samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.extents.iter().product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<const D: usize> Display for Shape<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, n) in self.extents.iter().enumerate() {
            if i > 0 {
                write!(f, "x")?;
            }
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_len() {
        let shape: Shape<3> = Shape::<3>::cube(16).unwrap();
        assert_eq!(shape.len(), 4096);
        assert_eq!(shape.dims(), 3);
        assert_eq!(shape.to_string(), "16x16x16");
    }

    #[test]
    fn non_uniform_extents_are_accepted() {
        let shape: Shape<2> = Shape::new([8, 3]).unwrap();
        assert_eq!(shape.len(), 24);
        assert_eq!(shape.extents(), &[8, 3]);
    }

    #[test]
    fn zero_extent_is_rejected() {
        let err: PlanError = Shape::<2>::new([4, 0]).unwrap_err();
        assert!(matches!(err, PlanError::InvalidShape { .. }), "{err}");
    }

    #[test]
    fn oversized_is_rejected() {
        assert!(Shape::<3>::cube(1 << 11).is_err());
        assert!(Shape::<2>::new([usize::MAX, 2]).is_err());
    }
}
