use crate::{Complex64, source::Source};

/// Fills `input` with independent uniform samples in `[-1, 1)` for both the
/// real and imaginary part of every element, and zeroes `output`.
pub fn initialize_arrays(source: &mut Source, input: &mut [Complex64], output: &mut [Complex64]) {
    debug_assert_eq!(input.len(), output.len());

    let reim: &mut [f64] = bytemuck::cast_slice_mut(input);
    reim.iter_mut().for_each(|x| *x = source.next_f64(-1.0, 1.0));

    output.fill(Complex64::new(0.0, 0.0));
}
