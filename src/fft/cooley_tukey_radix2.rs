use super::twiddles::stage_rotation;
use crate::{Direction, FftSize, fft::Complex32};

/// Performs the in-place radix-2 butterfly stages using the Cooley-Tukey DIT recursion.
///
/// Leaves the result in bit-reversed order; [`bit_reverse_radix2`] restores natural order.
///
/// Twiddles are not tabulated per element. Each stage starts at `1 + 0i` and advances
/// by the stage rotation once per butterfly column.
pub(crate) fn cooley_tukey_radix_2(
    real: &mut [f32],
    imag: &mut [f32],
    size: FftSize,
    direction: Direction,
) {
    let n = size.len();
    let log2n = size.log2();
    debug_assert!(real.len() == n && imag.len() == n);

    let mut span = n;

    for stage in 1..=log2n {
        let rotation = stage_rotation(log2n - stage, direction);
        let half_span = span >> 1;

        let mut twiddle = Complex32::new(1.0, 0.0);

        for column in 0..half_span {
            for top in (column..n).step_by(span) {
                let bottom = top + half_span;

                let a = Complex32::new(real[top], imag[top]);
                let b = Complex32::new(real[bottom], imag[bottom]);

                let sum = a.add(&b);
                let difference = a.sub(&b).mul(&twiddle);

                real[top] = sum.re;
                imag[top] = sum.im;
                real[bottom] = difference.re;
                imag[bottom] = difference.im;
            }

            twiddle = twiddle.mul(&rotation);
        }

        span = half_span;
    }
}

/// Performs bit-reversal permutation on both buffers using a mirrored counter.
///
/// The counter `reversed` tracks the bit-reversal of `index` (both 1-based) and is advanced
/// by propagating a carry from the most significant bit downwards.
pub(crate) fn bit_reverse_radix2(real: &mut [f32], imag: &mut [f32]) {
    let n = real.len();
    let half = n >> 1;

    let mut reversed = 1;

    for index in 1..n {
        // Only swap if index < reversed to avoid double-swapping.
        if index < reversed {
            real.swap(index - 1, reversed - 1);
            imag.swap(index - 1, reversed - 1);
        }

        let mut carry = half;
        while carry < reversed {
            reversed -= carry;
            carry >>= 1;
        }
        reversed += carry;
    }
}
