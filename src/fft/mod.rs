pub(crate) mod cooley_tukey_radix2;
mod twiddles;

use cooley_tukey_radix2::{bit_reverse_radix2, cooley_tukey_radix_2};

use crate::{Direction, FftError, FftSize};

/// Simple complex number struct used for the butterfly arithmetic.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Complex32 {
    pub(crate) re: f32,
    pub(crate) im: f32,
}

impl Complex32 {
    #[inline(always)]
    pub(crate) const fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }

    #[inline(always)]
    pub(crate) const fn conj(&self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    #[inline(always)]
    pub(crate) const fn add(&self, o: &Self) -> Self {
        Self {
            re: self.re + o.re,
            im: self.im + o.im,
        }
    }

    #[inline(always)]
    pub(crate) const fn sub(&self, o: &Self) -> Self {
        Self {
            re: self.re - o.re,
            im: self.im - o.im,
        }
    }

    #[inline(always)]
    pub(crate) const fn mul(&self, o: &Self) -> Self {
        Self {
            re: self.re * o.re - self.im * o.im,
            im: self.re * o.im + self.im * o.re,
        }
    }
}

/// Computes the FFT of `len` complex samples in place.
///
/// `real` and `imag` hold the real and imaginary parts and must both contain exactly `len`
/// samples. `len` must be a power of two in `4..=16384`.
///
/// On success the buffers hold the result in natural order:
///  - [`Direction::Forward`]: the unnormalized spectrum (bin 0 is `len * mean`).
///  - [`Direction::Inverse`]: the time signal, scaled by `1/len`.
///
/// On error the buffers are left untouched.
pub fn transform(
    real: &mut [f32],
    imag: &mut [f32],
    len: usize,
    direction: Direction,
) -> Result<(), FftError> {
    let size = validate(real, imag, len).inspect_err(|error| {
        tracing::debug!(len, %error, "rejected transform parameters");
    })?;

    cooley_tukey_radix_2(real, imag, size, direction);
    bit_reverse_radix2(real, imag);

    if direction == Direction::Inverse {
        normalize(real, imag, size);
    }

    Ok(())
}

/// Forward transform over the whole buffers. See [`transform`].
pub fn forward(real: &mut [f32], imag: &mut [f32]) -> Result<(), FftError> {
    let len = real.len();
    transform(real, imag, len, Direction::Forward)
}

/// Inverse transform over the whole buffers. See [`transform`].
pub fn inverse(real: &mut [f32], imag: &mut [f32]) -> Result<(), FftError> {
    let len = real.len();
    transform(real, imag, len, Direction::Inverse)
}

fn validate(real: &[f32], imag: &[f32], len: usize) -> Result<FftSize, FftError> {
    if real.is_empty() || imag.is_empty() {
        return Err(FftError::MissingBuffer);
    }

    let size = FftSize::try_from(len)?;

    if real.len() != len || imag.len() != len {
        return Err(FftError::BufferLength {
            expected: len,
            real: real.len(),
            imag: imag.len(),
        });
    }

    Ok(size)
}

fn normalize(real: &mut [f32], imag: &mut [f32], size: FftSize) {
    let scale = 1.0 / size.len() as f32;

    real.iter_mut()
        .chain(imag.iter_mut())
        .for_each(|value| *value *= scale);
}
