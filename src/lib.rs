//! Allocation-free, in-place radix-2 FFT.
//!
//! The transform works on split buffers (one slice for the real parts, one for
//! the imaginary parts) and overwrites them with the result. Supported lengths
//! are the powers of two from 4 to 16384.
//!
//! ```
//! use nanofft::{Direction, transform};
//!
//! let mut real = [1.0, 0.0, 0.0, 0.0];
//! let mut imag = [0.0; 4];
//!
//! transform(&mut real, &mut imag, 4, Direction::Forward).unwrap();
//! assert_eq!(real, [1.0; 4]);
//! ```
//!
//! # Normalization
//!
//!  - Forward transforms are unnormalized: bin 0 holds `N * mean`.
//!  - Inverse transforms scale by `1/N`, so a forward+inverse round-trip restores the input.
//!
//! # Features
//!
//!  - `no_std`: builds without the standard library.
#![cfg_attr(all(feature = "no_std", not(test)), no_std)]

mod error;
mod fft;
pub mod verify;

pub use error::FftError;
pub use fft::{forward, inverse, transform};

/// Smallest supported transform length.
pub const FFT_MIN_SIZE: usize = 4;
/// Largest supported transform length.
pub const FFT_MAX_SIZE: usize = 16384;

/// All transform lengths the FFT can operate on.
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash)]
pub enum FftSize {
    /// 2^2
    _4,
    /// 2^3
    _8,
    /// 2^4
    _16,
    /// 2^5
    _32,
    /// 2^6
    _64,
    /// 2^7
    _128,
    /// 2^8
    _256,
    /// 2^9
    _512,
    /// 2^10
    _1024,
    /// 2^11
    _2048,
    /// 2^12
    _4096,
    /// 2^13
    _8192,
    /// 2^14
    _16384,
}

impl FftSize {
    /// All supported sizes in ascending order.
    pub const ALL: [FftSize; 13] = [
        FftSize::_4,
        FftSize::_8,
        FftSize::_16,
        FftSize::_32,
        FftSize::_64,
        FftSize::_128,
        FftSize::_256,
        FftSize::_512,
        FftSize::_1024,
        FftSize::_2048,
        FftSize::_4096,
        FftSize::_8192,
        FftSize::_16384,
    ];

    /// Returns the number of butterfly stages, `log2(len)`.
    pub const fn log2(self) -> usize {
        match self {
            FftSize::_4 => 2,
            FftSize::_8 => 3,
            FftSize::_16 => 4,
            FftSize::_32 => 5,
            FftSize::_64 => 6,
            FftSize::_128 => 7,
            FftSize::_256 => 8,
            FftSize::_512 => 9,
            FftSize::_1024 => 10,
            FftSize::_2048 => 11,
            FftSize::_4096 => 12,
            FftSize::_8192 => 13,
            FftSize::_16384 => 14,
        }
    }

    /// Returns the transform length.
    pub const fn len(self) -> usize {
        1 << self.log2()
    }
}

impl From<FftSize> for usize {
    fn from(value: FftSize) -> Self {
        value.len()
    }
}

impl TryFrom<usize> for FftSize {
    type Error = FftError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if !(FFT_MIN_SIZE..=FFT_MAX_SIZE).contains(&value) {
            return Err(FftError::LengthOutOfRange(value));
        }

        match value {
            4 => Ok(FftSize::_4),
            8 => Ok(FftSize::_8),
            16 => Ok(FftSize::_16),
            32 => Ok(FftSize::_32),
            64 => Ok(FftSize::_64),
            128 => Ok(FftSize::_128),
            256 => Ok(FftSize::_256),
            512 => Ok(FftSize::_512),
            1024 => Ok(FftSize::_1024),
            2048 => Ok(FftSize::_2048),
            4096 => Ok(FftSize::_4096),
            8192 => Ok(FftSize::_8192),
            16384 => Ok(FftSize::_16384),
            _ => Err(FftError::NotPowerOfTwo(value)),
        }
    }
}

/// Direction of the transform.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Signal to spectrum. Output is unnormalized.
    #[default]
    Forward,
    /// Spectrum to signal. Output is scaled by `1/N`.
    Inverse,
}

impl From<bool> for Direction {
    /// `true` selects the forward transform.
    fn from(is_forward: bool) -> Self {
        match is_forward {
            true => Direction::Forward,
            false => Direction::Inverse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_roundtrip_all_variants() {
        for size in FftSize::ALL {
            let len: usize = size.into();
            assert_eq!(FftSize::try_from(len), Ok(size));
            assert_eq!(1 << size.log2(), len);
            assert!((2..=14).contains(&size.log2()));
        }
    }

    #[test]
    fn test_size_rejects_out_of_range() {
        for len in [0, 1, 2, 3, 32768, 65536, usize::MAX] {
            assert_eq!(
                FftSize::try_from(len),
                Err(FftError::LengthOutOfRange(len)),
                "length {len}"
            );
        }
    }

    #[test]
    fn test_size_rejects_non_power_of_two() {
        for len in [5, 6, 7, 12, 100, 1000, 16383] {
            assert_eq!(
                FftSize::try_from(len),
                Err(FftError::NotPowerOfTwo(len)),
                "length {len}"
            );
        }
    }

    #[test]
    fn test_size_accepts_exactly_the_powers_of_two_in_range() {
        for len in FFT_MIN_SIZE..=FFT_MAX_SIZE {
            assert_eq!(
                FftSize::try_from(len).is_ok(),
                len.is_power_of_two(),
                "length {len}"
            );
        }
    }

    #[test]
    fn test_direction_from_bool() {
        assert_eq!(Direction::from(true), Direction::Forward);
        assert_eq!(Direction::from(false), Direction::Inverse);
        assert_eq!(Direction::default(), Direction::Forward);
    }
}
