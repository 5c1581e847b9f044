/// Errors the transform can return.
///
/// Every variant is a parameter validation failure. The buffers are never
/// modified when an error is returned.
#[derive(Copy, Clone, Hash, PartialEq, Eq)]
pub enum FftError {
    /// A buffer is empty.
    MissingBuffer,
    /// Length is outside of `4..=16384`.
    LengthOutOfRange(usize),
    /// Length is not a power of two.
    NotPowerOfTwo(usize),
    /// A buffer does not hold exactly the requested number of samples.
    BufferLength {
        expected: usize,
        real: usize,
        imag: usize,
    },
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingBuffer => f.write_str("Input buffer is missing"),
            Self::LengthOutOfRange(len) => {
                write!(f, "Length {len} is outside of the supported range 4..=16384")
            }
            Self::NotPowerOfTwo(len) => write!(f, "Length {len} is not a power of two"),
            Self::BufferLength {
                expected,
                real,
                imag,
            } => write!(
                f,
                "Buffer size mismatch: expected {expected} samples, got {real} real and {imag} imaginary"
            ),
        }
    }
}

impl core::fmt::Debug for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self, f)
    }
}

#[cfg(not(feature = "no_std"))]
impl std::error::Error for FftError {}
