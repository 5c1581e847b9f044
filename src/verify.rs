//! Self checks that feed synthetic signals with known spectra through the transform.
//!
//! All buffers live on the stack, so the checks run in `no_std` builds as well. Results are
//! returned to the caller and also emitted as `tracing` events.
//!
//! | Case      | Input                                          | Expected spectrum                    |
//! |-----------|------------------------------------------------|--------------------------------------|
//! | Zeros     | all zero                                       | all zero                             |
//! | Impulse   | `1.0` at `position`                            | `exp(-2πi·k·position/N)`             |
//! | Harmonics | `0.5 + cos(θi) + sin(2θi) + cos(3θi)`, `θ=2π/N` | `N/2` at bins 0, ±1, ±3; `∓iN/2` at ±2 |
//!
//! Every case runs the inverse transform afterwards and compares against the source signal.

use core::f64::consts::PI;

use crate::{Direction, transform};

/// Largest error of a spectral bin relative to the spectrum peak for transforms above 256.
pub const PEAK_RELATIVE_ERROR: f32 = 1e-4;

/// Absolute comparison tolerance for signals of unit amplitude.
///
/// Applies to time-domain samples and to the spectra of short transforms. The recursive twiddle
/// update accumulates rounding error, so long transforms get a looser bound.
pub const fn tolerance(len: usize) -> f32 {
    if len <= 256 { 1e-3 } else { 5e-2 }
}

/// Comparison tolerance for the bins of a spectrum whose largest bin has magnitude `peak`.
///
/// Up to length 256 this is [`tolerance`]. Above that the rounding error of every bin grows
/// with the energy of the signal, leakage into empty bins included, so the bound is
/// `PEAK_RELATIVE_ERROR * peak` and never less than [`tolerance`].
pub fn spectral_tolerance(len: usize, peak: f32) -> f32 {
    let absolute = tolerance(len);
    if len <= 256 {
        absolute
    } else {
        libm::fmaxf(absolute, PEAK_RELATIVE_ERROR * libm::fabsf(peak))
    }
}

/// Synthetic signal a check feeds through the transform.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Case {
    /// All samples zero.
    Zeros,
    /// Single unit sample.
    Impulse,
    /// DC plus the first three harmonics.
    Harmonics,
}

impl Case {
    /// Returns the name used in logs and reports.
    pub const fn name(self) -> &'static str {
        match self {
            Case::Zeros => "zeros",
            Case::Impulse => "impulse",
            Case::Harmonics => "harmonics",
        }
    }
}

impl core::fmt::Display for Case {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a single check.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    pub case: Case,
    /// Transform length.
    pub size: usize,
    /// Impulse position. Zero for the other cases.
    pub position: usize,
    pub passed: bool,
}

/// Results of [`verify_all`].
#[derive(Debug, Clone)]
pub struct VerifyReport {
    outcomes: [CaseOutcome; 7],
}

impl VerifyReport {
    /// Returns the outcome of every check in execution order.
    pub fn outcomes(&self) -> &[CaseOutcome] {
        &self.outcomes
    }

    /// Returns `true` if every check passed.
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.passed)
    }
}

/// Runs the full set of checks, each with one forward and one inverse pass.
pub fn verify_all() -> VerifyReport {
    let outcomes = [
        outcome(Case::Zeros, 256, 0, check_zeros::<256>(1, 1)),
        outcome(Case::Impulse, 256, 0, check_impulse::<256>(0, 1, 1)),
        outcome(Case::Impulse, 256, 1, check_impulse::<256>(1, 1, 1)),
        outcome(Case::Impulse, 256, 7, check_impulse::<256>(7, 1, 1)),
        outcome(Case::Harmonics, 8, 0, check_harmonics::<8>(1, 1)),
        outcome(Case::Harmonics, 16, 0, check_harmonics::<16>(1, 1)),
        outcome(Case::Harmonics, 256, 0, check_harmonics::<256>(1, 1)),
    ];

    VerifyReport { outcomes }
}

/// Runs the harmonics check of length 256 with `forward_runs` forward passes and no inverse pass.
///
/// Meant to be called in a loop by external throughput measurements.
pub fn throughput_256(forward_runs: usize) -> bool {
    check_harmonics::<256>(forward_runs, 0)
}

/// Runs the harmonics check of length 4096 with `forward_runs` forward passes and no inverse pass.
pub fn throughput_4096(forward_runs: usize) -> bool {
    check_harmonics::<4096>(forward_runs, 0)
}

/// Checks that an all-zero signal produces an all-zero spectrum.
pub fn check_zeros<const N: usize>(forward_runs: usize, inverse_runs: usize) -> bool {
    let real = [0.0f32; N];
    let imag = [0.0f32; N];

    run_case(
        Case::Zeros,
        0,
        &real,
        &imag,
        forward_runs,
        inverse_runs,
        |_, re, im| bin_is(re, im, 0.0, 0.0, spectral_tolerance(N, 0.0)),
    )
}

/// Checks that a unit impulse at `position` produces a unit-magnitude phase ramp.
///
/// Returns `false` if `position` is outside of the buffer.
pub fn check_impulse<const N: usize>(
    position: usize,
    forward_runs: usize,
    inverse_runs: usize,
) -> bool {
    if position >= N {
        return false;
    }

    let mut real = [0.0f32; N];
    let imag = [0.0f32; N];
    real[position] = 1.0;

    run_case(
        Case::Impulse,
        position,
        &real,
        &imag,
        forward_runs,
        inverse_runs,
        |bin, re, im| {
            let epsilon = spectral_tolerance(N, 1.0);
            let phase = -2.0 * PI * ((bin * position) % N) as f64 / N as f64;
            let expected_re = libm::cos(phase) as f32;
            let expected_im = libm::sin(phase) as f32;

            // Every bin of an impulse has unit magnitude.
            bin_is(re, im, expected_re, expected_im, epsilon)
                && approx_eq(re * re + im * im, 1.0, epsilon)
        },
    )
}

/// Checks the bins produced by DC plus three harmonics, the second one phase shifted by 90°.
pub fn check_harmonics<const N: usize>(forward_runs: usize, inverse_runs: usize) -> bool {
    let theta = 2.0 * PI / N as f64;

    let mut real = [0.0f32; N];
    let imag = [0.0f32; N];
    for (i, sample) in real.iter_mut().enumerate() {
        let x = theta * i as f64;
        *sample = (0.5 + libm::cos(x) + libm::sin(2.0 * x) + libm::cos(3.0 * x)) as f32;
    }

    let half = 0.5 * N as f32;
    let epsilon = spectral_tolerance(N, half);

    run_case(
        Case::Harmonics,
        0,
        &real,
        &imag,
        forward_runs,
        inverse_runs,
        |bin, re, im| {
            let (expected_re, expected_im) = match bin {
                0 | 1 | 3 => (half, 0.0),
                2 => (0.0, -half),
                _ if bin == N - 1 || bin == N - 3 => (half, 0.0),
                _ if bin == N - 2 => (0.0, half),
                _ => (0.0, 0.0),
            };
            bin_is(re, im, expected_re, expected_im, epsilon)
        },
    )
}

fn outcome(case: Case, size: usize, position: usize, passed: bool) -> CaseOutcome {
    CaseOutcome {
        case,
        size,
        position,
        passed,
    }
}

fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    libm::fabsf(a - b) < epsilon
}

fn bin_is(re: f32, im: f32, expected_re: f32, expected_im: f32, epsilon: f32) -> bool {
    approx_eq(re, expected_re, epsilon) && approx_eq(im, expected_im, epsilon)
}

/// Transforms the source `forward_runs` times and checks every bin with `bin_matches`, then
/// restores the signal `inverse_runs` times and compares it against the source.
fn run_case<const N: usize>(
    case: Case,
    position: usize,
    source_real: &[f32; N],
    source_imag: &[f32; N],
    forward_runs: usize,
    inverse_runs: usize,
    bin_matches: impl Fn(usize, f32, f32) -> bool,
) -> bool {
    if forward_runs == 0 {
        return false;
    }

    // The restored signal is compared sample by sample against an absolute bound.
    let epsilon = tolerance(N);

    let mut spectrum_real = [0.0f32; N];
    let mut spectrum_imag = [0.0f32; N];

    for _ in 0..forward_runs {
        spectrum_real.copy_from_slice(source_real);
        spectrum_imag.copy_from_slice(source_imag);
        if transform(&mut spectrum_real, &mut spectrum_imag, N, Direction::Forward).is_err() {
            return false;
        }
    }

    dump("spectrum", &spectrum_real, &spectrum_imag);

    let mut passed = (0..N).all(|bin| bin_matches(bin, spectrum_real[bin], spectrum_imag[bin]));

    if inverse_runs > 0 {
        let mut restored_real = [0.0f32; N];
        let mut restored_imag = [0.0f32; N];

        for _ in 0..inverse_runs {
            restored_real.copy_from_slice(&spectrum_real);
            restored_imag.copy_from_slice(&spectrum_imag);
            if transform(&mut restored_real, &mut restored_imag, N, Direction::Inverse).is_err() {
                return false;
            }
        }

        dump("restored", &restored_real, &restored_imag);

        passed &= (0..N).all(|i| {
            bin_is(
                restored_real[i],
                restored_imag[i],
                source_real[i],
                source_imag[i],
                epsilon,
            )
        });
    }

    if passed {
        tracing::info!(case = case.name(), size = N, position, "OK");
    } else {
        tracing::warn!(case = case.name(), size = N, position, "FAIL");
    }

    passed
}

fn dump(stage: &'static str, real: &[f32], imag: &[f32]) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }

    for (bin, (re, im)) in real.iter().zip(imag.iter()).enumerate() {
        tracing::trace!(stage, bin, re, im, power = re * re + im * im);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_all_passes() {
        let report = verify_all();

        for outcome in report.outcomes() {
            assert!(
                outcome.passed,
                "{} [{}, {}] failed",
                outcome.case, outcome.size, outcome.position
            );
        }
        assert!(report.passed());
        assert_eq!(report.outcomes().len(), 7);
    }

    #[test]
    fn test_zero_forward_runs_fail() {
        assert!(!check_zeros::<16>(0, 1));
        assert!(!check_impulse::<16>(0, 0, 1));
        assert!(!check_harmonics::<16>(0, 1));
        assert!(!throughput_256(0));
    }

    #[test]
    fn test_impulse_position_out_of_range_fails() {
        assert!(!check_impulse::<16>(16, 1, 1));
        assert!(!check_impulse::<16>(100, 1, 1));
    }

    #[test]
    fn test_impulse_every_position() {
        for position in 0..32 {
            assert!(check_impulse::<32>(position, 1, 1), "position {position}");
        }
    }

    #[test]
    fn test_repeated_forward_runs() {
        assert!(throughput_256(3));
        assert!(check_harmonics::<64>(2, 2));
    }

    #[test]
    fn test_checks_need_a_valid_length() {
        // Length 2 is below the supported minimum, so the transform itself refuses.
        assert!(!check_zeros::<2>(1, 1));
        assert!(!check_zeros::<12>(1, 1));
    }

    /// Runs `check` on a thread with room for the stack buffers of long transforms.
    fn on_large_stack(check: fn() -> bool) -> bool {
        std::thread::Builder::new()
            .stack_size(16 << 20)
            .spawn(check)
            .unwrap()
            .join()
            .unwrap()
    }

    #[test]
    fn test_tolerance_switches_at_256() {
        assert_eq!(tolerance(256), 1e-3);
        assert_eq!(tolerance(512), 5e-2);
    }

    #[test]
    fn test_spectral_tolerance_scales_with_peak() {
        assert_eq!(spectral_tolerance(256, 128.0), 1e-3);
        assert_eq!(spectral_tolerance(4096, 0.0), 5e-2);
        assert_eq!(spectral_tolerance(4096, 1.0), 5e-2);
        assert_eq!(
            spectral_tolerance(16384, 8192.0),
            PEAK_RELATIVE_ERROR * 8192.0
        );
        assert!(spectral_tolerance(8192, 4096.0) > spectral_tolerance(4096, 2048.0));
    }

    #[test]
    fn test_harmonics_long_transforms() {
        assert!(on_large_stack(|| check_harmonics::<1024>(1, 1)));
        assert!(on_large_stack(|| check_harmonics::<4096>(1, 1)));
        assert!(on_large_stack(|| check_harmonics::<8192>(1, 1)));
        assert!(on_large_stack(|| check_harmonics::<16384>(1, 1)));
        assert!(on_large_stack(|| throughput_4096(2)));
    }

    #[test]
    fn test_impulse_and_zeros_long_transforms() {
        assert!(on_large_stack(|| check_zeros::<16384>(1, 1)));
        assert!(on_large_stack(|| check_impulse::<16384>(0, 1, 1)));
        assert!(on_large_stack(|| check_impulse::<16384>(7, 1, 1)));
        assert!(on_large_stack(|| check_impulse::<8192>(8191, 1, 1)));
    }
}
