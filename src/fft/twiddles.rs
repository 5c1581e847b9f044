use crate::{Direction, fft::Complex32};

/// Number of stage depths covered by the table, one per supported `log2(len)`.
pub(crate) const STAGE_DEPTHS: usize = 14;

/// Primitive rotation per stage depth `k`: `cos(PI / 2^k) - i * sin(PI / 2^k)`.
///
/// A stage splitting groups of `2^(k+1)` samples advances its twiddle by this
/// value once per butterfly column.
static STAGE_ROTATIONS: [Complex32; STAGE_DEPTHS] = [
    Complex32::new(-1.0000000000000000, 0.0000000000000000),
    Complex32::new(0.0000000000000000, -1.0000000000000000),
    Complex32::new(0.7071067811865475, -0.7071067811865474),
    Complex32::new(0.9238795325112867, -0.3826834323650897),
    Complex32::new(0.9807852804032304, -0.1950903220161282),
    Complex32::new(0.9951847266721969, -0.0980171403295606),
    Complex32::new(0.9987954562051724, -0.0490676743274180),
    Complex32::new(0.9996988186962042, -0.0245412285229122),
    Complex32::new(0.9999247018391445, -0.0122715382857199),
    Complex32::new(0.9999811752826011, -0.0061358846491544),
    Complex32::new(0.9999952938095761, -0.0030679567629659),
    Complex32::new(0.9999988234517018, -0.0015339801862847),
    Complex32::new(0.9999997058628822, -0.0007669903187427),
    Complex32::new(0.9999999264657178, -0.0003834951875714),
];

/// Returns the rotation base for the given stage depth.
///
/// The inverse transform rotates the other way, so the conjugate is returned.
#[inline(always)]
pub(crate) fn stage_rotation(depth: usize, direction: Direction) -> Complex32 {
    let rotation = STAGE_ROTATIONS[depth];
    match direction {
        Direction::Forward => rotation,
        Direction::Inverse => rotation.conj(),
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::PI;

    use super::*;

    #[test]
    fn test_boundary_depths_are_exact() {
        let half_turn = stage_rotation(0, Direction::Forward);
        assert_eq!(half_turn.re, -1.0);
        assert_eq!(half_turn.im, 0.0);

        let quarter_turn = stage_rotation(1, Direction::Forward);
        assert_eq!(quarter_turn.re, 0.0);
        assert_eq!(quarter_turn.im, -1.0);
    }

    #[test]
    fn test_rotations_match_trigonometry() {
        for depth in 0..STAGE_DEPTHS {
            let angle = PI / (1u32 << depth) as f64;
            let rotation = stage_rotation(depth, Direction::Forward);

            assert!(
                (rotation.re - libm::cos(angle) as f32).abs() < 1e-7,
                "Depth {depth}: re {} expected {}",
                rotation.re,
                libm::cos(angle)
            );
            assert!(
                (rotation.im + libm::sin(angle) as f32).abs() < 1e-7,
                "Depth {depth}: im {} expected {}",
                rotation.im,
                -libm::sin(angle)
            );
        }
    }

    #[test]
    fn test_inverse_rotation_is_conjugate() {
        for depth in 0..STAGE_DEPTHS {
            let forward = stage_rotation(depth, Direction::Forward);
            let inverse = stage_rotation(depth, Direction::Inverse);
            assert_eq!(forward.re, inverse.re);
            assert_eq!(forward.im, -inverse.im);
        }
    }

    #[test]
    fn test_rotations_have_unit_magnitude() {
        for depth in 0..STAGE_DEPTHS {
            let rotation = stage_rotation(depth, Direction::Forward);
            let magnitude = rotation.re * rotation.re + rotation.im * rotation.im;
            assert!(
                (magnitude - 1.0).abs() < 1e-6,
                "Depth {depth}: magnitude {magnitude}"
            );
        }
    }
}
