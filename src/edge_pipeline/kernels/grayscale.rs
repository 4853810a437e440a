//! BT.709 luma in 16.16 fixed point.

const FRACTION_BITS: u32 = 16;
const ROUNDING: u32 = 1 << (FRACTION_BITS - 1);

/// Red, green and blue weights scaled by 2^16 (0.2126, 0.7152, 0.0722).
///
/// They sum to exactly 65536, so white stays 255 after rounding.
pub const LUMA_WEIGHTS: [u32; 3] = [13933, 46871, 4732];

/// Reduces one RGB pixel to a rounded, saturated luminance byte.
#[inline]
pub fn luma(red: u8, green: u8, blue: u8) -> u8 {
    let weighted = LUMA_WEIGHTS[0] * red as u32
        + LUMA_WEIGHTS[1] * green as u32
        + LUMA_WEIGHTS[2] * blue as u32;
    ((weighted + ROUNDING) >> FRACTION_BITS).min(u8::MAX as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_unity() {
        assert_eq!(LUMA_WEIGHTS.iter().sum::<u32>(), 1 << FRACTION_BITS);
    }

    #[test]
    fn extremes_saturate() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
    }

    #[test]
    fn primaries_match_bt709() {
        assert_eq!(luma(255, 0, 0), 54);
        assert_eq!(luma(0, 255, 0), 182);
        assert_eq!(luma(0, 0, 255), 18);
    }

    #[test]
    fn neutral_grays_are_preserved() {
        for v in 0..=255u8 {
            assert_eq!(luma(v, v, v), v);
        }
    }

    #[test]
    fn every_triple_stays_in_range_and_tracks_float_formula() {
        for r in (0..=255u32).step_by(5) {
            for g in (0..=255u32).step_by(5) {
                for b in (0..=255u32).step_by(5) {
                    let fixed = luma(r as u8, g as u8, b as u8) as f64;
                    let float = (0.2126 * r as f64 + 0.7152 * g as f64 + 0.0722 * b as f64)
                        .round()
                        .min(255.0);
                    assert!((fixed - float).abs() <= 1.0, "({r},{g},{b})");
                }
            }
        }
    }

    #[test]
    fn swapped_red_and_blue_bias_the_result() {
        // Feeding a BGR pixel as RGB is visibly wrong for saturated colors.
        assert_ne!(luma(255, 0, 0), luma(0, 0, 255));
    }
}
