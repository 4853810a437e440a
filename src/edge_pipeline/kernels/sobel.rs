//! 3x3 Sobel evaluation over a luminance plane.
//!
//! Kernels are indexed `kernel[i][j]` with `i` the column offset and `j` the
//! row offset inside the window. The combined magnitude is the L1 norm
//! `|Gx| + |Gy|`, saturated to a byte.

use crate::edge_pipeline::frame::LuminanceFrame;

pub type Kernel3 = [[i32; 3]; 3];

pub const SOBEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
pub const SOBEL_Y: Kernel3 = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// Edge magnitude at edge-map coordinate `(x, y)`.
///
/// `luma` is a row-major plane `stride` samples wide. The window centered on
/// luminance pixel `(x + 1, y + 1)` must lie inside the plane; callers only
/// iterate `[0, width - 2) x [0, height - 2)`.
#[inline]
pub fn sobel_pixel(luma: &[u8], stride: usize, x: usize, y: usize) -> u8 {
    let mut gx: i32 = 0;
    let mut gy: i32 = 0;

    for j in 0..3 {
        let row = &luma[(y + j) * stride + x..][..3];
        for i in 0..3 {
            let sample = row[i] as i32;
            gx += sample * SOBEL_X[i][j];
            gy += sample * SOBEL_Y[i][j];
        }
    }

    (gx.abs() + gy.abs()).min(u8::MAX as i32) as u8
}

/// Convenience wrapper over [`sobel_pixel`] for a whole luminance frame.
#[inline]
pub fn sobel_at(luma: &LuminanceFrame, x: usize, y: usize) -> u8 {
    sobel_pixel(luma.as_slice(), luma.width(), x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge_pipeline::frame::FrameGeometry;

    fn plane(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> LuminanceFrame {
        let samples = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        LuminanceFrame::from_vec(FrameGeometry::new(width, height), samples).unwrap()
    }

    #[test]
    fn flat_field_has_no_edges() {
        for c in [0u8, 1, 77, 128, 254, 255] {
            let luma = plane(5, 4, |_, _| c);
            for y in 0..2 {
                for x in 0..3 {
                    assert_eq!(sobel_at(&luma, x, y), 0, "c={c}");
                }
            }
        }
    }

    #[test]
    fn vertical_step_saturates_on_both_sides_of_the_boundary() {
        // Columns 0..3 are black, 3..6 are white.
        let luma = plane(6, 3, |x, _| if x < 3 { 0 } else { 255 });
        let row: Vec<u8> = (0..4).map(|x| sobel_at(&luma, x, 0)).collect();
        assert_eq!(row, vec![0, 255, 255, 0]);
    }

    #[test]
    fn small_step_is_not_clipped() {
        // One gradient is 4 * 10 = 40, the other cancels.
        let luma = plane(4, 3, |x, _| if x < 2 { 0 } else { 10 });
        assert_eq!(sobel_at(&luma, 0, 0), 40);
        assert_eq!(sobel_at(&luma, 1, 0), 40);
    }

    #[test]
    fn horizontal_step_uses_the_other_kernel() {
        let luma = plane(3, 4, |_, y| if y < 2 { 0 } else { 20 });
        assert_eq!(sobel_at(&luma, 0, 0), 80);
        assert_eq!(sobel_at(&luma, 0, 1), 80);
    }

    #[test]
    fn diagonal_corner_adds_both_gradients() {
        // Single bright sample at the bottom-right of the window.
        let luma = plane(3, 3, |x, y| if x == 2 && y == 2 { 30 } else { 0 });
        assert_eq!(sobel_at(&luma, 0, 0), 60);
    }

    #[test]
    fn kernels_are_zero_sum() {
        let sum = |k: &Kernel3| k.iter().flatten().sum::<i32>();
        assert_eq!(sum(&SOBEL_X), 0);
        assert_eq!(sum(&SOBEL_Y), 0);
    }
}
