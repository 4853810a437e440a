//! Per-pixel numeric kernels
//!
//! Both kernels are total: every input byte combination yields an in-range
//! output byte, so nothing in here can fail.

mod grayscale;
mod sobel;

pub use grayscale::{LUMA_WEIGHTS, luma};
pub use sobel::{Kernel3, SOBEL_X, SOBEL_Y, sobel_at, sobel_pixel};
