//! Single-threaded reference path and the processor seam shared with the
//! tiled scheduler.

use tracing::trace;

use crate::edge_pipeline::common::error::{EdgeError, Result};
use crate::edge_pipeline::frame::{ColorFrame, EdgeFrame, LuminanceFrame};
use crate::edge_pipeline::kernels::{self, sobel_pixel};

/// Turns one color frame into an edge map, reusing caller-owned buffers.
pub trait FrameProcessor: Send {
    fn process(
        &mut self,
        color: &ColorFrame,
        luma: &mut LuminanceFrame,
        edges: &mut EdgeFrame,
    ) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// Checks that the output buffers were sized for `color`.
pub(crate) fn check_buffers(
    color: &ColorFrame,
    luma: &LuminanceFrame,
    edges: &EdgeFrame,
) -> Result<()> {
    let geometry = color.geometry();
    if !geometry.has_interior() {
        return Err(EdgeError::InvalidDimensions(geometry.width, geometry.height));
    }
    if luma.geometry() != geometry {
        return Err(EdgeError::GeometryMismatch {
            expected: luma.geometry(),
            actual: geometry,
        });
    }
    if edges.geometry() != geometry.edge_geometry() {
        return Err(EdgeError::GeometryMismatch {
            expected: edges.geometry(),
            actual: geometry.edge_geometry(),
        });
    }
    Ok(())
}

/// Raster-order grayscale then Sobel on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameConvolver;

impl FrameConvolver {
    pub fn new() -> Self {
        Self
    }

    /// Fills `luma` from `color`. Both must share one geometry.
    pub fn grayscale(color: &ColorFrame, luma: &mut LuminanceFrame) {
        for (rgb, out) in color
            .as_slice()
            .chunks_exact(3)
            .zip(luma.as_mut_slice().iter_mut())
        {
            *out = kernels::luma(rgb[0], rgb[1], rgb[2]);
        }
    }

    /// Fills `edges` from the interior of `luma`.
    pub fn sobel(luma: &LuminanceFrame, edges: &mut EdgeFrame) {
        let stride = luma.width();
        let out_width = edges.width();
        if out_width == 0 {
            return;
        }
        let samples = luma.as_slice();

        for (y, row) in edges.as_mut_slice().chunks_exact_mut(out_width).enumerate() {
            for (x, out) in row.iter_mut().enumerate() {
                *out = sobel_pixel(samples, stride, x, y);
            }
        }
    }
}

impl FrameProcessor for FrameConvolver {
    fn process(
        &mut self,
        color: &ColorFrame,
        luma: &mut LuminanceFrame,
        edges: &mut EdgeFrame,
    ) -> Result<()> {
        check_buffers(color, luma, edges)?;
        trace!(geometry = %color.geometry(), "sequential frame");

        Self::grayscale(color, luma);
        Self::sobel(luma, edges);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sequential"
    }
}
