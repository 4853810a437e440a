use std::marker::PhantomData;
use std::ops::Range;

use crate::edge_pipeline::frame::ColorFrame;
use crate::edge_pipeline::kernels::{luma, sobel_pixel};

/// Row-major byte plane written by several workers at once.
///
/// Workers only touch their own column range of each row and the barrier
/// separates the writing phase from the reading phase. Neither rule is
/// checked here; `TiledScheduler` upholds both.
#[derive(Clone, Copy)]
pub(super) struct SharedPlane<'a> {
    ptr: *mut u8,
    width: usize,
    height: usize,
    _borrow: PhantomData<&'a mut [u8]>,
}

// SAFETY: the plane is only reached through `WorkShare`, whose column ranges
// are disjoint, and reads of a plane happen after the barrier that ends its
// writes.
unsafe impl Send for SharedPlane<'_> {}
unsafe impl Sync for SharedPlane<'_> {}

impl<'a> SharedPlane<'a> {
    pub(super) fn new(samples: &'a mut [u8], width: usize, height: usize) -> Self {
        assert_eq!(samples.len(), width * height);
        Self {
            ptr: samples.as_mut_ptr(),
            width,
            height,
            _borrow: PhantomData,
        }
    }

    /// Columns `cols` of row `y`.
    ///
    /// # Safety
    ///
    /// `y < height`, `cols` within `[0, width)`, and no other reference to
    /// those samples may exist while the slice is alive.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    unsafe fn columns_mut(&self, y: usize, cols: Range<usize>) -> &mut [u8] {
        debug_assert!(y < self.height && cols.end <= self.width);
        unsafe {
            std::slice::from_raw_parts_mut(self.ptr.add(y * self.width + cols.start), cols.len())
        }
    }

    /// The whole plane, read-only.
    ///
    /// # Safety
    ///
    /// Nothing may write to the plane while the slice is alive.
    #[inline]
    unsafe fn as_slice(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.ptr, self.width * self.height) }
    }
}

/// One worker's slice of a frame: the columns it owns in the luminance plane
/// and in the edge map, plus views of the shared buffers.
pub struct WorkShare<'a> {
    worker: usize,
    luma_columns: Range<usize>,
    edge_columns: Range<usize>,
    color: &'a ColorFrame,
    luma: SharedPlane<'a>,
    edges: SharedPlane<'a>,
}

impl<'a> WorkShare<'a> {
    pub(super) fn new(
        worker: usize,
        luma_columns: Range<usize>,
        edge_columns: Range<usize>,
        color: &'a ColorFrame,
        luma: SharedPlane<'a>,
        edges: SharedPlane<'a>,
    ) -> Self {
        Self {
            worker,
            luma_columns,
            edge_columns,
            color,
            luma,
            edges,
        }
    }

    pub fn worker(&self) -> usize {
        self.worker
    }

    pub fn luma_columns(&self) -> Range<usize> {
        self.luma_columns.clone()
    }

    pub fn edge_columns(&self) -> Range<usize> {
        self.edge_columns.clone()
    }

    /// Phase 1: luminance for this share's columns over every row.
    pub(super) fn grayscale(&self) {
        let cols = self.luma_columns();
        for y in 0..self.luma.height {
            let rgb = &self.color.row(y)[cols.start * 3..cols.end * 3];
            // SAFETY: luminance columns are disjoint across shares and nobody
            // reads the plane before the barrier.
            let out = unsafe { self.luma.columns_mut(y, cols.clone()) };
            for (px, out) in rgb.chunks_exact(3).zip(out.iter_mut()) {
                *out = luma(px[0], px[1], px[2]);
            }
        }
    }

    /// Phase 2: Sobel for this share's edge-map columns over every row.
    ///
    /// Only valid once every share in the frame has finished `grayscale`.
    pub(super) fn sobel(&self) {
        let cols = self.edge_columns();
        let stride = self.luma.width;
        // SAFETY: all luminance writes finished before the barrier.
        let luma = unsafe { self.luma.as_slice() };
        for y in 0..self.edges.height {
            // SAFETY: edge columns are disjoint across shares.
            let out = unsafe { self.edges.columns_mut(y, cols.clone()) };
            for (x, out) in cols.clone().zip(out.iter_mut()) {
                *out = sobel_pixel(luma, stride, x, y);
            }
        }
    }
}
