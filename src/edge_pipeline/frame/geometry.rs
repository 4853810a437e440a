use std::fmt;

/// Smallest frame side for which the 3x3 kernel has an interior.
pub const MIN_FRAME_SIDE: usize = 3;

/// Width and height of a frame, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameGeometry {
    pub width: usize,
    pub height: usize,
}

impl FrameGeometry {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// True when the frame has at least one pixel with a full 3x3 neighborhood.
    pub const fn has_interior(&self) -> bool {
        self.width >= MIN_FRAME_SIDE && self.height >= MIN_FRAME_SIDE
    }

    /// Geometry of the edge map produced from a frame of this geometry.
    ///
    /// Saturates at zero for frames without an interior.
    pub const fn edge_geometry(&self) -> FrameGeometry {
        FrameGeometry {
            width: self.width.saturating_sub(2),
            height: self.height.saturating_sub(2),
        }
    }
}

impl fmt::Display for FrameGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
