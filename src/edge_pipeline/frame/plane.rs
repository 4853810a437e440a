use crate::edge_pipeline::common::error::{EdgeError, Result};
use crate::edge_pipeline::frame::FrameGeometry;

/// Single-channel luminance plane, same size as the color frame it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuminanceFrame {
    geometry: FrameGeometry,
    samples: Vec<u8>,
}

/// Edge-magnitude plane, two columns and two rows smaller than its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeFrame {
    geometry: FrameGeometry,
    samples: Vec<u8>,
}

impl LuminanceFrame {
    pub fn new(geometry: FrameGeometry) -> Self {
        Self {
            geometry,
            samples: vec![0; geometry.pixel_count()],
        }
    }

    pub fn from_vec(geometry: FrameGeometry, samples: Vec<u8>) -> Result<Self> {
        check_len(geometry, &samples)?;
        Ok(Self { geometry, samples })
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    pub fn width(&self) -> usize {
        self.geometry.width
    }

    pub fn height(&self) -> usize {
        self.geometry.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.samples[y * self.geometry.width + x]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let w = self.geometry.width;
        &self.samples[y * w..(y + 1) * w]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.samples
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.samples
    }
}

impl EdgeFrame {
    pub fn new(geometry: FrameGeometry) -> Self {
        Self {
            geometry,
            samples: vec![0; geometry.pixel_count()],
        }
    }

    /// Allocates the edge map for frames of `source` geometry.
    pub fn for_source(source: FrameGeometry) -> Self {
        Self::new(source.edge_geometry())
    }

    pub fn from_vec(geometry: FrameGeometry, samples: Vec<u8>) -> Result<Self> {
        check_len(geometry, &samples)?;
        Ok(Self { geometry, samples })
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    pub fn width(&self) -> usize {
        self.geometry.width
    }

    pub fn height(&self) -> usize {
        self.geometry.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.samples[y * self.geometry.width + x]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let w = self.geometry.width;
        &self.samples[y * w..(y + 1) * w]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.samples
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.samples
    }
}

fn check_len(geometry: FrameGeometry, samples: &[u8]) -> Result<()> {
    if samples.len() != geometry.pixel_count() {
        return Err(EdgeError::InvalidBufferLength {
            expected: geometry.pixel_count(),
            actual: samples.len(),
        });
    }
    Ok(())
}
