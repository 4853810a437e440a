use crate::edge_pipeline::common::error::{EdgeError, Result};
use crate::edge_pipeline::frame::FrameGeometry;

/// Byte order of the three color channels in an interleaved source buffer.
///
/// Decoders disagree on this (many video stacks hand out blue-green-red), so
/// every source states its order explicitly when it builds a `ColorFrame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// A color frame with interleaved 8-bit channels, always stored as R, G, B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorFrame {
    geometry: FrameGeometry,
    data: Vec<u8>,
}

impl ColorFrame {
    pub fn from_rgb(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::from_interleaved(ChannelOrder::Rgb, width, height, data)
    }

    pub fn from_bgr(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::from_interleaved(ChannelOrder::Bgr, width, height, data)
    }

    /// Builds a frame from a three-channel buffer, normalizing it to RGB.
    pub fn from_interleaved(
        order: ChannelOrder,
        width: usize,
        height: usize,
        mut data: Vec<u8>,
    ) -> Result<Self> {
        let geometry = FrameGeometry::new(width, height);
        check_len(geometry.pixel_count() * 3, data.len())?;

        if order == ChannelOrder::Bgr {
            for pixel in data.chunks_exact_mut(3) {
                pixel.swap(0, 2);
            }
        }

        Ok(Self { geometry, data })
    }

    /// Builds a frame from an RGBA buffer, dropping alpha.
    pub fn from_rgba(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        let geometry = FrameGeometry::new(width, height);
        check_len(geometry.pixel_count() * 4, data.len())?;

        let data = data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        Ok(Self { geometry, data })
    }

    /// Builds a frame from a single-channel buffer by replicating it.
    pub fn from_gray(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        let geometry = FrameGeometry::new(width, height);
        check_len(geometry.pixel_count(), data.len())?;

        let data = data.iter().flat_map(|&v| [v, v, v]).collect();
        Ok(Self { geometry, data })
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

    /// Red, green and blue samples at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * self.geometry.width + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.geometry.width * 3;
        &self.data[y * stride..(y + 1) * stride]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(EdgeError::InvalidBufferLength { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgr_buffers_are_swizzled_to_rgb() {
        let frame = ColorFrame::from_bgr(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(frame.pixel(0, 0), [3, 2, 1]);
        assert_eq!(frame.pixel(1, 0), [6, 5, 4]);
    }

    #[test]
    fn rgba_drops_alpha() {
        let frame = ColorFrame::from_rgba(1, 2, &[10, 20, 30, 255, 40, 50, 60, 0]).unwrap();
        assert_eq!(frame.as_slice(), &[10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn gray_is_replicated() {
        let frame = ColorFrame::from_gray(2, 1, &[7, 9]).unwrap();
        assert_eq!(frame.pixel(1, 0), [9, 9, 9]);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let err = ColorFrame::from_rgb(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            EdgeError::InvalidBufferLength { expected: 12, actual: 11 }
        ));
    }
}
