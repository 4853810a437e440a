//! Frame source module
//!
//! This module defines where color frames come from. Video containers and
//! camera devices live outside this crate; the bundled sources read TIFF
//! stills, either pages of one file or a directory of files.

mod reader;
mod tiff_file;
mod tiff_sequence;

pub use reader::FrameSource;
pub use tiff_file::TiffFileSource;
pub use tiff_sequence::TiffSequenceSource;

use std::path::Path;

use tracing::{debug, info};

use crate::edge_pipeline::common::error::Result;
use crate::edge_pipeline::frame::{ColorFrame, FrameGeometry};

/// A TIFF-backed source picked from the kind of path it is opened with.
pub enum TiffSource {
    File(TiffFileSource),
    Sequence(TiffSequenceSource),
}

impl TiffSource {
    /// Opens a directory as a frame sequence and anything else as a
    /// multi-page TIFF.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = if path.is_dir() {
            let sequence = TiffSequenceSource::open(path)?;
            debug!(frames = sequence.frame_count(), "Frame files found");
            Self::Sequence(sequence)
        } else {
            Self::File(TiffFileSource::open(path)?)
        };
        info!(
            source = %path.display(),
            geometry = ?source.geometry(),
            "Frame source opened"
        );
        Ok(source)
    }
}

impl FrameSource for TiffSource {
    fn geometry(&self) -> Option<FrameGeometry> {
        match self {
            Self::File(s) => s.geometry(),
            Self::Sequence(s) => s.geometry(),
        }
    }

    fn next_frame(&mut self) -> Result<Option<ColorFrame>> {
        match self {
            Self::File(s) => s.next_frame(),
            Self::Sequence(s) => s.next_frame(),
        }
    }

    fn close(&mut self) -> Result<()> {
        match self {
            Self::File(s) => s.close(),
            Self::Sequence(s) => s.close(),
        }
    }
}

pub(crate) mod page {
    use std::io::{Read, Seek};

    use tiff::ColorType;
    use tiff::decoder::{Decoder, DecodingResult};

    use crate::edge_pipeline::common::error::{EdgeError, Result};
    use crate::edge_pipeline::frame::{ColorFrame, FrameGeometry};

    pub(crate) fn decode_error(e: tiff::TiffError) -> EdgeError {
        EdgeError::Decode(e.to_string())
    }

    pub(crate) fn geometry<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<FrameGeometry> {
        let (width, height) = decoder.dimensions().map_err(decode_error)?;
        Ok(FrameGeometry::new(width as usize, height as usize))
    }

    /// Decodes the decoder's current page into an RGB frame.
    ///
    /// TIFF stores color pages in R, G, B order, so no swizzle is needed.
    pub(crate) fn decode<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<ColorFrame> {
        let FrameGeometry { width, height } = geometry(decoder)?;
        let colortype = decoder.colortype().map_err(decode_error)?;
        if !matches!(
            colortype,
            ColorType::RGB(8) | ColorType::RGBA(8) | ColorType::Gray(8)
        ) {
            return Err(EdgeError::UnsupportedFormat(format!("{colortype:?}")));
        }

        let data = match decoder.read_image().map_err(decode_error)? {
            DecodingResult::U8(data) => data,
            _ => return Err(EdgeError::UnsupportedFormat(format!("{colortype:?}"))),
        };

        match colortype {
            ColorType::RGBA(8) => ColorFrame::from_rgba(width, height, &data),
            ColorType::Gray(8) => ColorFrame::from_gray(width, height, &data),
            _ => ColorFrame::from_rgb(width, height, data),
        }
    }
}
