use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tiff::decoder::Decoder;
use tracing::debug;

use crate::edge_pipeline::common::error::{EdgeError, Result};
use crate::edge_pipeline::frame::{ColorFrame, FrameGeometry};
use crate::edge_pipeline::source::page;
use crate::edge_pipeline::source::reader::FrameSource;

/// Multi-page TIFF read as a frame stream, one page per frame.
pub struct TiffFileSource {
    path: PathBuf,
    decoder: Option<Decoder<BufReader<File>>>,
    geometry: FrameGeometry,
    pages_read: usize,
}

impl TiffFileSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let open_error = |reason: String| EdgeError::SourceOpen {
            path: path.clone(),
            reason,
        };

        let file = File::open(&path).map_err(|e| open_error(e.to_string()))?;
        let mut decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| open_error(e.to_string()))?;
        let geometry = page::geometry(&mut decoder).map_err(|e| open_error(e.to_string()))?;

        Ok(Self {
            path,
            decoder: Some(decoder),
            geometry,
            pages_read: 0,
        })
    }
}

impl FrameSource for TiffFileSource {
    fn geometry(&self) -> Option<FrameGeometry> {
        Some(self.geometry)
    }

    fn next_frame(&mut self) -> Result<Option<ColorFrame>> {
        let Some(decoder) = self.decoder.as_mut() else {
            return Ok(None);
        };

        if self.pages_read > 0 {
            if !decoder.more_images() {
                return Ok(None);
            }
            decoder.next_image().map_err(page::decode_error)?;
        }

        let frame = page::decode(decoder)?;
        self.pages_read += 1;
        debug!(page = self.pages_read, geometry = %frame.geometry(), "Decoded TIFF page");
        Ok(Some(frame))
    }

    fn close(&mut self) -> Result<()> {
        if self.decoder.take().is_some() {
            debug!(source = %self.path.display(), pages = self.pages_read, "TIFF file closed");
        }
        Ok(())
    }
}
