use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tiff::decoder::Decoder;
use tracing::debug;

use crate::edge_pipeline::common::error::{EdgeError, Result};
use crate::edge_pipeline::frame::{ColorFrame, FrameGeometry};
use crate::edge_pipeline::source::page;
use crate::edge_pipeline::source::reader::FrameSource;

/// Directory of TIFF stills played back in file-name order.
pub struct TiffSequenceSource {
    frames: Vec<PathBuf>,
    next: usize,
    geometry: FrameGeometry,
}

impl TiffSequenceSource {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let open_error = |reason: String| EdgeError::SourceOpen {
            path: dir.to_path_buf(),
            reason,
        };

        let entries = std::fs::read_dir(dir).map_err(|e| open_error(e.to_string()))?;
        let frames = index_frames(entries.map(|entry| entry.map(|e| e.path())))
            .map_err(|e| open_error(e.to_string()))?;

        let first = frames
            .first()
            .ok_or_else(|| open_error("no .tif or .tiff files".to_string()))?;
        let geometry = open_decoder(first)
            .and_then(|mut d| page::geometry(&mut d))
            .map_err(|e| open_error(e.to_string()))?;

        debug!(frames = frames.len(), "Indexed TIFF sequence");
        Ok(Self {
            frames,
            next: 0,
            geometry,
        })
    }

    /// Number of frame files indexed when the directory was opened.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Keeps the TIFF files among `entries`, in name order. An unreadable entry
/// fails the whole index rather than shortening the sequence.
fn index_frames<I>(entries: I) -> std::io::Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = std::io::Result<PathBuf>>,
{
    let mut frames = Vec::new();
    for path in entries {
        let path = path?;
        if path.is_file() && is_tiff(&path) {
            frames.push(path);
        }
    }
    frames.sort();
    Ok(frames)
}

impl FrameSource for TiffSequenceSource {
    fn geometry(&self) -> Option<FrameGeometry> {
        Some(self.geometry)
    }

    fn next_frame(&mut self) -> Result<Option<ColorFrame>> {
        let Some(path) = self.frames.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;

        debug!(frame = %path.display(), "Decoding frame file");
        let mut decoder = open_decoder(path)?;
        page::decode(&mut decoder).map(Some)
    }

    fn close(&mut self) -> Result<()> {
        self.next = self.frames.len();
        Ok(())
    }
}

fn is_tiff(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff"))
}

fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path)
        .map_err(|e| EdgeError::Decode(format!("{}: {}", path.display(), e)))?;
    Decoder::new(BufReader::new(file)).map_err(page::decode_error)
}
