use std::fs::File;
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tiff::encoder::{TiffEncoder, colortype};
use tracing::debug;

use crate::edge_pipeline::common::error::{EdgeError, Result};
use crate::edge_pipeline::frame::EdgeFrame;
use crate::edge_pipeline::sink::types::SinkConfig;
use crate::edge_pipeline::sink::writer::{FrameSink, SinkControl};

/// Writes every presented edge map as one Gray8 page of a TIFF file.
pub struct TiffSink<W: Write + Seek = File> {
    target: String,
    output: SharedOutput<W>,
    encoder: Option<TiffEncoder<SharedOutput<W>>>,
    frames_written: usize,
}

impl TiffSink {
    pub fn create<P: AsRef<Path>>(path: P, config: &SinkConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| io_error(&path.display().to_string(), e))?;
        Self::with_writer(file, path.display().to_string(), config)
    }
}

impl<W: Write + Seek> TiffSink<W> {
    /// Encodes into any seekable writer; `target` only names it in logs and
    /// errors.
    pub fn with_writer(writer: W, target: impl Into<String>, config: &SinkConfig) -> Result<Self> {
        let target = target.into();
        let output = SharedOutput::new(writer);
        let encoder = TiffEncoder::new(output.clone())
            .map_err(|e| EdgeError::Encode(e.to_string()))?
            .with_compression(config.compression.to_tiff());

        debug!(output = %target, compression = ?config.compression, "TIFF sink created");
        Ok(Self {
            target,
            output,
            encoder: Some(encoder),
            frames_written: 0,
        })
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }
}

impl<W: Write + Seek> FrameSink for TiffSink<W> {
    fn present(&mut self, frame: &EdgeFrame) -> Result<SinkControl> {
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| EdgeError::Encode("sink already finished".to_string()))?;

        encoder
            .write_image::<colortype::Gray8>(
                frame.width() as u32,
                frame.height() as u32,
                frame.as_slice(),
            )
            .map_err(|e| EdgeError::Encode(e.to_string()))?;

        self.frames_written += 1;
        Ok(SinkControl::Continue)
    }

    fn finish(&mut self) -> Result<()> {
        let Some(encoder) = self.encoder.take() else {
            return Ok(());
        };
        drop(encoder);

        // The last directory's tail is still buffered here.
        self.output.flush().map_err(|e| io_error(&self.target, e))?;
        debug!(
            output = %self.target,
            frames = self.frames_written,
            "TIFF sink closed"
        );
        Ok(())
    }
}

/// Buffered writer shared between the encoder and the sink, so the sink can
/// flush it and see the error.
struct SharedOutput<W: Write>(Arc<Mutex<BufWriter<W>>>);

impl<W: Write> SharedOutput<W> {
    fn new(writer: W) -> Self {
        Self(Arc::new(Mutex::new(BufWriter::new(writer))))
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, BufWriter<W>>> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("TIFF output lock poisoned"))
    }
}

impl<W: Write> Clone for SharedOutput<W> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<W: Write> Write for SharedOutput<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }
}

impl<W: Write + Seek> Seek for SharedOutput<W> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.lock()?.seek(pos)
    }
}

fn io_error(target: &str, e: io::Error) -> EdgeError {
    EdgeError::Io(io::Error::new(e.kind(), format!("{target}: {e}")))
}
