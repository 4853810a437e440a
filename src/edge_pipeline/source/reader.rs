use crate::edge_pipeline::common::error::Result;
use crate::edge_pipeline::frame::{ColorFrame, FrameGeometry};

pub trait FrameSource {
    /// Geometry of every frame in the stream, when known before the first
    /// frame is pulled.
    fn geometry(&self) -> Option<FrameGeometry> {
        None
    }

    /// Next frame, or `None` at end of stream.
    fn next_frame(&mut self) -> Result<Option<ColorFrame>>;

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn geometry(&self) -> Option<FrameGeometry> {
        (**self).geometry()
    }

    fn next_frame(&mut self) -> Result<Option<ColorFrame>> {
        (**self).next_frame()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
