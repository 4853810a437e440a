use crate::edge_pipeline::common::error::Result;
use crate::edge_pipeline::frame::EdgeFrame;

/// Answer from a sink after it has taken a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkControl {
    Continue,
    Stop,
}

pub trait FrameSink {
    fn present(&mut self, frame: &EdgeFrame) -> Result<SinkControl>;

    /// Releases output handles once the stream is over.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<K: FrameSink + ?Sized> FrameSink for Box<K> {
    fn present(&mut self, frame: &EdgeFrame) -> Result<SinkControl> {
        (**self).present(frame)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}
