use std::num::NonZeroUsize;

use crate::edge_pipeline::common::error::Result;
use crate::edge_pipeline::frame::EdgeFrame;
use crate::edge_pipeline::sink::writer::{FrameSink, SinkControl};

/// Asks the stream to stop once `limit` frames reached the inner sink.
pub struct FrameLimit<K> {
    inner: K,
    limit: NonZeroUsize,
    presented: usize,
}

impl<K: FrameSink> FrameLimit<K> {
    pub fn new(inner: K, limit: NonZeroUsize) -> Self {
        Self {
            inner,
            limit,
            presented: 0,
        }
    }

    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn into_inner(self) -> K {
        self.inner
    }
}

impl<K: FrameSink> FrameSink for FrameLimit<K> {
    fn present(&mut self, frame: &EdgeFrame) -> Result<SinkControl> {
        if self.presented >= self.limit.get() {
            return Ok(SinkControl::Stop);
        }

        let control = self.inner.present(frame)?;
        self.presented += 1;

        if self.presented >= self.limit.get() {
            Ok(SinkControl::Stop)
        } else {
            Ok(control)
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.inner.finish()
    }
}
