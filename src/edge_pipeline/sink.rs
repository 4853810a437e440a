//! Frame sink module
//!
//! Edge maps leave the pipeline through a `FrameSink`. The bundled sink
//! stores them as pages of a grayscale TIFF.

mod limit;
mod tiff_sink;
pub mod types;
mod writer;

pub use limit::FrameLimit;
pub use tiff_sink::TiffSink;
pub use types::{SinkConfig, SinkConfigBuilder, TiffCompression};
pub use writer::{FrameSink, SinkControl};
