//! Edge detection pipeline module
//!
//! This module turns a stream of color frames into Sobel edge maps, with
//! separate modules for frame types, numeric kernels, the sequential and
//! tiled processors, frame sources and sinks, and stream orchestration.

pub mod common;
pub mod convolve;
pub mod frame;
pub mod kernels;
pub mod sink;
pub mod source;
pub mod stream;
pub mod tiled;

pub use common::{
    EdgeError,
    Result,
    WorkerPhase,
};

pub use frame::{
    ChannelOrder,
    ColorFrame,
    EdgeFrame,
    FrameGeometry,
    LuminanceFrame,
};

pub use convolve::{
    FrameConvolver,
    FrameProcessor,
};

pub use tiled::{
    TiledScheduler,
    WorkShare,
    partition_columns,
};

pub use source::{
    FrameSource,
    TiffFileSource,
    TiffSequenceSource,
    TiffSource,
};

pub use sink::{
    FrameLimit,
    FrameSink,
    SinkConfig,
    SinkConfigBuilder,
    SinkControl,
    TiffCompression,
    TiffSink,
};

pub use stream::{
    EdgeStream,
    GeometryPolicy,
    PipelineConfig,
    PipelineConfigBuilder,
    ProcessingMode,
    StopReason,
    StreamSummary,
};
