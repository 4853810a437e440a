//! Stream orchestration
//!
//! Pulls color frames from a source, turns each into an edge map with the
//! configured processor, and hands the result to a sink. Frames are handled
//! strictly one at a time.

mod config;
mod driver;
mod timing;


pub use config::{GeometryPolicy, PipelineConfig, PipelineConfigBuilder, ProcessingMode};
pub use driver::{EdgeStream, StopReason, StreamSummary};
pub use timing::{StageTiming, StageTimings, Timer};
