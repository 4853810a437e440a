//! Stream configuration types

use crate::edge_pipeline::common::error::{EdgeError, Result};
use crate::edge_pipeline::convolve::{FrameConvolver, FrameProcessor};
use crate::edge_pipeline::tiled::TiledScheduler;

/// How each frame is turned into an edge map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingMode {
    /// Raster order on the stream thread
    Sequential,
    /// Column tiles across `workers` threads with a barrier between stages
    Tiled,
}

/// What to do with a frame whose size differs from the stream's buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryPolicy {
    /// Fail the stream with `GeometryMismatch`
    Abort,
    /// Log, count the frame as skipped, and keep going
    Skip,
}

/// Configuration for an edge stream
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Worker count for tiled processing
    pub workers: usize,
    pub mode: ProcessingMode,
    pub geometry_policy: GeometryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            mode: ProcessingMode::Tiled,
            geometry_policy: GeometryPolicy::Abort,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(EdgeError::Configuration(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn processor(&self) -> Result<Box<dyn FrameProcessor>> {
        self.validate()?;
        Ok(match self.mode {
            ProcessingMode::Sequential => Box::new(FrameConvolver::new()),
            ProcessingMode::Tiled => Box::new(TiledScheduler::new(self.workers)?),
        })
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    workers: Option<usize>,
    mode: Option<ProcessingMode>,
    geometry_policy: Option<GeometryPolicy>,
}

impl PipelineConfigBuilder {
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn mode(mut self, mode: ProcessingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn geometry_policy(mut self, policy: GeometryPolicy) -> Self {
        self.geometry_policy = Some(policy);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            workers: self.workers.unwrap_or(default.workers),
            mode: self.mode.unwrap_or(default.mode),
            geometry_policy: self.geometry_policy.unwrap_or(default.geometry_policy),
        }
    }
}
