use tracing::{debug, info, instrument, warn};

use crate::edge_pipeline::common::error::{EdgeError, Result};
use crate::edge_pipeline::convolve::FrameProcessor;
use crate::edge_pipeline::frame::{ColorFrame, EdgeFrame, FrameGeometry, LuminanceFrame};
use crate::edge_pipeline::sink::{FrameSink, SinkControl};
use crate::edge_pipeline::source::FrameSource;
use crate::edge_pipeline::stream::config::{GeometryPolicy, PipelineConfig};
use crate::edge_pipeline::stream::timing::{StageTimings, Timer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    SinkRequestedStop,
}

#[derive(Debug, Clone)]
pub struct StreamSummary {
    /// Source geometry the buffers were sized for, if any frame arrived
    pub geometry: Option<FrameGeometry>,
    pub frames_processed: usize,
    pub frames_skipped: usize,
    pub stop_reason: StopReason,
    pub timings: StageTimings,
}

pub struct EdgeStream<S: FrameSource, K: FrameSink> {
    source: S,
    sink: K,
    config: PipelineConfig,
    processor: Box<dyn FrameProcessor>,
}

impl<S: FrameSource, K: FrameSink> EdgeStream<S, K> {
    pub fn new(source: S, sink: K, config: PipelineConfig) -> Result<Self> {
        let processor = config.processor()?;
        Ok(Self {
            source,
            sink,
            config,
            processor,
        })
    }

    /// Processes frames until the source ends or the sink asks to stop.
    ///
    /// The source is closed and the sink finished whether or not the stream
    /// failed; the first error wins.
    #[instrument(skip(self), fields(processor = self.processor.name(), workers = self.config.workers))]
    pub fn run(&mut self) -> Result<StreamSummary> {
        let outcome = self.pump();
        let closed = self.source.close();
        let finished = self.sink.finish();

        let summary = outcome?;
        closed?;
        finished?;

        info!(
            frames = summary.frames_processed,
            skipped = summary.frames_skipped,
            reason = ?summary.stop_reason,
            "Stream complete"
        );
        summary.timings.log_summary();
        Ok(summary)
    }

    fn pump(&mut self) -> Result<StreamSummary> {
        let mut timings = StageTimings::new();
        let mut pending: Option<ColorFrame> = None;

        let geometry = match self.source.geometry() {
            Some(geometry) => geometry,
            None => {
                let timer = Timer::start("decode");
                let first = self.source.next_frame()?;
                timings.record(timer);
                match first {
                    Some(frame) => pending.insert(frame).geometry(),
                    None => {
                        info!("Source was empty");
                        return Ok(StreamSummary {
                            geometry: None,
                            frames_processed: 0,
                            frames_skipped: 0,
                            stop_reason: StopReason::EndOfStream,
                            timings,
                        });
                    }
                }
            }
        };

        if !geometry.has_interior() {
            return Err(EdgeError::InvalidDimensions(geometry.width, geometry.height));
        }

        let mut luma = LuminanceFrame::new(geometry);
        let mut edges = EdgeFrame::for_source(geometry);
        info!(
            %geometry,
            edge_geometry = %geometry.edge_geometry(),
            "Stream buffers allocated"
        );

        let mut frames_processed = 0;
        let mut frames_skipped = 0;

        let stop_reason = loop {
            let frame = match pending.take() {
                Some(frame) => frame,
                None => {
                    let timer = Timer::start("decode");
                    let next = self.source.next_frame()?;
                    timings.record(timer);
                    match next {
                        Some(frame) => frame,
                        None => break StopReason::EndOfStream,
                    }
                }
            };

            if frame.geometry() != geometry {
                let mismatch = EdgeError::GeometryMismatch {
                    expected: geometry,
                    actual: frame.geometry(),
                };
                match self.config.geometry_policy {
                    GeometryPolicy::Abort => return Err(mismatch),
                    GeometryPolicy::Skip => {
                        warn!(index = frames_processed + frames_skipped, "Skipping frame: {}", mismatch);
                        frames_skipped += 1;
                        continue;
                    }
                }
            }

            let timer = Timer::start("edges");
            self.processor.process(&frame, &mut luma, &mut edges)?;
            timings.record(timer);
            frames_processed += 1;

            let timer = Timer::start("present");
            let control = self.sink.present(&edges)?;
            timings.record(timer);
            debug!(frame = frames_processed, ?control, "Frame presented");

            if control == SinkControl::Stop {
                break StopReason::SinkRequestedStop;
            }
        };

        Ok(StreamSummary {
            geometry: Some(geometry),
            frames_processed,
            frames_skipped,
            stop_reason,
            timings,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }
}
