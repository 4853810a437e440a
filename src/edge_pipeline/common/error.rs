use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::edge_pipeline::frame::FrameGeometry;

/// Stage of the tiled protocol a worker was executing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    Grayscale,
    Sobel,
}

impl fmt::Display for WorkerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerPhase::Grayscale => f.write_str("grayscale"),
            WorkerPhase::Sobel => f.write_str("sobel"),
        }
    }
}

#[derive(Error, Debug)]
pub enum EdgeError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Failed to open frame source {}: {reason}", .path.display())]
    SourceOpen { path: PathBuf, reason: String },

    #[error("Frame geometry {actual} does not match stream geometry {expected}")]
    GeometryMismatch {
        expected: FrameGeometry,
        actual: FrameGeometry,
    },

    #[error("Worker {worker} failed during {phase} phase: {reason}")]
    WorkerFailure {
        worker: usize,
        phase: WorkerPhase,
        reason: String,
    },

    #[error("Invalid frame dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidBufferLength { expected: usize, actual: usize },

    #[error("Failed to decode frame: {0}")]
    Decode(String),

    #[error("Failed to encode frame: {0}")]
    Encode(String),

    #[error("Unsupported frame format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EdgeError>;
