//! Common utilities module
//!
//! This module contains shared utilities used across the edge pipeline.

pub mod error;

pub use error::{EdgeError, Result, WorkerPhase};
