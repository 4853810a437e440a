//! Column-tiled parallel edge detection
//!
//! A frame is split into contiguous column ranges, one per worker. Each
//! worker converts its luminance columns, waits at a barrier until the whole
//! luminance plane exists, then evaluates Sobel on its edge-map columns.
//! The barrier matters because a worker's Sobel window reaches one column
//! into each neighbor's luminance range.

mod partition;
mod scheduler;
mod share;

#[cfg(test)]
mod tests;

pub use partition::partition_columns;
pub use scheduler::TiledScheduler;
pub use share::WorkShare;
