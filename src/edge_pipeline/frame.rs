//! Frame representations flowing through the edge pipeline
//!
//! A `ColorFrame` enters from a frame source, is reduced to a
//! `LuminanceFrame` of the same size, and leaves as an `EdgeFrame` that is
//! one pixel narrower on every side.

mod color;
mod geometry;
mod plane;

pub use color::{ChannelOrder, ColorFrame};
pub use geometry::FrameGeometry;
pub use plane::{EdgeFrame, LuminanceFrame};
