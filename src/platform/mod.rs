//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks (`time`)
//! - Pointer and touch input (`input`)
//!
//! Storage lives in [`crate::persistence`].

pub mod input;
pub mod time;

pub use input::{PointerMapper, SurfaceRect};
pub use time::FrameClock;
