#![deny(unsafe_code)]
//! Core types and traits for landing-fx decorative page effects.
//!
//! Provides the `Surface` drawing trait with a CPU `PixelSurface`, the frame
//! loop abstraction (`Animation`, `Scheduler`, `FrameLoop`, `Interval`),
//! seedable random sources (`RandomSource`, `Xorshift64`, `SequenceSource`),
//! color and geometry types, and JSON parameter helpers.

pub mod color;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod params;
pub mod prng;
pub mod surface;

pub use color::{Rgba, Srgb};
pub use error::EffectError;
pub use frame::{Animation, FixedFrames, FrameLoop, Interval, Scheduler, FRAME_INTERVAL_MS};
pub use geometry::Rect;
pub use prng::{RandomSource, SequenceSource, Xorshift64};
pub use surface::{PixelSurface, Surface};
