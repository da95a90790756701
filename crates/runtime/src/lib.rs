//! Turns high-level gesture requests into timed touch sample sequences.

pub mod curve;
mod error;
mod gesture;
pub mod path;
pub mod resolve;
mod runtime;
mod sampler;
mod settings;

#[cfg(test)]
mod test_support;

pub use curve::{RangeViolation, VelocityRangeError};
pub use error::GestureError;
pub use gesture::{GestureScope, SwipeDirection, edge_swipe_points, velocity_components};
pub use runtime::Runtime;
pub use sampler::Sampler;
pub use settings::{GestureOverrides, GestureSettings, MIN_VELOCITY_SWIPE_DURATION};
