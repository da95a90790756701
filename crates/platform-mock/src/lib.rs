//! In-memory platform pieces for touchsynth tests.
//!
//! Registers a recording touch sink that validates and stores every gesture
//! it receives, and provides fixed-bounds targets plus a velocity tracker to
//! inspect recorded sequences the way a touch consumer would.

mod sink;
mod target;
mod velocity;

pub use sink::{RecordingSink, reset_touch_log, take_touch_log, touch_sink, validate_sequence};
pub use target::MockTarget;
pub use velocity::{VelocityTracker, estimate_velocity};
