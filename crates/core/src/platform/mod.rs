mod error;
mod touch;

pub use error::{PlatformError, PlatformErrorKind};
pub use touch::{TouchPhase, TouchSample, TouchSink, TouchSinkRegistration, touch_sinks};

pub use crate::register_touch_sink;
