use thiserror::Error;
use touchsynth_core::platform::PlatformError;

use crate::curve::VelocityRangeError;

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("target '{target}' has no resolvable bounds")]
    MissingBounds { target: String },
    #[error("invalid gesture parameters: {0}")]
    Precondition(String),
    #[error(transparent)]
    VelocityRange(#[from] VelocityRangeError),
    #[error("no TouchSink registered")]
    MissingSink,
    #[error("touch sink rejected gesture: {0}")]
    Sink(#[from] PlatformError),
}

impl GestureError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        GestureError::Precondition(message.into())
    }
}
