use crate::platform::PlatformError;
use crate::types::Point;
use std::time::Duration;

/// Contact phase of a single touch sample.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
}

impl TouchPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            TouchPhase::Down => "down",
            TouchPhase::Move => "move",
            TouchPhase::Up => "up",
        }
    }
}

/// One discrete pointer contact, timestamped relative to the start of the gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    pub position: Point,
    pub timestamp: Duration,
    pub phase: TouchPhase,
}

impl TouchSample {
    pub const fn new(position: Point, timestamp: Duration, phase: TouchPhase) -> Self {
        Self { position, timestamp, phase }
    }

    pub const fn down(position: Point) -> Self {
        Self::new(position, Duration::ZERO, TouchPhase::Down)
    }

    pub const fn moved(position: Point, timestamp: Duration) -> Self {
        Self::new(position, timestamp, TouchPhase::Move)
    }

    pub const fn up(position: Point, timestamp: Duration) -> Self {
        Self::new(position, timestamp, TouchPhase::Up)
    }
}

/// Trait that platform crates implement to replay synthesized gestures.
///
/// `accept` receives the complete sequence of one gesture: a Down sample,
/// any number of Move samples and a final Up sample. Implementations must
/// replay it in order and must not interleave it with another call.
pub trait TouchSink: Send + Sync {
    fn accept(&self, samples: &[TouchSample]) -> Result<(), PlatformError>;
}

pub struct TouchSinkRegistration {
    pub sink: &'static dyn TouchSink,
}

inventory::collect!(TouchSinkRegistration);

pub fn touch_sinks() -> impl Iterator<Item = &'static dyn TouchSink> {
    inventory::iter::<TouchSinkRegistration>.into_iter().map(|entry| entry.sink)
}

#[macro_export]
macro_rules! register_touch_sink {
    ($sink:expr) => {
        inventory::submit! {
            $crate::platform::TouchSinkRegistration { sink: $sink }
        }
    };
}
