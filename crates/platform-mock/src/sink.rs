use std::sync::{Mutex, PoisonError};

use touchsynth_core::platform::{
    PlatformError, PlatformErrorKind, TouchPhase, TouchSample, TouchSink, register_touch_sink,
};
use tracing::trace;

/// Touch sink that keeps every accepted gesture in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    gestures: Mutex<Vec<Vec<TouchSample>>>,
}

impl RecordingSink {
    pub const fn new() -> Self {
        Self { gestures: Mutex::new(Vec::new()) }
    }

    /// Returns the gestures recorded since the last call and clears the buffer.
    pub fn take_gestures(&self) -> Vec<Vec<TouchSample>> {
        let mut gestures = self.gestures.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *gestures)
    }

    pub fn reset(&self) {
        self.gestures.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl TouchSink for RecordingSink {
    fn accept(&self, samples: &[TouchSample]) -> Result<(), PlatformError> {
        validate_sequence(samples)?;
        for sample in samples {
            trace!(
                phase = sample.phase.as_str(),
                t = ?sample.timestamp,
                x = sample.position.x(),
                y = sample.position.y(),
                "mock-touch"
            );
        }
        self.gestures.lock().unwrap_or_else(PoisonError::into_inner).push(samples.to_vec());
        Ok(())
    }
}

/// Checks that `samples` form one well-ordered gesture.
///
/// A gesture starts with a Down sample at `t = 0`, ends with an Up sample and
/// carries only Move samples in between. Timestamps increase strictly; a
/// zero-duration gesture consists of exactly Down and Up at `t = 0`.
pub fn validate_sequence(samples: &[TouchSample]) -> Result<(), PlatformError> {
    let invalid = |message: String| PlatformError::new(PlatformErrorKind::InvalidSequence, message);

    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Err(invalid("empty gesture".into()));
    };
    if samples.len() < 2 {
        return Err(invalid("gesture needs at least a Down and an Up sample".into()));
    }
    if first.phase != TouchPhase::Down || !first.timestamp.is_zero() {
        return Err(invalid(format!("gesture must start with Down at 0, got {first:?}")));
    }
    if last.phase != TouchPhase::Up {
        return Err(invalid(format!("gesture must end with Up, got {last:?}")));
    }
    if let Some(sample) = samples[1..samples.len() - 1].iter().find(|s| s.phase != TouchPhase::Move) {
        return Err(invalid(format!("unexpected {} inside gesture", sample.phase.as_str())));
    }
    if last.timestamp.is_zero() {
        if samples.len() != 2 {
            return Err(invalid("zero-duration gesture must not contain Move samples".into()));
        }
        return Ok(());
    }
    if let Some(pair) = samples.windows(2).find(|pair| pair[0].timestamp >= pair[1].timestamp) {
        return Err(invalid(format!(
            "timestamps must increase: {:?} followed by {:?}",
            pair[0].timestamp, pair[1].timestamp
        )));
    }
    Ok(())
}

static MOCK_SINK: RecordingSink = RecordingSink::new();

register_touch_sink!(&MOCK_SINK);

pub fn touch_sink() -> &'static dyn TouchSink {
    &MOCK_SINK
}

/// Returns the gestures the registered mock sink received since the last
/// call and clears the buffer.
pub fn take_touch_log() -> Vec<Vec<TouchSample>> {
    MOCK_SINK.take_gestures()
}

pub fn reset_touch_log() {
    MOCK_SINK.reset();
}
