use std::time::Duration;

use touchsynth_core::platform::{TouchSample, TouchSink};
use tracing::trace;

use crate::GestureError;
use crate::path::GesturePath;

/// Turns continuous gesture paths into timestamped touch samples.
///
/// The sequence always starts with a Down sample at `t = 0` and ends with an
/// Up sample at `t = duration`. In between, one Move sample is produced for
/// every multiple of `period` that lies strictly inside `(0, duration)`, so
/// the last interval is shorter than `period` whenever the duration is not a
/// multiple of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sampler {
    period: Duration,
}

impl Sampler {
    pub fn new(period: Duration) -> Result<Self, GestureError> {
        if period.is_zero() {
            return Err(GestureError::precondition("sampling period must be greater than 0"));
        }
        Ok(Self { period })
    }

    /// Number of Move samples produced for a gesture of `duration`.
    pub fn move_count(&self, duration: Duration) -> usize {
        if duration.is_zero() {
            return 0;
        }
        let moves = (duration.as_nanos() - 1) / self.period.as_nanos();
        usize::try_from(moves).unwrap_or(usize::MAX)
    }

    pub fn sample(&self, path: &dyn GesturePath) -> Vec<TouchSample> {
        let duration = path.duration();
        let mut samples = Vec::with_capacity(self.move_count(duration).saturating_add(2));
        samples.push(TouchSample::down(path.start()));

        let mut t = self.period;
        while t < duration {
            samples.push(TouchSample::moved(path.position_at(t), t));
            match t.checked_add(self.period) {
                Some(next) => t = next,
                None => break,
            }
        }

        samples.push(TouchSample::up(path.end(), duration));
        samples
    }

    /// Samples `path` and hands the complete sequence to `sink` in one call.
    pub fn dispatch(
        &self,
        sink: &dyn TouchSink,
        path: &dyn GesturePath,
    ) -> Result<Vec<TouchSample>, GestureError> {
        let samples = self.sample(path);
        for sample in &samples {
            trace!(
                phase = sample.phase.as_str(),
                t = ?sample.timestamp,
                x = sample.position.x(),
                y = sample.position.y(),
                "sample"
            );
        }
        sink.accept(&samples)?;
        Ok(samples)
    }
}
