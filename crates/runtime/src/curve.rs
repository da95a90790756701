//! Single-axis curves for velocity-matched swipes.
//!
//! A velocity swipe is built from two independent scalar curves, one per
//! axis. Each curve is the unique parabola through `start` at `t = 0` and
//! `end` at `t = D` whose derivative at `t = D` equals the requested
//! velocity component. Consumers estimate the release velocity from a
//! trailing window of samples only, so the part of the curve before that
//! window may be replaced by a straight line when the parabola would first
//! move away from `end`.
//!
//! Time is measured in milliseconds and velocities in units per millisecond.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

/// A continuous function of time along one axis.
pub trait ScalarCurve {
    fn value_at(&self, t_ms: f64) -> f64;
}

/// `f(t) = a·(t−D)² + v·(t−D) + end`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityCurve {
    a: f64,
    velocity: f64,
    start: f64,
    end: f64,
    duration_ms: f64,
}

impl VelocityCurve {
    /// `duration_ms` must be positive.
    pub fn new(duration_ms: f64, start: f64, end: f64, velocity: f64) -> Self {
        let a = (start - end + velocity * duration_ms) / (duration_ms * duration_ms);
        Self { a, velocity, start, end, duration_ms }
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    fn raw(&self, t_ms: f64) -> f64 {
        let dt = t_ms - self.duration_ms;
        self.a * dt * dt + self.velocity * dt + self.end
    }
}

impl ScalarCurve for VelocityCurve {
    fn value_at(&self, t_ms: f64) -> f64 {
        // f(0) equals start only up to rounding; the start point is pinned.
        if t_ms <= 0.0 { self.start } else { self.raw(t_ms) }
    }
}

/// Curve actually used for one axis of a velocity swipe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisCurve {
    Parabola(VelocityCurve),
    /// Straight line from `start` to `cutoff_value` on `[0, cutoff_ms)`,
    /// the parabola from `cutoff_ms` on.
    Corrected { parabola: VelocityCurve, cutoff_ms: f64, cutoff_value: f64 },
}

impl AxisCurve {
    pub fn parabola(&self) -> &VelocityCurve {
        match self {
            AxisCurve::Parabola(parabola) | AxisCurve::Corrected { parabola, .. } => parabola,
        }
    }

    /// Exact derivative at `t = D`.
    pub fn terminal_velocity(&self) -> f64 {
        self.parabola().velocity()
    }

    pub fn is_corrected(&self) -> bool {
        matches!(self, AxisCurve::Corrected { .. })
    }
}

impl ScalarCurve for AxisCurve {
    fn value_at(&self, t_ms: f64) -> f64 {
        match self {
            AxisCurve::Corrected { parabola, cutoff_ms, cutoff_value } if t_ms < *cutoff_ms => {
                if t_ms <= 0.0 {
                    parabola.start
                } else {
                    lerp(parabola.start, *cutoff_value, t_ms / cutoff_ms)
                }
            }
            curve => curve.parabola().value_at(t_ms),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RangeViolation {
    EmptyDuration,
    /// The gesture is not longer than the velocity window, so there is no
    /// room to straighten its beginning.
    NoCorrectionWindow,
    /// Even at the start of the velocity window the parabola is still on the
    /// wrong side of `start`.
    WrongDirection,
}

impl Display for RangeViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeViolation::EmptyDuration => write!(f, "duration is empty"),
            RangeViolation::NoCorrectionWindow => {
                write!(f, "duration leaves no room before the velocity window")
            }
            RangeViolation::WrongDirection => {
                write!(f, "path still moves away from the end point at the velocity window")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[error(
    "velocity {velocity} px/ms cannot be reached moving from {start} to {end} in {duration_ms} ms: {reason}"
)]
pub struct VelocityRangeError {
    pub start: f64,
    pub end: f64,
    pub velocity: f64,
    pub duration_ms: f64,
    pub reason: RangeViolation,
}

/// Builds the curve for one axis of a velocity-matched swipe.
///
/// `velocity` is the signed per-millisecond component along this axis and
/// `window` the trailing window of the consumer's velocity estimator.
pub fn build_velocity_curve(
    duration: Duration,
    start: f64,
    end: f64,
    velocity: f64,
    window: Duration,
) -> Result<AxisCurve, VelocityRangeError> {
    let duration_ms = millis(duration);
    let reject = |reason| {
        let err = VelocityRangeError { start, end, velocity, duration_ms, reason };
        warn!(start, end, velocity, duration_ms, %reason, "velocity curve rejected");
        err
    };
    if duration_ms <= 0.0 {
        return Err(reject(RangeViolation::EmptyDuration));
    }

    let parabola = VelocityCurve::new(duration_ms, start, end, velocity);
    let wanted = direction(end - start);
    if direction(parabola.raw(1.0) - start) == wanted {
        return Ok(AxisCurve::Parabola(parabola));
    }

    let cutoff_ms = duration_ms - millis(window);
    if cutoff_ms <= 0.0 {
        return Err(reject(RangeViolation::NoCorrectionWindow));
    }
    let cutoff_value = parabola.raw(cutoff_ms);
    if direction(cutoff_value - start) != wanted {
        return Err(reject(RangeViolation::WrongDirection));
    }

    debug!(start, end, velocity, cutoff_ms, cutoff_value, "straightening start of velocity curve");
    Ok(AxisCurve::Corrected { parabola, cutoff_ms, cutoff_value })
}

/// Exact conversion for whole-nanosecond durations.
pub(crate) fn millis(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

fn lerp(from: f64, to: f64, fraction: f64) -> f64 {
    from + (to - from) * fraction
}

/// Three-valued sign; zero stays zero.
fn direction(value: f64) -> Ordering {
    value.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
}
