use std::time::Duration;

use touchsynth_core::types::Point;

use crate::curve::{ScalarCurve, millis};

/// Continuous position function over `[0, duration]`.
pub trait GesturePath {
    fn duration(&self) -> Duration;

    fn position_at(&self, t: Duration) -> Point;

    /// Position of the Down sample.
    fn start(&self) -> Point {
        self.position_at(Duration::ZERO)
    }

    /// Position of the Up sample.
    fn end(&self) -> Point {
        self.position_at(self.duration())
    }
}

/// Straight line travelled at constant speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearPath {
    start: Point,
    end: Point,
    duration: Duration,
}

impl LinearPath {
    pub fn new(start: Point, end: Point, duration: Duration) -> Self {
        Self { start, end, duration }
    }

    /// Zero-length, zero-duration path used for clicks.
    pub fn stationary(point: Point) -> Self {
        Self::new(point, point, Duration::ZERO)
    }

    /// Position at `fraction` of the way from start to end.
    pub fn interpolate(&self, fraction: f64) -> Point {
        Point::new(
            self.start.x() + (self.end.x() - self.start.x()) * fraction,
            self.start.y() + (self.end.y() - self.start.y()) * fraction,
        )
    }
}

impl GesturePath for LinearPath {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn position_at(&self, t: Duration) -> Point {
        if t.is_zero() {
            self.start
        } else if t >= self.duration {
            self.end
        } else {
            self.interpolate(t.as_nanos() as f64 / self.duration.as_nanos() as f64)
        }
    }

    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        self.end
    }
}

/// Two independent scalar curves combined into a 2-D path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisPair<X, Y> {
    x: X,
    y: Y,
    duration: Duration,
}

impl<X: ScalarCurve, Y: ScalarCurve> AxisPair<X, Y> {
    pub fn new(x: X, y: Y, duration: Duration) -> Self {
        Self { x, y, duration }
    }
}

impl<X: ScalarCurve, Y: ScalarCurve> GesturePath for AxisPair<X, Y> {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn position_at(&self, t: Duration) -> Point {
        let t_ms = millis(t);
        Point::new(self.x.value_at(t_ms), self.y.value_at(t_ms))
    }
}
