use std::time::Duration;

use touchsynth_core::platform::TouchSink;
use touchsynth_core::types::{Point, Size};
use touchsynth_core::ui::GestureTarget;
use tracing::debug;

use crate::GestureError;
use crate::curve::build_velocity_curve;
use crate::path::{AxisPair, GesturePath, LinearPath};
use crate::resolve::{resolve_bounds, resolve_point};
use crate::sampler::Sampler;
use crate::settings::GestureSettings;

/// Direction of an edge-to-edge swipe across the target.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Gesture operations bound to one target.
///
/// Positions passed to the operations are relative to the top-left corner of
/// the target; they are translated to global coordinates with the target's
/// bounds at the time of the call. Each operation either hands one complete
/// sample sequence to the sink or fails without emitting anything.
pub struct GestureScope<'a> {
    target: &'a dyn GestureTarget,
    sink: &'a dyn TouchSink,
    settings: GestureSettings,
    sampler: Sampler,
}

impl<'a> GestureScope<'a> {
    pub fn new(
        target: &'a dyn GestureTarget,
        sink: &'a dyn TouchSink,
        settings: GestureSettings,
    ) -> Result<Self, GestureError> {
        settings.validate()?;
        let sampler = Sampler::new(settings.sampling_period)?;
        Ok(Self { target, sink, settings, sampler })
    }

    /// Presses and releases at `position`, the target's center by default.
    pub fn click(&self, position: Option<Point>) -> Result<(), GestureError> {
        let bounds = resolve_bounds(self.target)?;
        let point = position.map_or_else(|| bounds.center(), |local| resolve_point(bounds, local));
        self.dispatch(&LinearPath::stationary(point))
    }

    /// Straight swipe at constant speed. The duration must not be zero;
    /// only a click may press and release at the same instant.
    pub fn swipe(
        &self,
        start: Point,
        end: Point,
        duration: Option<Duration>,
    ) -> Result<(), GestureError> {
        let duration = duration.unwrap_or(self.settings.swipe_duration);
        if duration.is_zero() {
            return Err(GestureError::precondition("swipe duration must be greater than 0"));
        }
        let bounds = resolve_bounds(self.target)?;
        let path =
            LinearPath::new(resolve_point(bounds, start), resolve_point(bounds, end), duration);
        self.dispatch(&path)
    }

    /// Swipe whose release velocity, as estimated over the trailing
    /// `velocity_window`, is `end_velocity` px/s in the direction from
    /// `start` to `end`.
    pub fn swipe_with_velocity(
        &self,
        start: Point,
        end: Point,
        end_velocity: f64,
        duration: Option<Duration>,
    ) -> Result<(), GestureError> {
        let duration = duration.unwrap_or(self.settings.swipe_duration);
        if !end_velocity.is_finite() || end_velocity < 0.0 {
            return Err(GestureError::precondition(format!(
                "end velocity must be a non-negative number, got {end_velocity}"
            )));
        }
        if duration < self.settings.min_velocity_swipe_duration {
            return Err(GestureError::precondition(format!(
                "velocity swipes need at least {} ms, got {} ms",
                self.settings.min_velocity_swipe_duration.as_millis(),
                duration.as_millis()
            )));
        }

        let bounds = resolve_bounds(self.target)?;
        let start = resolve_point(bounds, start);
        let end = resolve_point(bounds, end);
        let (vx, vy) = velocity_components(start, end, end_velocity / 1000.0);
        let window = self.settings.velocity_window;
        let x = build_velocity_curve(duration, start.x(), end.x(), vx, window)?;
        let y = build_velocity_curve(duration, start.y(), end.y(), vy, window)?;
        self.dispatch(&AxisPair::new(x, y, duration))
    }

    pub fn swipe_edge(&self, direction: SwipeDirection) -> Result<(), GestureError> {
        let bounds = resolve_bounds(self.target)?;
        let (start, end) =
            edge_swipe_points(bounds.size(), direction, self.settings.edge_fuzz_factor);
        let path = LinearPath::new(
            resolve_point(bounds, start),
            resolve_point(bounds, end),
            self.settings.swipe_duration,
        );
        self.dispatch(&path)
    }

    pub fn swipe_up(&self) -> Result<(), GestureError> {
        self.swipe_edge(SwipeDirection::Up)
    }

    pub fn swipe_down(&self) -> Result<(), GestureError> {
        self.swipe_edge(SwipeDirection::Down)
    }

    pub fn swipe_left(&self) -> Result<(), GestureError> {
        self.swipe_edge(SwipeDirection::Left)
    }

    pub fn swipe_right(&self) -> Result<(), GestureError> {
        self.swipe_edge(SwipeDirection::Right)
    }

    fn dispatch(&self, path: &dyn GesturePath) -> Result<(), GestureError> {
        let samples = self.sampler.dispatch(self.sink, path)?;
        debug!(
            target_name = self.target.name(),
            samples = samples.len(),
            duration = ?path.duration(),
            from = ?path.start(),
            to = ?path.end(),
            "gesture replayed"
        );
        Ok(())
    }
}

/// Splits a scalar velocity along the direction from `start` to `end`.
///
/// Equivalent to `(cos θ·v, sin θ·v)` with `θ = atan2(dy, dx)`, but an axis
/// without movement gets exactly zero. A zero-length swipe puts the whole
/// velocity on the x axis, as `atan2(0, 0) = 0` does.
pub fn velocity_components(start: Point, end: Point, velocity: f64) -> (f64, f64) {
    let delta = end - start;
    let (dx, dy) = (delta.x(), delta.y());
    let length = dx.hypot(dy);
    if length <= 0.0 { (velocity, 0.0) } else { (dx / length * velocity, dy / length * velocity) }
}

/// Local start and end points of an edge swipe, kept `fuzz` of the target
/// size away from the edges along the center line.
pub fn edge_swipe_points(size: Size, direction: SwipeDirection, fuzz: f64) -> (Point, Point) {
    let center = local_center(size);
    let near_top = size.height() * fuzz;
    let near_bottom = size.height() * (1.0 - fuzz);
    let near_left = size.width() * fuzz;
    let near_right = size.width() * (1.0 - fuzz);
    match direction {
        SwipeDirection::Up => (center.with_y(near_bottom), center.with_y(near_top)),
        SwipeDirection::Down => (center.with_y(near_top), center.with_y(near_bottom)),
        SwipeDirection::Left => (center.with_x(near_right), center.with_x(near_left)),
        SwipeDirection::Right => (center.with_x(near_left), center.with_x(near_right)),
    }
}

fn local_center(size: Size) -> Point {
    Point::new(size.width() / 2.0, size.height() / 2.0)
}
