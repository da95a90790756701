use std::collections::VecDeque;
use std::time::Duration;

use touchsynth_core::platform::TouchSample;
use tracing::trace;

const DEFAULT_WINDOW: Duration = Duration::from_millis(100);
const SINGULAR: f64 = 1e-12;

/// Estimates the release velocity of a touch sequence.
///
/// Keeps the samples of the trailing `window` and fits a quadratic through
/// each axis with least squares; the velocity is the slope of that fit at the
/// newest sample. This is how typical touch consumers derive fling speeds, so
/// a gesture whose path is a parabola over the window reads back exactly.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    window: Duration,
    history: VecDeque<TouchSample>,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl VelocityTracker {
    pub fn new(window: Duration) -> Self {
        Self { window, history: VecDeque::new() }
    }

    pub fn push(&mut self, sample: TouchSample) {
        if let Some(last) = self.history.back()
            && sample.timestamp < last.timestamp
        {
            trace!(
                "ignoring sample at {:?} earlier than last {:?}",
                sample.timestamp, last.timestamp
            );
            return;
        }

        self.history.push_back(sample);
        self.trim_history();
    }

    /// Velocity at the newest sample in px/s, as `(x, y)`.
    pub fn velocity(&self) -> (f64, f64) {
        let (Some(first), Some(last)) = (self.history.front(), self.history.back()) else {
            return (0.0, 0.0);
        };
        let span_ms = (last.timestamp - first.timestamp).as_secs_f64() * 1000.0;
        if span_ms <= 0.0 {
            return (0.0, 0.0);
        }

        // Time is normalized to [-1, 0] over the history to keep the fit well
        // conditioned.
        let scaled = |sample: &TouchSample| {
            let age_ms = (last.timestamp - sample.timestamp).as_secs_f64() * 1000.0;
            -age_ms / span_ms
        };
        let xs: Vec<_> =
            self.history.iter().map(|sample| (scaled(sample), sample.position.x())).collect();
        let ys: Vec<_> =
            self.history.iter().map(|sample| (scaled(sample), sample.position.y())).collect();

        let per_second = 1000.0 / span_ms;
        (slope_at_zero(&xs) * per_second, slope_at_zero(&ys) * per_second)
    }

    fn trim_history(&mut self) {
        let Some(latest) = self.history.back().map(|sample| sample.timestamp) else {
            return;
        };

        while let Some(first) = self.history.front() {
            if latest <= first.timestamp + self.window {
                break;
            }
            self.history.pop_front();
        }
    }
}

/// Release velocity of a recorded gesture in px/s.
pub fn estimate_velocity(samples: &[TouchSample], window: Duration) -> (f64, f64) {
    let mut tracker = VelocityTracker::new(window);
    for sample in samples {
        tracker.push(*sample);
    }
    tracker.velocity()
}

fn slope_at_zero(points: &[(f64, f64)]) -> f64 {
    if points.len() >= 3
        && let Some(slope) = quadratic_slope(points)
    {
        return slope;
    }
    linear_slope(points).unwrap_or(0.0)
}

fn quadratic_slope(points: &[(f64, f64)]) -> Option<f64> {
    let mut system = [[0.0; 4]; 3];
    for &(t, value) in points {
        let basis = [1.0, t, t * t];
        for row in 0..3 {
            for col in 0..3 {
                system[row][col] += basis[row] * basis[col];
            }
            system[row][3] += basis[row] * value;
        }
    }
    solve(system).map(|coefficients| coefficients[1])
}

fn linear_slope(points: &[(f64, f64)]) -> Option<f64> {
    let n = points.len() as f64;
    let (sum_t, sum_v, sum_tt, sum_tv) =
        points.iter().fold((0.0, 0.0, 0.0, 0.0), |(t, v, tt, tv), &(pt, pv)| {
            (t + pt, v + pv, tt + pt * pt, tv + pt * pv)
        });
    let denominator = n * sum_tt - sum_t * sum_t;
    if denominator.abs() < SINGULAR {
        return None;
    }
    Some((n * sum_tv - sum_t * sum_v) / denominator)
}

/// Gauss-Jordan elimination with partial pivoting on an augmented 3x3 system.
fn solve(mut system: [[f64; 4]; 3]) -> Option<[f64; 3]> {
    for col in 0..3 {
        let pivot = (col..3).max_by(|&a, &b| system[a][col].abs().total_cmp(&system[b][col].abs()))?;
        if system[pivot][col].abs() < SINGULAR {
            return None;
        }
        system.swap(col, pivot);
        for row in 0..3 {
            if row == col {
                continue;
            }
            let factor = system[row][col] / system[col][col];
            for k in col..4 {
                let delta = factor * system[col][k];
                system[row][k] -= delta;
            }
        }
    }
    Some([
        system[0][3] / system[0][0],
        system[1][3] / system[1][1],
        system[2][3] / system[2][2],
    ])
}
