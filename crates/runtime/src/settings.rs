use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::GestureError;

/// Shortest velocity swipe that still yields a Down, a Move and an Up sample
/// at the default sampling period.
pub const MIN_VELOCITY_SWIPE_DURATION: Duration = Duration::from_millis(25);

/// Environment level gesture settings.
///
/// `sampling_period` and `velocity_window` describe the system under test
/// (how often it samples input, how far back its velocity estimator looks)
/// and are therefore shared by every gesture of a runtime. The remaining
/// fields are defaults that a scope may override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Interval between consecutive Move samples.
    #[serde(with = "millis")]
    pub sampling_period: Duration,
    /// Duration used by swipes that do not specify one.
    #[serde(with = "millis")]
    pub swipe_duration: Duration,
    /// Shortest duration a velocity-matched swipe may take.
    #[serde(with = "millis")]
    pub min_velocity_swipe_duration: Duration,
    /// Trailing window of the consumer's velocity estimator. The
    /// direction-correction fallback of the curve generator only rewrites the
    /// path before this window.
    #[serde(with = "millis")]
    pub velocity_window: Duration,
    /// Fraction of the target size by which edge swipes stay away from the edges.
    pub edge_fuzz_factor: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            sampling_period: Duration::from_millis(10),
            swipe_duration: Duration::from_millis(200),
            min_velocity_swipe_duration: MIN_VELOCITY_SWIPE_DURATION,
            velocity_window: Duration::from_millis(100),
            edge_fuzz_factor: 0.083,
        }
    }
}

impl GestureSettings {
    pub fn with_sampling_period(mut self, period: Duration) -> Self {
        self.sampling_period = period;
        self
    }

    pub fn with_velocity_window(mut self, window: Duration) -> Self {
        self.velocity_window = window;
        self
    }

    pub fn validate(&self) -> Result<(), GestureError> {
        if self.sampling_period.is_zero() {
            return Err(GestureError::precondition("sampling period must be greater than 0"));
        }
        if self.velocity_window.is_zero() {
            return Err(GestureError::precondition("velocity window must be greater than 0"));
        }
        if self.swipe_duration.is_zero() {
            return Err(GestureError::precondition("swipe duration must be greater than 0"));
        }
        if self.min_velocity_swipe_duration < MIN_VELOCITY_SWIPE_DURATION {
            return Err(GestureError::precondition(format!(
                "minimum velocity swipe duration must be at least {} ms, got {} ms",
                MIN_VELOCITY_SWIPE_DURATION.as_millis(),
                self.min_velocity_swipe_duration.as_millis()
            )));
        }
        if !(0.0..0.5).contains(&self.edge_fuzz_factor) {
            return Err(GestureError::precondition(format!(
                "edge fuzz factor must be within [0, 0.5), got {}",
                self.edge_fuzz_factor
            )));
        }
        Ok(())
    }
}

/// Per-scope overrides applied on top of the runtime settings.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GestureOverrides {
    pub swipe_duration: Option<Duration>,
    pub edge_fuzz_factor: Option<f64>,
}

impl GestureOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn swipe_duration(mut self, duration: Duration) -> Self {
        self.swipe_duration = Some(duration);
        self
    }

    pub fn edge_fuzz_factor(mut self, factor: f64) -> Self {
        self.edge_fuzz_factor = Some(factor);
        self
    }
}

pub(crate) fn apply_overrides(settings: &mut GestureSettings, overrides: &GestureOverrides) {
    if let Some(duration) = overrides.swipe_duration {
        settings.swipe_duration = duration;
    }
    if let Some(factor) = overrides.edge_fuzz_factor {
        settings.edge_fuzz_factor = factor;
    }
}

/// Durations are exchanged as whole milliseconds.
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).map_err(serde::ser::Error::custom)?;
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_valid() {
        let settings = GestureSettings::default();
        settings.validate().unwrap();
        assert_eq!(settings.sampling_period, Duration::from_millis(10));
        assert_eq!(settings.velocity_window, Duration::from_millis(100));
    }

    #[rstest]
    #[case(GestureSettings::default().with_sampling_period(Duration::ZERO), "sampling period")]
    #[case(GestureSettings::default().with_velocity_window(Duration::ZERO), "velocity window")]
    #[case(GestureSettings { swipe_duration: Duration::ZERO, ..GestureSettings::default() }, "swipe duration")]
    #[case(
        GestureSettings { min_velocity_swipe_duration: Duration::from_millis(1), ..GestureSettings::default() },
        "at least 25 ms"
    )]
    #[case(
        GestureSettings { min_velocity_swipe_duration: Duration::from_millis(24), ..GestureSettings::default() },
        "at least 25 ms"
    )]
    #[case(GestureSettings { edge_fuzz_factor: 0.5, ..GestureSettings::default() }, "edge fuzz")]
    #[case(GestureSettings { edge_fuzz_factor: -0.1, ..GestureSettings::default() }, "edge fuzz")]
    fn invalid_settings_are_rejected(#[case] settings: GestureSettings, #[case] needle: &str) {
        let err = settings.validate().expect_err("settings must be rejected");
        assert!(matches!(err, GestureError::Precondition(_)));
        assert!(err.to_string().contains(needle));
    }

    #[rstest]
    fn longer_velocity_minimum_is_accepted() {
        let settings = GestureSettings {
            min_velocity_swipe_duration: Duration::from_millis(60),
            ..GestureSettings::default()
        };
        settings.validate().unwrap();
    }

    #[rstest]
    fn overrides_only_touch_given_fields() {
        let mut settings = GestureSettings::default();
        let overrides = GestureOverrides::new().swipe_duration(Duration::from_millis(350));
        apply_overrides(&mut settings, &overrides);
        assert_eq!(settings.swipe_duration, Duration::from_millis(350));
        assert!((settings.edge_fuzz_factor - 0.083).abs() < f64::EPSILON);
        assert_eq!(settings.sampling_period, Duration::from_millis(10));
    }

    #[rstest]
    fn partial_json_keeps_defaults() {
        let settings: GestureSettings =
            serde_json::from_str(r#"{ "sampling_period": 16, "edge_fuzz_factor": 0.1 }"#).unwrap();
        assert_eq!(settings.sampling_period, Duration::from_millis(16));
        assert!((settings.edge_fuzz_factor - 0.1).abs() < f64::EPSILON);
        assert_eq!(settings.swipe_duration, Duration::from_millis(200));
    }

    #[rstest]
    fn durations_serialize_as_millis() {
        let json = serde_json::to_value(GestureSettings::default()).unwrap();
        assert_eq!(json["sampling_period"], 10);
        assert_eq!(json["min_velocity_swipe_duration"], 25);
    }
}
