use touchsynth_core::platform::{TouchSink, touch_sinks};
use touchsynth_core::ui::GestureTarget;
use tracing::{debug, info};

use crate::GestureError;
use crate::gesture::GestureScope;
use crate::settings::{GestureOverrides, GestureSettings, apply_overrides};

/// Entry point that owns the touch sink and the default gesture settings.
pub struct Runtime {
    sink: &'static dyn TouchSink,
    settings: GestureSettings,
}

impl Runtime {
    /// Uses the first registered touch sink and default settings.
    pub fn new() -> Result<Self, GestureError> {
        Self::with_settings(GestureSettings::default())
    }

    pub fn with_settings(settings: GestureSettings) -> Result<Self, GestureError> {
        let sink = touch_sinks().next().ok_or(GestureError::MissingSink)?;
        Self::with_sink(sink, settings)
    }

    /// Bypasses sink discovery, e.g. to inject a recording sink.
    pub fn with_sink(
        sink: &'static dyn TouchSink,
        settings: GestureSettings,
    ) -> Result<Self, GestureError> {
        settings.validate()?;
        info!(
            sampling_period = ?settings.sampling_period,
            swipe_duration = ?settings.swipe_duration,
            "gesture runtime ready"
        );
        Ok(Self { sink, settings })
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn gestures<'a>(
        &'a self,
        target: &'a dyn GestureTarget,
    ) -> Result<GestureScope<'a>, GestureError> {
        self.gestures_with(target, &GestureOverrides::default())
    }

    /// Creates a scope whose settings are the runtime defaults with
    /// `overrides` applied.
    pub fn gestures_with<'a>(
        &'a self,
        target: &'a dyn GestureTarget,
        overrides: &GestureOverrides,
    ) -> Result<GestureScope<'a>, GestureError> {
        let mut settings = self.settings.clone();
        apply_overrides(&mut settings, overrides);
        debug!(target_name = target.name(), ?overrides, "opening gesture scope");
        GestureScope::new(target, self.sink, settings)
    }
}
