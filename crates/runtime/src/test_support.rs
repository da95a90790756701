use crate::{GestureSettings, Runtime};
use rstest::fixture;
use touchsynth_core::types::Rect;
use touchsynth_platform_mock::{MockTarget, touch_sink};

/// rstest fixture: Runtime replaying into the recording mock sink
#[fixture]
pub fn runtime_mock() -> Runtime {
    Runtime::with_sink(touch_sink(), GestureSettings::default()).expect("runtime")
}

/// rstest fixture: 400x600 target anchored at the global origin
#[fixture]
pub fn screen() -> MockTarget {
    MockTarget::new("screen", Rect::new(0.0, 0.0, 400.0, 600.0))
}
