use touchsynth_core::types::{Point, Rect};
use touchsynth_core::ui::GestureTarget;

use crate::GestureError;

/// Returns the target's bounds in global coordinates.
pub fn resolve_bounds(target: &dyn GestureTarget) -> Result<Rect, GestureError> {
    target
        .bounds()
        .ok_or_else(|| GestureError::MissingBounds { target: target.name().to_owned() })
}

/// Translates a position relative to the top-left corner of `bounds` into
/// global coordinates.
pub fn resolve_point(bounds: Rect, local: Point) -> Point {
    bounds.position() + local
}

pub fn resolve(target: &dyn GestureTarget, local: Point) -> Result<Point, GestureError> {
    let bounds = resolve_bounds(target)?;
    Ok(resolve_point(bounds, local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use touchsynth_platform_mock::MockTarget;

    #[rstest]
    #[case(Point::new(5.0, 10.0), Point::new(105.0, 210.0))]
    #[case(Point::new(-10.0, 25.0), Point::new(90.0, 225.0))]
    #[case(Point::ORIGIN, Point::new(100.0, 200.0))]
    fn local_points_are_offset_by_bounds_origin(#[case] local: Point, #[case] expected: Point) {
        let target = MockTarget::new("button", Rect::new(100.0, 200.0, 50.0, 50.0));
        assert_eq!(resolve(&target, local).unwrap(), expected);
    }

    #[rstest]
    fn missing_bounds_names_the_target() {
        let target = MockTarget::detached("hidden-list");
        let err = resolve(&target, Point::ORIGIN).expect_err("no bounds");
        assert!(matches!(&err, GestureError::MissingBounds { target } if target == "hidden-list"));
        assert!(err.to_string().contains("hidden-list"));
    }
}
