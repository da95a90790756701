use touchsynth_core::types::Rect;
use touchsynth_core::ui::GestureTarget;

/// Target with fixed, optionally missing, bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct MockTarget {
    name: String,
    bounds: Option<Rect>,
}

impl MockTarget {
    pub fn new(name: impl Into<String>, bounds: Rect) -> Self {
        Self { name: name.into(), bounds: Some(bounds) }
    }

    /// Target without a rendered extent.
    pub fn detached(name: impl Into<String>) -> Self {
        Self { name: name.into(), bounds: None }
    }
}

impl GestureTarget for MockTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> Option<Rect> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn detached_target_keeps_its_name() {
        let target = MockTarget::detached("list");
        assert_eq!(target.bounds(), None);
        assert_eq!(target.name(), "list");
        let attached = MockTarget::new("list", Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(attached.bounds(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }
}
