use crate::types::Rect;
use std::sync::Arc;

/// Component instance a gesture is performed against.
///
/// Implementations typically wrap a node of a UI tree. `bounds` reports the
/// target's extent in global coordinates and returns `None` when the target
/// has no rendered extent (detached, collapsed to nothing, not laid out yet).
pub trait GestureTarget: Send + Sync {
    /// Human readable identification used in error messages and logs.
    fn name(&self) -> &str;

    fn bounds(&self) -> Option<Rect>;
}

impl<T: GestureTarget + ?Sized> GestureTarget for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn bounds(&self) -> Option<Rect> {
        (**self).bounds()
    }
}
