pub mod point;
pub mod rect;
pub mod size;

pub use point::Point;
pub use rect::Rect;
pub use size::Size;
