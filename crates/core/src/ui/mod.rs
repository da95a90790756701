mod target;

pub use target::GestureTarget;
