//! Core types and traits shared by the touchsynth crates.
//!
//! Geometry lives in [`types`], the sink side of gesture replay in
//! [`platform`] and the target side in [`ui`].

pub mod platform;
pub mod types;
pub mod ui;
