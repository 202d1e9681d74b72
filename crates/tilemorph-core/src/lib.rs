#![forbid(unsafe_code)]

//! Core: geometry, poses, easing curves, and tweens.
//!
//! # Role in tilemorph
//! `tilemorph-core` holds the math every other crate shares. The layout
//! crate produces [`Pose`] values from it, and the runtime animates live
//! poses with [`Tween`] channels eased by [`easing`] curves.

pub mod easing;
pub mod geometry;
pub mod tween;

pub use easing::{EasingFn, ease_in_out_expo};
pub use geometry::{Lerp, Pose, Vec3, look_at};
pub use tween::Tween;
