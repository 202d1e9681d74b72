#![forbid(unsafe_code)]

//! Arrangement generators for tilemorph.
//!
//! # Role in tilemorph
//! `tilemorph-layout` turns a tile count into destination poses. Generators
//! in [`generators`] are pure per-index functions; [`TargetSets`] runs all
//! four of them once at startup so the runtime can switch arrangements
//! without recomputing anything.
//!
//! ```
//! use tilemorph_layout::{Arrangement, TargetSets};
//!
//! let sets = TargetSets::compute(3);
//! let grid = &sets[Arrangement::Grid];
//! assert_eq!(grid[2].position.x, 0.0);
//! ```

pub mod arrangement;
pub mod generators;
pub mod target_set;

pub use arrangement::{Arrangement, ParseArrangementError};
pub use target_set::{TargetSet, TargetSets};
