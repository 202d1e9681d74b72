#![forbid(unsafe_code)]

//! Per-index pose generators.
//!
//! Each function maps a tile index `i` (and, where the shape depends on it,
//! the tile count `n`) to a target [`Pose`]. They are pure: identical inputs
//! always yield bit-identical output.
//!
//! # Shapes
//!
//! | Arrangement | Position | Rotation |
//! |-------------|----------|----------|
//! | table  | 20-column card wall centred on a 20 x 10 reference block | identity |
//! | sphere | spherical Fibonacci point on radius 800 | faces away from origin |
//! | helix  | two strands on radius 900, offset by pi | faces away from Y axis |
//! | grid   | 5 x 4 block, layers stepping 500 in depth | identity |
//!
//! # Invariants
//!
//! 1. The table centring offset always uses 10 rows, whatever `n` is.
//! 2. Every sphere position lies exactly on the 800 radius shell (up to
//!    rounding), including `n = 1`.
//! 3. Helix strand A holds the first `floor(n / 2)` tiles; tile `i` of strand
//!    A and tile `i + floor(n / 2)` of strand B share a height and differ in
//!    angle by exactly pi.

use std::f64::consts::PI;

use tilemorph_core::{Pose, Vec3};

/// Columns in the table arrangement.
pub const TABLE_COLUMNS: usize = 20;
/// Reference row count used to centre the table vertically.
pub const TABLE_REFERENCE_ROWS: usize = 10;
/// Card width in world units.
pub const CARD_WIDTH: f64 = 150.0;
/// Card height in world units.
pub const CARD_HEIGHT: f64 = 200.0;
/// Gap between neighbouring cards.
pub const CARD_GAP: f64 = 20.0;

/// Sphere radius.
pub const SPHERE_RADIUS: f64 = 800.0;

/// Helix radius.
pub const HELIX_RADIUS: f64 = 900.0;
/// Angle advanced per tile along a strand, in radians.
pub const HELIX_ANGLE_STEP: f64 = 0.175;
/// Height change per tile along a strand.
pub const HELIX_Y_STEP: f64 = -32.0;
/// Height of the first tile of each strand.
pub const HELIX_Y_START: f64 = 1600.0;

/// Columns in one grid layer.
pub const GRID_COLUMNS: usize = 5;
/// Rows in one grid layer.
pub const GRID_ROWS: usize = 4;
/// Horizontal and vertical cell pitch.
pub const GRID_PITCH: f64 = 400.0;
/// Depth pitch between layers.
pub const GRID_LAYER_PITCH: f64 = 500.0;

const TABLE_OFFSET_X: f64 =
    (TABLE_COLUMNS as f64 * CARD_WIDTH + (TABLE_COLUMNS - 1) as f64 * CARD_GAP) / 2.0;
const TABLE_OFFSET_Y: f64 =
    (TABLE_REFERENCE_ROWS as f64 * CARD_HEIGHT + (TABLE_REFERENCE_ROWS - 1) as f64 * CARD_GAP)
        / 2.0;

const GRID_OFFSET_X: f64 = 800.0;
const GRID_OFFSET_Y: f64 = 800.0;
const GRID_OFFSET_Z: f64 = 4500.0;

/// Card-wall pose for tile `i`.
#[must_use]
pub fn table(i: usize) -> Pose {
    let column = (i % TABLE_COLUMNS) as f64;
    let row = (i / TABLE_COLUMNS) as f64;
    Pose::at(Vec3::new(
        column * (CARD_GAP + CARD_WIDTH) - TABLE_OFFSET_X,
        -(row * (CARD_GAP + CARD_HEIGHT)) + TABLE_OFFSET_Y,
        0.0,
    ))
}

/// Spherical-Fibonacci pose for tile `i` of `n`, facing outward.
#[must_use]
pub fn sphere(i: usize, n: usize) -> Pose {
    let n = n.max(1) as f64;
    let phi = (-1.0 + (2.0 * i as f64) / n).clamp(-1.0, 1.0).acos();
    let theta = (n * PI).sqrt() * phi;
    let position = Vec3::from_spherical(SPHERE_RADIUS, phi, theta);
    Pose::looking_at(position, position * 2.0)
}

/// Number of tiles on the first helix strand.
#[inline]
#[must_use]
pub fn helix_strand_len(n: usize) -> usize {
    n / 2
}

/// Double-helix pose for tile `i` of `n`, facing away from the Y axis.
#[must_use]
pub fn helix(i: usize, n: usize) -> Pose {
    let half = helix_strand_len(n);
    let (step, offset) = if i < half { (i, PI) } else { (i - half, 2.0 * PI) };
    let step = step as f64;

    let theta = step * HELIX_ANGLE_STEP + offset;
    let y = step * HELIX_Y_STEP + HELIX_Y_START;
    let position = Vec3::from_cylindrical(HELIX_RADIUS, theta, y);
    let target = Vec3::new(position.x * 2.0, position.y, position.z * 2.0);
    Pose::looking_at(position, target)
}

/// Block-grid pose for tile `i`.
#[must_use]
pub fn grid(i: usize) -> Pose {
    let column = (i % GRID_COLUMNS) as f64;
    let row = ((i / GRID_COLUMNS) % GRID_ROWS) as f64;
    let layer = (i / (GRID_COLUMNS * GRID_ROWS)) as f64;
    Pose::at(Vec3::new(
        column * GRID_PITCH - GRID_OFFSET_X,
        -(row * GRID_PITCH) + GRID_OFFSET_Y,
        layer * GRID_LAYER_PITCH - GRID_OFFSET_Z,
    ))
}
