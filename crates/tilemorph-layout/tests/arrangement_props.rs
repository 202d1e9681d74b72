//! Property tests for the arrangement generators.
//!
//! ## Invariants
//!
//! 1. Every target set has exactly `n` poses.
//! 2. Generation is deterministic (bit-identical across calls).
//! 3. Sphere positions lie on the 800 shell and contain no NaN.
//! 4. Helix strands pair up with a pi angular offset at equal height.
//! 5. Table and grid rotations are identity.

use std::f64::consts::PI;

use proptest::prelude::*;
use tilemorph_core::Vec3;
use tilemorph_layout::generators::{self, HELIX_RADIUS, SPHERE_RADIUS, helix_strand_len};
use tilemorph_layout::{Arrangement, TargetSet, TargetSets};

fn bits(v: Vec3) -> [u64; 3] {
    [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()]
}

/// Angle about the Y axis, measured from +Z towards +X.
fn azimuth(v: Vec3) -> f64 {
    v.x.atan2(v.z)
}

fn angle_diff_mod_tau(a: f64, b: f64) -> f64 {
    (a - b).rem_euclid(2.0 * PI)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sets_have_exactly_n_poses(n in 1usize..600) {
        let sets = TargetSets::compute(n);
        prop_assert_eq!(sets.tile_count(), n);
        for a in Arrangement::ALL {
            prop_assert_eq!(sets[a].len(), n);
        }
    }

    #[test]
    fn generation_is_bit_identical(n in 1usize..400) {
        for a in Arrangement::ALL {
            let first = TargetSet::generate(a, n);
            let second = TargetSet::generate(a, n);
            for (p, q) in first.iter().zip(second.iter()) {
                prop_assert_eq!(bits(p.position), bits(q.position));
                prop_assert_eq!(bits(p.rotation), bits(q.rotation));
            }
        }
    }

    #[test]
    fn sphere_points_lie_on_shell(n in 1usize..800) {
        for i in 0..n {
            let pose = generators::sphere(i, n);
            prop_assert!(pose.position.is_finite() && pose.rotation.is_finite());
            let r = pose.position.length();
            prop_assert!((r - SPHERE_RADIUS).abs() < 1e-6, "i={i} n={n} r={r}");
        }
    }

    #[test]
    fn helix_strands_are_offset_by_pi(n in 2usize..500) {
        let half = helix_strand_len(n);
        for i in 0..half {
            let a = generators::helix(i, n).position;
            let b = generators::helix(i + half, n).position;
            prop_assert_eq!(a.y, b.y);
            let diff = angle_diff_mod_tau(azimuth(b), azimuth(a));
            prop_assert!((diff - PI).abs() < 1e-9, "i={i} n={n} diff={diff}");
            prop_assert!((a.x.hypot(a.z) - HELIX_RADIUS).abs() < 1e-6);
        }
    }

    #[test]
    fn flat_arrangements_have_identity_rotation(i in 0usize..10_000) {
        prop_assert_eq!(generators::table(i).rotation, Vec3::ZERO);
        prop_assert_eq!(generators::grid(i).rotation, Vec3::ZERO);
    }
}

#[test]
fn table_single_tile_regression() {
    let sets = TargetSets::compute(1);
    assert_eq!(
        sets[Arrangement::Table][0].position,
        Vec3::new(-1690.0, 1090.0, 0.0)
    );
}

#[test]
fn table_centre_ignores_actual_row_count() {
    // 400 tiles span 20 rows, but the vertical centre still assumes 10.
    let sets = TargetSets::compute(400);
    assert_eq!(sets[Arrangement::Table][0].position.y, 1090.0);
    assert_eq!(sets[Arrangement::Table][399].position.y, 1090.0 - 19.0 * 220.0);
}

#[test]
fn grid_three_tiles_scenario() {
    let sets = TargetSets::compute(3);
    let grid = &sets[Arrangement::Grid];
    assert_eq!(grid[0].position, Vec3::new(-800.0, 800.0, -4500.0));
    assert_eq!(grid[1].position, Vec3::new(-400.0, 800.0, -4500.0));
    assert_eq!(grid[2].position, Vec3::new(0.0, 800.0, -4500.0));
}

#[test]
fn sphere_tiles_face_outward() {
    let n = 64;
    for i in 0..n {
        let pose = generators::sphere(i, n);
        // Local +Z rotated by the pose's XYZ Euler angles.
        let (sx, cx) = pose.rotation.x.sin_cos();
        let (sy, cy) = pose.rotation.y.sin_cos();
        let forward = Vec3::new(sy, -sx * cy, cx * cy);
        let outward = pose.position.normalize();
        assert!(
            forward.max_abs_diff(outward) < 1e-6,
            "i={i} forward={forward:?} outward={outward:?}"
        );
    }
}
