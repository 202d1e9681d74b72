#![forbid(unsafe_code)]

//! Precomputed target poses for a fixed tile count.

use std::ops::Index;

use tilemorph_core::Pose;

use crate::arrangement::Arrangement;
use crate::generators;

/// Destination poses for one arrangement, indexed 1:1 with tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSet {
    arrangement: Arrangement,
    poses: Vec<Pose>,
}

impl TargetSet {
    /// Generate the poses of `arrangement` for `count` tiles.
    #[must_use]
    pub fn generate(arrangement: Arrangement, count: usize) -> Self {
        let poses = (0..count)
            .map(|i| match arrangement {
                Arrangement::Table => generators::table(i),
                Arrangement::Sphere => generators::sphere(i, count),
                Arrangement::Helix => generators::helix(i, count),
                Arrangement::Grid => generators::grid(i),
            })
            .collect();
        Self { arrangement, poses }
    }

    /// Wrap explicit poses, e.g. a custom arrangement built by the caller.
    #[must_use]
    pub fn from_poses(arrangement: Arrangement, poses: Vec<Pose>) -> Self {
        Self { arrangement, poses }
    }

    #[inline]
    #[must_use]
    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Pose> {
        self.poses.get(index)
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Pose] {
        &self.poses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pose> {
        self.poses.iter()
    }
}

impl Index<usize> for TargetSet {
    type Output = Pose;

    fn index(&self, index: usize) -> &Pose {
        &self.poses[index]
    }
}

impl<'a> IntoIterator for &'a TargetSet {
    type Item = &'a Pose;
    type IntoIter = std::slice::Iter<'a, Pose>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.iter()
    }
}

/// The four target sets for one tile count, computed once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSets {
    count: usize,
    table: TargetSet,
    sphere: TargetSet,
    helix: TargetSet,
    grid: TargetSet,
}

impl TargetSets {
    /// Eagerly compute every arrangement for `count` tiles.
    #[must_use]
    pub fn compute(count: usize) -> Self {
        Self {
            count,
            table: TargetSet::generate(Arrangement::Table, count),
            sphere: TargetSet::generate(Arrangement::Sphere, count),
            helix: TargetSet::generate(Arrangement::Helix, count),
            grid: TargetSet::generate(Arrangement::Grid, count),
        }
    }

    /// Tile count the sets were computed for.
    #[inline]
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn get(&self, arrangement: Arrangement) -> &TargetSet {
        match arrangement {
            Arrangement::Table => &self.table,
            Arrangement::Sphere => &self.sphere,
            Arrangement::Helix => &self.helix,
            Arrangement::Grid => &self.grid,
        }
    }
}

impl Index<Arrangement> for TargetSets {
    type Output = TargetSet;

    fn index(&self, arrangement: Arrangement) -> &TargetSet {
        self.get(arrangement)
    }
}
