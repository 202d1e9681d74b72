#![forbid(unsafe_code)]

//! Live tiles and their poses.
//!
//! The registry is built once from the record count. Tiles keep their input
//! order for the lifetime of the scene; index `i` always refers to the same
//! tile and to entry `i` of every target set.
//!
//! Poses are read-only outside this crate. Only the transition controller's
//! tick (and the initial scatter at construction) writes them.

use rand::Rng;
use serde::Serialize;
use tilemorph_core::{Pose, Vec3};
use tilemorph_data::Record;

use crate::error::CollaboratorError;
use crate::renderer::Renderer;

/// Lower bound of the random tile background opacity.
pub const MIN_OPACITY: f64 = 0.25;
/// Width of the random tile background opacity range.
pub const OPACITY_SPAN: f64 = 0.5;

/// Renderer-assigned identifier of a visual element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileHandle(pub u64);

/// What a tile displays. Missing record fields are empty strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileContent {
    /// Position in input order, also shown on the tile.
    pub index: usize,
    pub label: String,
    pub image: String,
    pub title: String,
    pub detail: String,
    /// Background alpha in `[0.25, 0.75)`.
    pub opacity: f64,
}

impl TileContent {
    #[must_use]
    pub fn from_record(index: usize, record: &Record, opacity: f64) -> Self {
        Self {
            index,
            label: record.label().to_string(),
            image: record.image().to_string(),
            title: record.title().to_string(),
            detail: record.detail().to_string(),
            opacity,
        }
    }

    /// Content with no text, for scenes built from a bare count.
    #[must_use]
    pub fn blank(index: usize, opacity: f64) -> Self {
        Self {
            index,
            label: String::new(),
            image: String::new(),
            title: String::new(),
            detail: String::new(),
            opacity,
        }
    }
}

/// One live tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    handle: TileHandle,
    content: TileContent,
    pose: Pose,
}

impl Tile {
    #[inline]
    #[must_use]
    pub fn handle(&self) -> TileHandle {
        self.handle
    }

    #[inline]
    #[must_use]
    pub fn content(&self) -> &TileContent {
        &self.content
    }

    #[inline]
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }
}

/// Ordered, fixed-size set of live tiles.
#[derive(Debug, Clone, Default)]
pub struct TileRegistry {
    tiles: Vec<Tile>,
}

impl TileRegistry {
    /// Create one tile per content entry through `renderer`, each starting at
    /// a random position uniform in `[-extent, extent)` per axis with zero
    /// rotation.
    pub fn create<R, G>(
        contents: Vec<TileContent>,
        renderer: &mut R,
        rng: &mut G,
        extent: f64,
    ) -> Result<Self, CollaboratorError>
    where
        R: Renderer + ?Sized,
        G: Rng + ?Sized,
    {
        let mut tiles = Vec::with_capacity(contents.len());
        for content in contents {
            let handle = renderer.create_tile(&content)?;
            let position = Vec3::new(
                scatter(rng, extent),
                scatter(rng, extent),
                scatter(rng, extent),
            );
            tiles.push(Tile {
                handle,
                content,
                pose: Pose::at(position),
            });
        }
        tracing::debug!(target: "tilemorph.registry", tiles = tiles.len(), "tiles created");
        Ok(Self { tiles })
    }

    /// Build content for every record, drawing each background opacity from
    /// `rng`.
    pub fn contents_from_records<G: Rng + ?Sized>(
        records: &[Record],
        rng: &mut G,
    ) -> Vec<TileContent> {
        records
            .iter()
            .enumerate()
            .map(|(i, r)| TileContent::from_record(i, r, random_opacity(rng)))
            .collect()
    }

    /// Blank content for `count` tiles.
    pub fn blank_contents<G: Rng + ?Sized>(count: usize, rng: &mut G) -> Vec<TileContent> {
        (0..count)
            .map(|i| TileContent::blank(i, random_opacity(rng)))
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Snapshot of every pose, in tile order.
    #[must_use]
    pub fn poses(&self) -> Vec<Pose> {
        self.tiles.iter().map(|t| t.pose).collect()
    }

    pub(crate) fn set_position(&mut self, index: usize, position: Vec3) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.pose.position = position;
        }
    }

    pub(crate) fn set_rotation(&mut self, index: usize, rotation: Vec3) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.pose.rotation = rotation;
        }
    }
}

fn scatter<G: Rng + ?Sized>(rng: &mut G, extent: f64) -> f64 {
    rng.random::<f64>() * 2.0 * extent - extent
}

fn random_opacity<G: Rng + ?Sized>(rng: &mut G) -> f64 {
    rng.random::<f64>() * OPACITY_SPAN + MIN_OPACITY
}
