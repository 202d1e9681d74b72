#![forbid(unsafe_code)]

//! Rendering collaborator.
//!
//! The runtime never projects or paints anything itself. A [`Renderer`]
//! creates one visual element per tile and draws the live poses when the
//! frame loop asks for a redraw. [`RecordingRenderer`] is a headless
//! implementation that keeps frame snapshots, used by tests and the CLI.

use serde::Serialize;
use tilemorph_core::{Pose, Vec3};

use crate::camera::Camera;
use crate::error::CollaboratorError;
use crate::registry::{Tile, TileContent, TileHandle};

/// Draws tiles.
pub trait Renderer {
    /// Create the visual element for one tile.
    fn create_tile(&mut self, content: &TileContent) -> Result<TileHandle, CollaboratorError>;

    /// Draw every tile at its current pose from `camera`.
    fn render_frame(&mut self, tiles: &[Tile], camera: &Camera) -> Result<(), CollaboratorError>;

    /// The output surface changed size.
    fn resize(&mut self, _width: u32, _height: u32) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn create_tile(&mut self, content: &TileContent) -> Result<TileHandle, CollaboratorError> {
        (**self).create_tile(content)
    }

    fn render_frame(&mut self, tiles: &[Tile], camera: &Camera) -> Result<(), CollaboratorError> {
        (**self).render_frame(tiles, camera)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), CollaboratorError> {
        (**self).resize(width, height)
    }
}

/// One drawn frame as seen by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    /// 1-based count of frames drawn so far.
    pub frame: u64,
    pub camera_position: Vec3,
    pub poses: Vec<Pose>,
}

/// Headless renderer that records what it was asked to draw.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    next_handle: u64,
    frames: u64,
    last: Option<FrameSnapshot>,
    history: Option<Vec<FrameSnapshot>>,
    size: Option<(u32, u32)>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep every frame, not only the last one (builder pattern).
    #[must_use]
    pub fn with_history(mut self) -> Self {
        self.history = Some(Vec::new());
        self
    }

    /// Number of tiles created.
    #[must_use]
    pub fn created(&self) -> u64 {
        self.next_handle
    }

    /// Number of frames drawn.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&FrameSnapshot> {
        self.last.as_ref()
    }

    /// Every recorded frame; empty unless built [`with_history`](Self::with_history).
    #[must_use]
    pub fn history(&self) -> &[FrameSnapshot] {
        self.history.as_deref().unwrap_or(&[])
    }

    /// Last size passed to [`Renderer::resize`].
    #[must_use]
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }
}

impl Renderer for RecordingRenderer {
    fn create_tile(&mut self, _content: &TileContent) -> Result<TileHandle, CollaboratorError> {
        let handle = TileHandle(self.next_handle);
        self.next_handle += 1;
        Ok(handle)
    }

    fn render_frame(&mut self, tiles: &[Tile], camera: &Camera) -> Result<(), CollaboratorError> {
        self.frames += 1;
        let snapshot = FrameSnapshot {
            frame: self.frames,
            camera_position: camera.position(),
            poses: tiles.iter().map(Tile::pose).collect(),
        };
        if let Some(history) = self.history.as_mut() {
            history.push(snapshot.clone());
        }
        self.last = Some(snapshot);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), CollaboratorError> {
        self.size = Some((width, height));
        Ok(())
    }
}
