#![forbid(unsafe_code)]

//! The scene context.
//!
//! A [`Scene`] owns everything the frame loop and the selection handlers
//! touch: camera, camera controls, renderer, tile registry, precomputed
//! target sets, and the transition controller. It is built once by
//! [`SceneBuilder`] and passed by `&mut` to whoever drives it; nothing lives
//! in globals.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tilemorph_data::{Dataset, Record};
use tilemorph_layout::{Arrangement, TargetSet, TargetSets};

use crate::camera::{Camera, CameraControls};
use crate::config::SceneConfig;
use crate::error::{Result, SceneError};
use crate::registry::TileRegistry;
use crate::renderer::Renderer;
use crate::transition::{StartReport, TickReport, TransitionController};

/// Where the tile count comes from.
#[derive(Debug, Clone)]
enum TileSource {
    Records(Vec<Record>),
    Count(usize),
}

/// Builds a [`Scene`]. The tile count must be supplied, either through
/// records or explicitly.
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    config: SceneConfig,
    source: Option<TileSource>,
}

impl SceneBuilder {
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            source: None,
        }
    }

    /// One tile per record, in record order (builder pattern).
    #[must_use]
    pub fn records(mut self, records: Vec<Record>) -> Self {
        self.source = Some(TileSource::Records(records));
        self
    }

    /// One tile per dataset record (builder pattern).
    #[must_use]
    pub fn dataset(self, dataset: Dataset) -> Self {
        self.records(dataset.into_records())
    }

    /// `count` tiles with blank content (builder pattern).
    #[must_use]
    pub fn tile_count(mut self, count: usize) -> Self {
        self.source = Some(TileSource::Count(count));
        self
    }

    /// Create the tiles, compute every target set, and start the initial
    /// arrangement if one is configured.
    pub fn build<R, C>(self, mut renderer: R, controls: C) -> Result<Scene<R, C>>
    where
        R: Renderer,
        C: CameraControls,
    {
        let config = self.config.checked()?;
        let source = self.source.ok_or(SceneError::MissingTileCount)?;

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let contents = match &source {
            TileSource::Records(records) => TileRegistry::contents_from_records(records, &mut rng),
            TileSource::Count(count) => TileRegistry::blank_contents(*count, &mut rng),
        };
        let registry =
            TileRegistry::create(contents, &mut renderer, &mut rng, config.scatter_extent)
                .map_err(SceneError::Renderer)?;
        renderer
            .resize(config.viewport.width, config.viewport.height)
            .map_err(SceneError::Renderer)?;

        let targets = TargetSets::compute(registry.len());
        let transitions = TransitionController::new(SmallRng::from_rng(&mut rng));
        let camera = Camera::new(&config.camera, config.viewport);

        tracing::info!(
            target: "tilemorph.scene",
            tiles = registry.len(),
            seeded = config.seed.is_some(),
            "scene built"
        );

        let mut scene = Scene {
            config,
            camera,
            controls,
            renderer,
            registry,
            targets,
            transitions,
            redraw_requested: true,
        };
        if let Some(arrangement) = scene.config.initial_arrangement {
            scene.select(arrangement)?;
        }
        Ok(scene)
    }
}

/// Explicit context shared by the frame loop and selection handlers.
#[derive(Debug)]
pub struct Scene<R, C> {
    config: SceneConfig,
    camera: Camera,
    controls: C,
    renderer: R,
    registry: TileRegistry,
    targets: TargetSets,
    transitions: TransitionController,
    redraw_requested: bool,
}

impl<R: Renderer, C: CameraControls> Scene<R, C> {
    /// Switch to a named arrangement using the configured transition time.
    pub fn select(&mut self, arrangement: Arrangement) -> Result<StartReport> {
        let base_ms = self.config.transition_ms;
        let targets = self.targets.get(arrangement);
        Ok(self.transitions.start(&self.registry, targets, base_ms)?)
    }

    /// Morph towards an arbitrary target set.
    pub fn start(&mut self, targets: &TargetSet, base_ms: f64) -> Result<StartReport> {
        Ok(self.transitions.start(&self.registry, targets, base_ms)?)
    }

    /// Advance the transitions to frame time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> TickReport {
        self.transitions.tick(&mut self.registry, now_ms)
    }

    /// Let the camera controls apply pending input.
    pub fn update_camera(&mut self) -> Result<bool> {
        self.controls
            .update(&mut self.camera)
            .map_err(SceneError::Camera)
    }

    /// Draw the current poses.
    pub fn render(&mut self) -> Result<()> {
        self.redraw_requested = false;
        self.renderer
            .render_frame(self.registry.tiles(), &self.camera)
            .map_err(SceneError::Renderer)
    }

    /// The output surface changed size: update the camera aspect, tell the
    /// renderer, and force a redraw on the next frame.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.config.viewport.width = width;
        self.config.viewport.height = height;
        self.camera.set_viewport(width, height);
        self.renderer
            .resize(width, height)
            .map_err(SceneError::Renderer)?;
        self.redraw_requested = true;
        Ok(())
    }

    /// Ask for a redraw on the next frame regardless of motion.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }
}

impl<R, C> Scene<R, C> {
    #[must_use]
    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn controls(&self) -> &C {
        &self.controls
    }

    /// Controls, for feeding input.
    pub fn controls_mut(&mut self) -> &mut C {
        &mut self.controls
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    #[must_use]
    pub fn targets(&self) -> &TargetSets {
        &self.targets
    }

    #[must_use]
    pub fn transitions(&self) -> &TransitionController {
        &self.transitions
    }

    /// Controller, for registering the settled callback.
    pub fn transitions_mut(&mut self) -> &mut TransitionController {
        &mut self.transitions
    }
}
