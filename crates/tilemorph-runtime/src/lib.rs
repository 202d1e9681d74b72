#![forbid(unsafe_code)]

//! Runtime for tilemorph: live tiles, transitions, and the frame loop.
//!
//! # Role in tilemorph
//! `tilemorph-runtime` owns the mutable side of a scene. [`SceneBuilder`]
//! creates one tile per record through a [`Renderer`], scatters them, and
//! precomputes every arrangement. [`Scene::select`] morphs the live poses
//! towards an arrangement through the [`TransitionController`], and
//! [`RenderLoop`] ticks it once per frame, redrawing only while something
//! moves.
//!
//! ```
//! use tilemorph_layout::Arrangement;
//! use tilemorph_runtime::{
//!     FixedCamera, FixedStepScheduler, RecordingRenderer, RenderLoop, SceneBuilder, SceneConfig,
//! };
//!
//! let config = SceneConfig { seed: Some(7), ..SceneConfig::default() };
//! let mut scene = SceneBuilder::new(config)
//!     .tile_count(3)
//!     .build(RecordingRenderer::new(), FixedCamera)
//!     .unwrap();
//! scene.select(Arrangement::Grid).unwrap();
//!
//! let mut frames = FixedStepScheduler::new(0.0, 100.0).frames(50);
//! RenderLoop::new().run(&mut scene, &mut frames).unwrap();
//! assert_eq!(scene.registry().poses(), scene.targets()[Arrangement::Grid].as_slice());
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod registry;
pub mod render_loop;
pub mod renderer;
pub mod scene;
pub mod transition;

pub use camera::{Camera, CameraControls, FixedCamera, OrbitControls};
pub use config::{CameraConfig, ConfigError, SceneConfig, ViewportConfig};
pub use error::{CollaboratorError, Result, SceneError, TransitionError};
pub use registry::{Tile, TileContent, TileHandle, TileRegistry};
pub use render_loop::{
    FixedStepScheduler, FrameOutcome, FrameScheduler, MAX_FRAME_INTERVAL_MS, RealtimeScheduler,
    RenderLoop, RunSummary,
};
pub use renderer::{FrameSnapshot, RecordingRenderer, Renderer};
pub use scene::{Scene, SceneBuilder};
pub use transition::{
    Channel, SettleEvent, StartReport, TickReport, Transition, TransitionController,
    TransitionStatus,
};
