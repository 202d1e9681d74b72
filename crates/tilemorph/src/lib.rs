#![forbid(unsafe_code)]

//! tilemorph public facade.
//!
//! Re-exports the types needed to load records, build a scene, switch
//! arrangements, and drive the frame loop, plus the headless CLI used by the
//! `tilemorph` binary.

pub mod cli;
pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use tilemorph_core::{EasingFn, Lerp, Pose, Tween, Vec3, ease_in_out_expo, easing, look_at};

// --- Layout re-exports -----------------------------------------------------

pub use tilemorph_layout::{Arrangement, ParseArrangementError, TargetSet, TargetSets, generators};

// --- Data re-exports -------------------------------------------------------

pub use tilemorph_data::{
    CsvFile, CsvText, DataError, DataSource, Dataset, HttpCsv, Record, open, sheet_csv_url,
};

// --- Runtime re-exports ----------------------------------------------------

pub use tilemorph_runtime::{
    Camera, CameraConfig, CameraControls, Channel, CollaboratorError, ConfigError, FixedCamera,
    FixedStepScheduler, FrameOutcome, FrameScheduler, FrameSnapshot, OrbitControls,
    RealtimeScheduler, RecordingRenderer, RenderLoop, Renderer, RunSummary, Scene, SceneBuilder,
    SceneConfig, SceneError, SettleEvent, StartReport, TickReport, Tile, TileContent, TileHandle,
    TileRegistry, Transition, TransitionController, TransitionError, TransitionStatus,
    ViewportConfig,
};

pub use cli::run_from_env;
pub use error::{CliError, Result};

/// Common imports for driving a scene.
pub mod prelude {
    pub use crate::{
        Arrangement, CameraControls, DataSource, FixedStepScheduler, FrameScheduler, Pose,
        RenderLoop, Renderer, Scene, SceneBuilder, SceneConfig, Vec3,
    };
}
