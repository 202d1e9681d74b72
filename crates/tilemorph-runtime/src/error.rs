use thiserror::Error;
use tilemorph_layout::Arrangement;

use crate::config::ConfigError;

/// Error raised by an external collaborator (renderer, camera controls).
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, SceneError>;

/// Errors from starting a transition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransitionError {
    #[error("target set {arrangement} has {actual} poses but {expected} tiles are live")]
    LayoutMismatch {
        arrangement: Arrangement,
        expected: usize,
        actual: usize,
    },

    #[error("base duration must be finite and non-negative, got {0} ms")]
    InvalidDuration(f64),
}

/// Errors from building or driving a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("tile count is unknown: supply records or an explicit count before building the scene")]
    MissingTileCount,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("renderer failed: {0}")]
    Renderer(#[source] CollaboratorError),

    #[error("camera controls failed: {0}")]
    Camera(#[source] CollaboratorError),
}
