#![forbid(unsafe_code)]

//! Scene configuration.
//!
//! [`SceneConfig`] can be loaded from TOML or JSON. Every field has a
//! default, so a partial file (or none at all) is valid:
//!
//! ```toml
//! transition_ms = 1500
//! initial_arrangement = "helix"
//! seed = 7
//!
//! [camera]
//! distance = 3500
//! ```
//!
//! ```rust,ignore
//! let config = SceneConfig::from_toml_file("tilemorph.toml")?;
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tilemorph_layout::Arrangement;

use crate::render_loop::MAX_FRAME_INTERVAL_MS;

// ---------------------------------------------------------------------------
// Top-level SceneConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Base duration handed to every arrangement switch. Each channel runs
    /// for a random duration in `[transition_ms, 2 * transition_ms)`.
    pub transition_ms: f64,

    /// Arrangement started as soon as the scene is built. `None` leaves the
    /// tiles at their scattered start positions.
    pub initial_arrangement: Option<Arrangement>,

    /// Initial tile positions are uniform in `[-scatter_extent, scatter_extent)`
    /// on each axis.
    pub scatter_extent: f64,

    /// Seed for all randomness. `None` seeds from the OS.
    pub seed: Option<u64>,

    /// Target frame interval for the real-time scheduler.
    pub frame_interval_ms: f64,

    pub camera: CameraConfig,

    pub viewport: ViewportConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            transition_ms: 2000.0,
            initial_arrangement: Some(Arrangement::Table),
            scatter_extent: 2000.0,
            seed: None,
            frame_interval_ms: 16.0,
            camera: CameraConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

/// Perspective camera and orbit limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    /// Starting distance from the origin along +Z.
    pub distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 40.0,
            near: 1.0,
            far: 10_000.0,
            distance: 3000.0,
            min_distance: 500.0,
            max_distance: 6000.0,
        }
    }
}

/// Output surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl SceneConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.checked()
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read(path.as_ref())?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.checked()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&read(path.as_ref())?)
    }

    /// Load by file extension: `.json` is JSON, anything else TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Every parameter violation. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.transition_ms.is_finite() && self.transition_ms >= 0.0) {
            errors.push(format!(
                "transition_ms must be finite and >= 0, got {}",
                self.transition_ms
            ));
        }
        if !(self.scatter_extent.is_finite() && self.scatter_extent >= 0.0) {
            errors.push(format!(
                "scatter_extent must be finite and >= 0, got {}",
                self.scatter_extent
            ));
        }
        if !(self.frame_interval_ms > 0.0 && self.frame_interval_ms <= MAX_FRAME_INTERVAL_MS) {
            errors.push(format!(
                "frame_interval_ms must be in (0, {MAX_FRAME_INTERVAL_MS}], got {}",
                self.frame_interval_ms
            ));
        }

        let cam = &self.camera;
        if !(cam.fov_deg > 0.0 && cam.fov_deg < 180.0) {
            errors.push(format!("camera.fov_deg must be in (0, 180), got {}", cam.fov_deg));
        }
        if !(cam.near > 0.0 && cam.near < cam.far) {
            errors.push(format!(
                "camera.near must be > 0 and < far ({}), got {}",
                cam.far, cam.near
            ));
        }
        if !(cam.min_distance > 0.0 && cam.min_distance <= cam.max_distance) {
            errors.push(format!(
                "camera.min_distance must be > 0 and <= max_distance ({}), got {}",
                cam.max_distance, cam.min_distance
            ));
        }
        if !(cam.distance >= cam.min_distance && cam.distance <= cam.max_distance) {
            errors.push(format!(
                "camera.distance must be within [{}, {}], got {}",
                cam.min_distance, cam.max_distance, cam.distance
            ));
        }

        if self.viewport.width == 0 || self.viewport.height == 0 {
            errors.push(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            ));
        }
        errors
    }

    /// `self` if valid, otherwise [`ConfigError::Validation`].
    pub fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {}", .0.join("; "))]
    Validation(Vec<String>),
}
