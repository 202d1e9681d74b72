#![forbid(unsafe_code)]

//! Camera state and the controls that move it.
//!
//! Input handling lives with the host. The host feeds orbit and zoom deltas
//! into [`OrbitControls`]; the frame loop calls [`CameraControls::update`]
//! once per frame and redraws when it reports a change.
//!
//! # Invariants
//!
//! 1. The orbit distance stays within `[min_distance, max_distance]`.
//! 2. The polar angle stays strictly inside `(0, pi)` so the view never
//!    flips over the pole.
//! 3. `update` reports `true` only if the camera position actually moved.

use std::f64::consts::PI;

use tilemorph_core::Vec3;

use crate::config::{CameraConfig, ViewportConfig};
use crate::error::CollaboratorError;

/// Keeps the polar angle off the poles.
const POLE_MARGIN: f64 = 1e-6;

/// Perspective camera looking at a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    fov_deg: f64,
    aspect: f64,
    near: f64,
    far: f64,
}

impl Camera {
    /// Camera on +Z at `config.distance`, looking at the origin.
    #[must_use]
    pub fn new(config: &CameraConfig, viewport: ViewportConfig) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, config.distance),
            target: Vec3::ZERO,
            fov_deg: config.fov_deg,
            aspect: aspect(viewport.width, viewport.height),
            near: config.near,
            far: config.far,
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn fov_deg(&self) -> f64 {
        self.fov_deg
    }

    #[inline]
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    #[inline]
    #[must_use]
    pub fn near(&self) -> f64 {
        self.near
    }

    #[inline]
    #[must_use]
    pub fn far(&self) -> f64 {
        self.far
    }

    /// Distance from the camera to its target.
    #[must_use]
    pub fn distance(&self) -> f64 {
        (self.position - self.target).length()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = aspect(width, height);
    }
}

fn aspect(width: u32, height: u32) -> f64 {
    if height == 0 {
        1.0
    } else {
        f64::from(width) / f64::from(height)
    }
}

/// Advances camera state once per frame.
pub trait CameraControls {
    /// Apply pending input to `camera`. Returns whether the camera changed.
    fn update(&mut self, camera: &mut Camera) -> Result<bool, CollaboratorError>;
}

impl<C: CameraControls + ?Sized> CameraControls for Box<C> {
    fn update(&mut self, camera: &mut Camera) -> Result<bool, CollaboratorError> {
        (**self).update(camera)
    }
}

/// Controls that never move the camera.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCamera;

impl CameraControls for FixedCamera {
    fn update(&mut self, _camera: &mut Camera) -> Result<bool, CollaboratorError> {
        Ok(false)
    }
}

/// Orbit-and-zoom controls around the camera target.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    min_distance: f64,
    max_distance: f64,
    pending_azimuth: f64,
    pending_polar: f64,
    pending_zoom: f64,
}

impl OrbitControls {
    /// Controls bounded by the config's distance limits. Inverted limits are
    /// swapped; non-finite or non-positive limits fall back to the defaults.
    #[must_use]
    pub fn new(config: &CameraConfig) -> Self {
        let (min_distance, max_distance) =
            distance_limits(config.min_distance, config.max_distance);
        Self {
            min_distance,
            max_distance,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 1.0,
        }
    }

    /// Queue an orbit by `azimuth` (around Y) and `polar` (towards the poles)
    /// radians.
    pub fn orbit(&mut self, azimuth: f64, polar: f64) {
        self.pending_azimuth += azimuth;
        self.pending_polar += polar;
    }

    /// Queue a zoom. Factors below 1 move closer.
    pub fn zoom(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.pending_zoom *= factor;
        }
    }

    #[must_use]
    pub fn has_pending_input(&self) -> bool {
        self.pending_azimuth != 0.0 || self.pending_polar != 0.0 || self.pending_zoom != 1.0
    }

    /// Effective `(min, max)` orbit distance.
    #[inline]
    #[must_use]
    pub fn distance_limits(&self) -> (f64, f64) {
        (self.min_distance, self.max_distance)
    }
}

fn distance_limits(min: f64, max: f64) -> (f64, f64) {
    let usable = |d: f64| d.is_finite() && d > 0.0;
    let defaults = CameraConfig::default();
    let min = if usable(min) { min } else { defaults.min_distance };
    let max = if usable(max) { max } else { defaults.max_distance };
    (min.min(max), min.max(max))
}

impl CameraControls for OrbitControls {
    fn update(&mut self, camera: &mut Camera) -> Result<bool, CollaboratorError> {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        let polar = if radius == 0.0 {
            PI / 2.0
        } else {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        };
        let azimuth = offset.x.atan2(offset.z);

        let polar = (polar + self.pending_polar).clamp(POLE_MARGIN, PI - POLE_MARGIN);
        let azimuth = azimuth + self.pending_azimuth;
        let radius = (radius * self.pending_zoom)
            .max(self.min_distance)
            .min(self.max_distance);

        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_zoom = 1.0;

        let position = camera.target + Vec3::from_spherical(radius, polar, azimuth);
        let changed = position.max_abs_diff(camera.position) > 1e-9;
        if changed {
            camera.set_position(position);
        }
        Ok(changed)
    }
}
