#![forbid(unsafe_code)]

//! Geometric primitives: vectors, poses, and orientation helpers.
//!
//! Coordinates are right-handed with +Y up. Rotations are Euler angles in
//! radians applied in XYZ order.

use std::ops::{Add, Mul, Neg, Sub};

/// Threshold on `|m13|` above which the XYZ Euler decomposition is treated
/// as gimbal-locked.
const GIMBAL_LIMIT: f64 = 0.999_999_9;

/// Nudge applied to a look direction that is parallel to the up vector.
const PARALLEL_NUDGE: f64 = 0.0001;

/// A 3-component vector of `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// World up (+Y).
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point on a sphere of radius `radius`.
    ///
    /// `phi` is the polar angle measured from +Y, `theta` the azimuth
    /// measured from +Z towards +X.
    #[must_use]
    pub fn from_spherical(radius: f64, phi: f64, theta: f64) -> Self {
        let ring = phi.sin() * radius;
        Self::new(ring * theta.sin(), phi.cos() * radius, ring * theta.cos())
    }

    /// Point on a cylinder of radius `radius` around the Y axis.
    #[must_use]
    pub fn from_cylindrical(radius: f64, theta: f64, y: f64) -> Self {
        Self::new(radius * theta.sin(), y, radius * theta.cos())
    }

    #[inline]
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction. The zero vector is returned as-is.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 { self } else { self * (1.0 / len) }
    }

    /// Whether every component is finite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Largest absolute per-component difference to `other`.
    #[must_use]
    pub fn max_abs_diff(self, other: Self) -> f64 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Placement of a tile: position plus XYZ Euler rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Pose {
    #[inline]
    pub const fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    /// A pose at `position` with identity rotation.
    #[inline]
    pub const fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO)
    }

    /// A pose at `position` whose local +Z axis points at `target`.
    #[must_use]
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self::new(position, look_at(position, target))
    }
}

/// Euler rotation (XYZ order) that turns an object at `position` so that its
/// local +Z axis points at `target`, keeping +Y as up.
///
/// A target coincident with `position` looks along +Z; a direction parallel
/// to up is nudged off-axis so the basis stays well defined.
#[must_use]
pub fn look_at(position: Vec3, target: Vec3) -> Vec3 {
    let mut forward = target - position;
    if forward.length_squared() == 0.0 {
        forward.z = 1.0;
    }
    forward = forward.normalize();

    let mut right = Vec3::UP.cross(forward);
    if right.length_squared() == 0.0 {
        if Vec3::UP.z.abs() == 1.0 {
            forward.x += PARALLEL_NUDGE;
        } else {
            forward.z += PARALLEL_NUDGE;
        }
        forward = forward.normalize();
        right = Vec3::UP.cross(forward);
    }
    right = right.normalize();
    let up = forward.cross(right);

    euler_from_basis(right, up, forward)
}

/// Decompose the rotation matrix with columns `(x, y, z)` into XYZ Euler
/// angles.
fn euler_from_basis(x: Vec3, y: Vec3, z: Vec3) -> Vec3 {
    let (m11, m12, m13) = (x.x, y.x, z.x);
    let (m22, m23) = (y.y, z.y);
    let (m32, m33) = (y.z, z.z);

    let ry = m13.clamp(-1.0, 1.0).asin();
    if m13.abs() < GIMBAL_LIMIT {
        Vec3::new((-m23).atan2(m33), ry, (-m12).atan2(m11))
    } else {
        Vec3::new(m32.atan2(m22), ry, 0.0)
    }
}

/// Linear interpolation between two values of the same type.
pub trait Lerp: Copy {
    /// Value at fraction `t` between `self` (t = 0) and `other` (t = 1).
    fn lerp(self, other: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    #[inline]
    fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x.lerp(other.x, t),
            self.y.lerp(other.y, t),
            self.z.lerp(other.z, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.max_abs_diff(b) < EPS
    }

    #[test]
    fn spherical_poles_and_equator() {
        let south = Vec3::from_spherical(800.0, PI, 0.0);
        assert!(close(south, Vec3::new(0.0, -800.0, 0.0)), "{south:?}");

        let front = Vec3::from_spherical(1.0, FRAC_PI_2, 0.0);
        assert!(close(front, Vec3::new(0.0, 0.0, 1.0)), "{front:?}");

        let side = Vec3::from_spherical(1.0, FRAC_PI_2, FRAC_PI_2);
        assert!(close(side, Vec3::new(1.0, 0.0, 0.0)), "{side:?}");
    }

    #[test]
    fn cylindrical_keeps_height() {
        let p = Vec3::from_cylindrical(900.0, PI, 1600.0);
        assert!((p.y - 1600.0).abs() < EPS);
        assert!((p.x.hypot(p.z) - 900.0).abs() < 1e-6);
        assert!((p.z + 900.0).abs() < 1e-6);
    }

    #[test]
    fn cross_is_right_handed() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::UP;
        assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn look_at_forward_is_identity() {
        let r = look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));
        assert!(close(r, Vec3::ZERO), "{r:?}");
    }

    #[test]
    fn look_at_right_turns_about_y() {
        let r = look_at(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0));
        assert!(close(r, Vec3::new(0.0, FRAC_PI_2, 0.0)), "{r:?}");
    }

    #[test]
    fn look_at_coincident_target_is_finite() {
        let p = Vec3::new(3.0, 4.0, 5.0);
        let r = look_at(p, p);
        assert!(r.is_finite());
        assert!(close(r, Vec3::ZERO), "{r:?}");
    }

    #[test]
    fn look_at_straight_down_is_finite() {
        let p = Vec3::new(0.0, -800.0, 0.0);
        let r = look_at(p, p * 2.0);
        assert!(r.is_finite(), "{r:?}");
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 8.0, 0.5);
        assert_eq!(a.lerp(b, 0.0), a);
        assert!(close(a.lerp(b, 1.0), b));
        assert!(close(a.lerp(b, 0.5), Vec3::new(-1.5, 5.0, 1.75)));
    }
}
