#![forbid(unsafe_code)]

//! Easing curves.
//!
//! Every curve maps `[0.0, 1.0]` onto `[0.0, 1.0]` with `f(0) = 0` and
//! `f(1) = 1`, and is monotonically non-decreasing. Inputs outside the unit
//! interval are clamped first.

/// An easing curve.
pub type EasingFn = fn(f64) -> f64;

/// Identity curve.
#[inline]
#[must_use]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in.
#[inline]
#[must_use]
pub fn ease_in(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out.
#[inline]
#[must_use]
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Cubic ease-in-out.
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Exponential ease-in-out: very slow start, fast middle, very slow end.
///
/// Uses base-2 exponentials scaled so each half spans `2^-10` of the range,
/// with exact endpoints.
#[must_use]
pub fn ease_in_out_expo(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 {
        return 0.0;
    }
    if t == 1.0 {
        return 1.0;
    }
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * 1024f64.powf(t - 1.0)
    } else {
        0.5 * (2.0 - 2f64.powf(-10.0 * (t - 1.0)))
    }
}
