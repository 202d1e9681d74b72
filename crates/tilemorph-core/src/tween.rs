#![forbid(unsafe_code)]

//! Single-value tween driven by absolute frame timestamps.
//!
//! A [`Tween`] interpolates from a captured start value to a target value over
//! a fixed duration using an [`EasingFn`]. Its clock starts lazily: the first
//! call to [`Tween::advance`] records the frame time as the start instant, so
//! a tween created between frames always begins at progress 0.
//!
//! # Invariants
//!
//! 1. `value()` is `from` until the first advance.
//! 2. Once `elapsed >= duration` the value is exactly `to` (no overshoot, no
//!    rounding residue) and the tween stays complete.
//! 3. Time running backwards never moves progress backwards past 0.
//!
//! # Failure Modes
//!
//! - Zero or negative duration: the tween completes on its first advance.
//! - Non-finite timestamps: treated as zero elapsed time.

use crate::easing::{EasingFn, linear};
use crate::geometry::Lerp;

/// Interpolates one value between two endpoints over time.
#[derive(Debug, Clone)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    current: T,
    duration_ms: f64,
    easing: EasingFn,
    started_at: Option<f64>,
    complete: bool,
}

impl<T: Lerp> Tween<T> {
    /// Create a linear tween from `from` to `to` over `duration_ms`.
    #[must_use]
    pub fn new(from: T, to: T, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            current: from,
            duration_ms,
            easing: linear,
            started_at: None,
            complete: false,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Advance to frame time `now_ms` and return the new value.
    ///
    /// The first call captures `now_ms` as the start instant.
    pub fn advance(&mut self, now_ms: f64) -> T {
        if self.complete {
            return self.current;
        }
        let start = *self.started_at.get_or_insert(now_ms);
        let elapsed = now_ms - start;
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };

        if elapsed >= self.duration_ms {
            self.current = self.to;
            self.complete = true;
        } else {
            let t = elapsed / self.duration_ms;
            self.current = self.from.lerp(self.to, (self.easing)(t));
        }
        self.current
    }

    /// Current interpolated value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> T {
        self.current
    }

    /// Start value captured at construction.
    #[inline]
    #[must_use]
    pub fn from(&self) -> T {
        self.from
    }

    /// Target value.
    #[inline]
    #[must_use]
    pub fn to(&self) -> T {
        self.to
    }

    #[inline]
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Frame time captured by the first advance, if any.
    #[inline]
    #[must_use]
    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    #[inline]
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::ease_in_out_expo;
    use crate::geometry::Vec3;

    #[test]
    fn value_is_from_before_first_advance() {
        let tween = Tween::new(1.0, 5.0, 100.0);
        assert_eq!(tween.value(), 1.0);
        assert!(!tween.is_started());
    }

    #[test]
    fn start_is_captured_lazily() {
        let mut tween = Tween::new(0.0, 10.0, 100.0);
        assert_eq!(tween.advance(5_000.0), 0.0);
        assert_eq!(tween.started_at(), Some(5_000.0));
        assert_eq!(tween.advance(5_050.0), 5.0);
    }

    #[test]
    fn completion_is_exact_and_sticky() {
        let from = Vec3::new(0.1, 0.2, 0.3);
        let to = Vec3::new(0.7, -0.3, 1e9);
        let mut tween = Tween::new(from, to, 40.0).easing(ease_in_out_expo);
        tween.advance(0.0);
        tween.advance(13.0);
        assert_eq!(tween.advance(40.0), to);
        assert!(tween.is_complete());
        assert_eq!(tween.advance(10.0), to);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut tween = Tween::new(3.0, 4.0, 0.0);
        assert_eq!(tween.advance(12.0), 4.0);
        assert!(tween.is_complete());
    }

    #[test]
    fn backwards_clock_clamps_to_start() {
        let mut tween = Tween::new(0.0, 1.0, 100.0);
        tween.advance(50.0);
        assert_eq!(tween.advance(10.0), 0.0);
        assert!(!tween.is_complete());
    }

    #[test]
    fn eased_progress_is_between_endpoints() {
        let mut tween = Tween::new(-100.0, 100.0, 1_000.0).easing(ease_in_out_expo);
        tween.advance(0.0);
        for ms in (0..1_000).step_by(37) {
            let v = tween.advance(f64::from(ms));
            assert!((-100.0..=100.0).contains(&v), "ms={ms} v={v}");
        }
    }
}
