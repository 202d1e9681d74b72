#![forbid(unsafe_code)]

//! Per-frame driver.
//!
//! Each frame, in order: advance the transitions with the frame timestamp,
//! let the camera controls apply input, then draw if anything changed.
//! Frame timestamps come from a [`FrameScheduler`]: [`FixedStepScheduler`]
//! for headless and deterministic runs, [`RealtimeScheduler`] for a
//! wall-clock loop that sleeps between frames.
//!
//! # Invariants
//!
//! 1. The first frame of a loop is always drawn.
//! 2. Later frames are drawn only when a transition moved a pose, a
//!    transition settled, the camera changed, or a redraw was requested
//!    (for example after a resize). An idle scene costs no render calls.
//! 3. Timestamps handed to the scene never decrease.
//!
//! # Failure Modes
//!
//! - Renderer or camera controls error: the frame aborts and the error is
//!   returned; `run` stops.
//! - The stop flag of a [`RealtimeScheduler`] is set: `next_frame` returns
//!   `None` and `run` returns normally.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use web_time::{Duration, Instant};

use crate::camera::CameraControls;
use crate::error::Result;
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::transition::SettleEvent;

// ---------------------------------------------------------------------------
// Schedulers
// ---------------------------------------------------------------------------

/// Longest real-time frame interval. Larger intervals are capped to it.
pub const MAX_FRAME_INTERVAL_MS: f64 = 60_000.0;

/// Source of frame timestamps in milliseconds.
pub trait FrameScheduler {
    /// Block until the next frame is due and return its timestamp, or `None`
    /// when the loop should end.
    fn next_frame(&mut self) -> Option<f64>;
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Box<S> {
    fn next_frame(&mut self) -> Option<f64> {
        (**self).next_frame()
    }
}

/// Deterministic timestamps `start, start + step, ...` without sleeping.
#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    next_ms: f64,
    step_ms: f64,
    remaining: Option<u64>,
}

impl FixedStepScheduler {
    /// Unbounded scheduler. Negative or non-finite steps are treated as 0.
    #[must_use]
    pub fn new(start_ms: f64, step_ms: f64) -> Self {
        let step_ms = if step_ms.is_finite() && step_ms > 0.0 {
            step_ms
        } else {
            0.0
        };
        Self {
            next_ms: start_ms,
            step_ms,
            remaining: None,
        }
    }

    /// Stop after `frames` timestamps (builder pattern).
    #[must_use]
    pub fn frames(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }
}

impl FrameScheduler for FixedStepScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let now = self.next_ms;
        self.next_ms += self.step_ms;
        Some(now)
    }
}

/// Wall-clock scheduler that sleeps until each frame is due.
///
/// Timestamps are milliseconds since the scheduler was created. A frame that
/// runs late is not made up; the next one is scheduled one interval after it.
#[derive(Debug)]
pub struct RealtimeScheduler {
    origin: Instant,
    interval: Duration,
    next_due: Instant,
    stop: Arc<AtomicBool>,
    remaining: Option<u64>,
}

impl RealtimeScheduler {
    /// Scheduler with frames `interval_ms` apart. Non-positive or NaN
    /// intervals mean no pacing; intervals above [`MAX_FRAME_INTERVAL_MS`]
    /// are capped.
    #[must_use]
    pub fn new(interval_ms: f64) -> Self {
        let interval = if interval_ms > 0.0 {
            Duration::try_from_secs_f64(interval_ms.min(MAX_FRAME_INTERVAL_MS) / 1000.0)
                .unwrap_or(Duration::ZERO)
        } else {
            Duration::ZERO
        };
        let origin = Instant::now();
        Self {
            origin,
            interval,
            next_due: origin,
            stop: Arc::new(AtomicBool::new(false)),
            remaining: None,
        }
    }

    /// Stop after `frames` frames (builder pattern).
    #[must_use]
    pub fn frames(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }

    /// Shared flag; setting it to `true` ends the loop at the next frame.
    /// Suitable for `signal_hook::flag::register`.
    #[must_use]
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameScheduler for RealtimeScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        if self.stop.load(Ordering::SeqCst) {
            return None;
        }
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }

        let now = Instant::now();
        if self.next_due > now {
            thread::sleep(self.next_due - now);
        }
        if self.stop.load(Ordering::SeqCst) {
            return None;
        }
        let now = Instant::now();
        self.next_due = now.checked_add(self.interval).unwrap_or(now);
        Some(now.duration_since(self.origin).as_secs_f64() * 1000.0)
    }
}

// ---------------------------------------------------------------------------
// Loop
// ---------------------------------------------------------------------------

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    /// 1-based frame number within this loop.
    pub frame: u64,
    pub now_ms: f64,
    /// Transitions are still in flight after this frame.
    pub animating: bool,
    pub camera_changed: bool,
    pub redrawn: bool,
    /// Set on the frame whose tick completed the last channel.
    pub settled: Option<SettleEvent>,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub frames: u64,
    pub redraws: u64,
}

/// Drives a [`Scene`] frame by frame.
#[derive(Debug, Clone, Default)]
pub struct RenderLoop {
    frame: u64,
    redraws: u64,
    last_ms: Option<f64>,
}

impl RenderLoop {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames run so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Run one frame at `now_ms`.
    pub fn frame<R, C>(&mut self, scene: &mut Scene<R, C>, now_ms: f64) -> Result<FrameOutcome>
    where
        R: Renderer,
        C: CameraControls,
    {
        // A timestamp older than the previous frame is clamped forward.
        let now_ms = match self.last_ms {
            Some(last) if !(now_ms >= last) => last,
            _ => now_ms,
        };
        self.last_ms = Some(now_ms);
        self.frame += 1;

        let tick = scene.tick(now_ms);
        let camera_changed = scene.update_camera()?;
        let first = self.frame == 1;
        let redraw = first
            || tick.moved()
            || tick.settled.is_some()
            || camera_changed
            || scene.redraw_requested();

        if redraw {
            scene.render()?;
            self.redraws += 1;
        }

        tracing::trace!(
            target: "tilemorph.loop",
            frame = self.frame,
            now_ms,
            advanced = tick.advanced,
            camera_changed,
            redraw,
            "frame"
        );

        Ok(FrameOutcome {
            frame: self.frame,
            now_ms,
            animating: tick.active,
            camera_changed,
            redrawn: redraw,
            settled: tick.settled,
        })
    }

    /// Run until the scheduler ends or a collaborator fails.
    pub fn run<R, C, S>(&mut self, scene: &mut Scene<R, C>, scheduler: &mut S) -> Result<RunSummary>
    where
        R: Renderer,
        C: CameraControls,
        S: FrameScheduler + ?Sized,
    {
        self.run_with(scene, scheduler, |_, _| Ok(()))
    }

    /// Like [`run`](Self::run), calling `after_frame` once per frame. The hook
    /// may select a new arrangement, resize, or feed camera input.
    pub fn run_with<R, C, S, F>(
        &mut self,
        scene: &mut Scene<R, C>,
        scheduler: &mut S,
        mut after_frame: F,
    ) -> Result<RunSummary>
    where
        R: Renderer,
        C: CameraControls,
        S: FrameScheduler + ?Sized,
        F: FnMut(&mut Scene<R, C>, &FrameOutcome) -> Result<()>,
    {
        let frames_before = self.frame;
        let redraws_before = self.redraws;

        while let Some(now_ms) = scheduler.next_frame() {
            let outcome = match self.frame(scene, now_ms) {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::warn!(
                        target: "tilemorph.loop",
                        frame = self.frame,
                        error = %err,
                        "frame failed; stopping"
                    );
                    return Err(err);
                }
            };
            after_frame(scene, &outcome)?;
        }

        let summary = RunSummary {
            frames: self.frame - frames_before,
            redraws: self.redraws - redraws_before,
        };
        tracing::debug!(
            target: "tilemorph.loop",
            frames = summary.frames,
            redraws = summary.redraws,
            "loop finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_counts_frames() {
        let mut s = FixedStepScheduler::new(0.0, 16.0).frames(3);
        assert_eq!(s.next_frame(), Some(0.0));
        assert_eq!(s.next_frame(), Some(16.0));
        assert_eq!(s.next_frame(), Some(32.0));
        assert_eq!(s.next_frame(), None);
    }

    #[test]
    fn fixed_step_rejects_negative_step() {
        let mut s = FixedStepScheduler::new(5.0, -1.0).frames(2);
        assert_eq!(s.next_frame(), Some(5.0));
        assert_eq!(s.next_frame(), Some(5.0));
    }

    #[test]
    fn realtime_stops_on_flag() {
        let mut s = RealtimeScheduler::new(1.0);
        let t0 = s.next_frame().unwrap();
        let t1 = s.next_frame().unwrap();
        assert!(t1 >= t0);
        s.stop_flag().store(true, Ordering::SeqCst);
        assert_eq!(s.next_frame(), None);
    }

    #[test]
    fn realtime_interval_is_capped() {
        let mut s = RealtimeScheduler::new(1e300);
        assert_eq!(
            s.interval(),
            Duration::from_secs_f64(MAX_FRAME_INTERVAL_MS / 1000.0)
        );
        // The first frame is due immediately; stopping afterwards must not
        // wait out the interval.
        assert!(s.next_frame().is_some());
        s.stop_flag().store(true, Ordering::SeqCst);
        assert_eq!(s.next_frame(), None);

        assert_eq!(RealtimeScheduler::new(f64::INFINITY).interval(), s.interval());
        assert_eq!(RealtimeScheduler::new(f64::NAN).interval(), Duration::ZERO);
    }

    #[test]
    fn realtime_frame_limit() {
        let mut s = RealtimeScheduler::new(0.5).frames(1);
        assert!(s.next_frame().is_some());
        assert!(s.next_frame().is_none());
    }
}
