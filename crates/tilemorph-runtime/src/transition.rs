#![forbid(unsafe_code)]

//! Transition controller: morphs every tile from its live pose to a target
//! set.
//!
//! Each tile gets two independent channels, position and rotation. Each
//! channel is a [`Tween`] with its own random duration in
//! `[base, 2 * base)` and the shared exponential ease-in-out curve. The
//! controller owns every channel in an explicit map keyed by
//! `(tile index, channel)`; there is no global tween registry.
//!
//! # Invariants
//!
//! 1. `start()` cancels every in-flight channel before creating new ones, and
//!    the new channels start from the live pose at that instant (never from
//!    the previous start or target).
//! 2. Within one `tick()` every channel is advanced with the same frame
//!    timestamp.
//! 3. A completed channel has written exactly its target value.
//! 4. The settled callback fires exactly once per `start()` whose channels
//!    all complete, on the tick that completes the last of them. A `start()`
//!    superseded before settling never fires.
//!
//! # Failure Modes
//!
//! - Target set length differs from the tile count: `LayoutMismatch`, and the
//!   running channels are left untouched.
//! - A stalled clock never completes anything; calling `start()` again is
//!   the recovery path.

use std::collections::BTreeMap;
use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tilemorph_core::{EasingFn, Tween, Vec3, ease_in_out_expo};
use tilemorph_layout::{Arrangement, TargetSet};

use crate::error::TransitionError;
use crate::registry::TileRegistry;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which part of a pose a transition animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Position,
    Rotation,
}

impl Channel {
    pub const ALL: [Self; 2] = [Self::Position, Self::Rotation];
}

/// Lifecycle of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStatus {
    /// Created; the first tick has not captured a start time yet.
    Pending,
    /// Interpolating.
    Running,
    /// Reached its target. Removed from the controller on the same tick.
    Completed,
    /// Discarded by a later `start()`.
    Cancelled,
}

/// One tile's one channel in flight.
#[derive(Debug, Clone)]
pub struct Transition {
    tile: usize,
    channel: Channel,
    tween: Tween<Vec3>,
    status: TransitionStatus,
}

impl Transition {
    #[inline]
    #[must_use]
    pub fn tile(&self) -> usize {
        self.tile
    }

    #[inline]
    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> TransitionStatus {
        self.status
    }

    /// Live value captured when the transition was created.
    #[inline]
    #[must_use]
    pub fn from(&self) -> Vec3 {
        self.tween.from()
    }

    #[inline]
    #[must_use]
    pub fn to(&self) -> Vec3 {
        self.tween.to()
    }

    /// Most recent interpolated value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Vec3 {
        self.tween.value()
    }

    #[inline]
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.tween.duration_ms()
    }

    /// Frame time captured by the first tick, if any.
    #[inline]
    #[must_use]
    pub fn started_at(&self) -> Option<f64> {
        self.tween.started_at()
    }
}

/// Delivered to the settled callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleEvent {
    /// Sequence number of the `start()` that settled (1-based).
    pub generation: u64,
    pub arrangement: Arrangement,
    /// Frame time of the tick that completed the last channel.
    pub at_ms: f64,
}

/// Summary of a `start()` call.
#[derive(Debug, Clone)]
pub struct StartReport {
    pub generation: u64,
    pub arrangement: Arrangement,
    /// Channels created (two per tile).
    pub channels: usize,
    /// Channels that were still in flight and got discarded, marked
    /// [`TransitionStatus::Cancelled`].
    pub cancelled: Vec<Transition>,
}

/// Summary of one `tick()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// Channels whose value was written this tick.
    pub advanced: usize,
    /// Channels that reached their target this tick.
    pub completed: usize,
    /// Whether any channel is still in flight after this tick.
    pub active: bool,
    /// Set on the tick that settled the current `start()`.
    pub settled: Option<SettleEvent>,
}

impl TickReport {
    /// Whether this tick changed any live pose.
    #[inline]
    #[must_use]
    pub fn moved(&self) -> bool {
        self.advanced > 0
    }
}

type SettleCallback = Box<dyn FnMut(&SettleEvent)>;

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns and advances every in-flight channel.
pub struct TransitionController {
    rng: SmallRng,
    easing: EasingFn,
    active: BTreeMap<(usize, Channel), Transition>,
    generation: u64,
    arrangement: Option<Arrangement>,
    settle_pending: bool,
    on_settled: Option<SettleCallback>,
}

impl fmt::Debug for TransitionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionController")
            .field("active", &self.active.len())
            .field("generation", &self.generation)
            .field("arrangement", &self.arrangement)
            .field("settle_pending", &self.settle_pending)
            .field("has_callback", &self.on_settled.is_some())
            .finish_non_exhaustive()
    }
}

impl TransitionController {
    /// Controller drawing durations from `rng`.
    #[must_use]
    pub fn new(rng: SmallRng) -> Self {
        Self {
            rng,
            easing: ease_in_out_expo,
            active: BTreeMap::new(),
            generation: 0,
            arrangement: None,
            settle_pending: false,
            on_settled: None,
        }
    }

    /// Controller with a deterministic duration sequence.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Replace the shared easing curve (builder pattern).
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Register the settled callback, replacing any previous one.
    pub fn on_settled(&mut self, callback: impl FnMut(&SettleEvent) + 'static) {
        self.on_settled = Some(Box::new(callback));
    }

    /// Morph every tile towards `targets`, cancelling whatever is in flight.
    pub fn start(
        &mut self,
        registry: &TileRegistry,
        targets: &TargetSet,
        base_ms: f64,
    ) -> Result<StartReport, TransitionError> {
        if targets.len() != registry.len() {
            return Err(TransitionError::LayoutMismatch {
                arrangement: targets.arrangement(),
                expected: registry.len(),
                actual: targets.len(),
            });
        }
        if !(base_ms.is_finite() && base_ms >= 0.0) {
            return Err(TransitionError::InvalidDuration(base_ms));
        }

        let cancelled: Vec<Transition> = std::mem::take(&mut self.active)
            .into_values()
            .map(|mut t| {
                t.status = TransitionStatus::Cancelled;
                t
            })
            .collect();

        for (index, (tile, target)) in registry.tiles().iter().zip(targets).enumerate() {
            let live = tile.pose();
            for (channel, from, to) in [
                (Channel::Position, live.position, target.position),
                (Channel::Rotation, live.rotation, target.rotation),
            ] {
                let duration = base_ms + self.rng.random::<f64>() * base_ms;
                let tween = Tween::new(from, to, duration).easing(self.easing);
                self.active.insert(
                    (index, channel),
                    Transition {
                        tile: index,
                        channel,
                        tween,
                        status: TransitionStatus::Pending,
                    },
                );
            }
        }

        self.generation += 1;
        self.arrangement = Some(targets.arrangement());
        self.settle_pending = true;

        tracing::info!(
            target: "tilemorph.transition",
            generation = self.generation,
            arrangement = %targets.arrangement(),
            tiles = registry.len(),
            cancelled = cancelled.len(),
            base_ms,
            "transition started"
        );

        Ok(StartReport {
            generation: self.generation,
            arrangement: targets.arrangement(),
            channels: self.active.len(),
            cancelled,
        })
    }

    /// Advance every channel to frame time `now_ms` and write the results
    /// into the live poses.
    pub fn tick(&mut self, registry: &mut TileRegistry, now_ms: f64) -> TickReport {
        let mut report = TickReport::default();

        for transition in self.active.values_mut() {
            let value = transition.tween.advance(now_ms);
            match transition.channel {
                Channel::Position => registry.set_position(transition.tile, value),
                Channel::Rotation => registry.set_rotation(transition.tile, value),
            }
            report.advanced += 1;
            if transition.tween.is_complete() {
                transition.status = TransitionStatus::Completed;
                report.completed += 1;
            } else {
                transition.status = TransitionStatus::Running;
            }
        }

        self.active
            .retain(|_, t| t.status != TransitionStatus::Completed);
        report.active = !self.active.is_empty();

        if self.settle_pending && !report.active {
            self.settle_pending = false;
            if let Some(arrangement) = self.arrangement {
                let event = SettleEvent {
                    generation: self.generation,
                    arrangement,
                    at_ms: now_ms,
                };
                tracing::info!(
                    target: "tilemorph.transition",
                    generation = event.generation,
                    arrangement = %arrangement,
                    at_ms = now_ms,
                    "transition settled"
                );
                if let Some(callback) = self.on_settled.as_mut() {
                    callback(&event);
                }
                report.settled = Some(event);
            }
        }

        report
    }

    /// Whether any channel is in flight.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Number of channels in flight.
    #[inline]
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// The in-flight channel for `tile`, if any.
    #[must_use]
    pub fn transition(&self, tile: usize, channel: Channel) -> Option<&Transition> {
        self.active.get(&(tile, channel))
    }

    /// Every in-flight channel, ordered by tile then channel.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.active.values()
    }

    /// Number of `start()` calls so far.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Arrangement of the most recent `start()`.
    #[inline]
    #[must_use]
    pub fn arrangement(&self) -> Option<Arrangement> {
        self.arrangement
    }
}
