//! Frame scheduler
//!
//! Owns every animated object in a scene and updates them once per frame.
//! Objects are registered with the scheduler and addressed by typed ids;
//! whether an object actually moves on a tick is decided by its own state
//! (a paused clock or an idle pendulum ignores updates).
//!
//! ```rust
//! use swing_animation::{AnimationScheduler, Pendulum, PendulumConfig};
//!
//! let mut scheduler = AnimationScheduler::new();
//! let id = scheduler.add_pendulum(Pendulum::new(PendulumConfig::default()).unwrap());
//! scheduler.pendulum_mut(id).unwrap().start_bouncing(0.0);
//!
//! for _ in 0..60 {
//!     scheduler.tick_with(1.0 / 60.0);
//! }
//! assert!(scheduler.pendulum(id).unwrap().angle() < std::f64::consts::FRAC_PI_6);
//! ```

use crate::clip::{Rotate, RotatePlayback};
use crate::clock::Clock;
use crate::pendulum::Pendulum;
use slotmap::{new_key_type, SlotMap};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

new_key_type! {
    /// Handle to a registered clock
    pub struct ClockId;
    /// Handle to a registered pendulum
    pub struct PendulumId;
    /// Handle to a playing clip
    pub struct ClipId;
}

/// Longest wall-clock step `tick()` will feed to the simulation
pub const DEFAULT_MAX_DT: Duration = Duration::from_millis(250);

/// A clip bound to the clock whose hand it turns
#[derive(Clone, Debug)]
struct ActiveClip {
    target: ClockId,
    playback: RotatePlayback,
}

/// Drives all registered clocks, pendulums and clips
pub struct AnimationScheduler {
    clocks: SlotMap<ClockId, Clock>,
    pendulums: SlotMap<PendulumId, Pendulum>,
    clips: SlotMap<ClipId, ActiveClip>,
    last_frame: Instant,
    max_dt: Duration,
    frame_index: u64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            clocks: SlotMap::with_key(),
            pendulums: SlotMap::with_key(),
            clips: SlotMap::with_key(),
            last_frame: Instant::now(),
            max_dt: DEFAULT_MAX_DT,
            frame_index: 0,
        }
    }

    /// Cap for the wall-clock delta used by [`tick`](Self::tick)
    pub fn set_max_dt(&mut self, max_dt: Duration) {
        self.max_dt = max_dt;
    }

    /// Forget the time spent since the last frame
    ///
    /// Call after a stall (window hidden, debugger) to avoid one huge step.
    pub fn reset_clock(&mut self) {
        self.last_frame = Instant::now();
    }

    /// Tick using the wall-clock time since the previous tick
    ///
    /// Returns true if anything is still animating.
    pub fn tick(&mut self) -> bool {
        let now = Instant::now();
        let mut dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        if dt > self.max_dt {
            debug!(?dt, max = ?self.max_dt, "clamping frame delta");
            dt = self.max_dt;
        }
        self.tick_with(dt.as_secs_f64())
    }

    /// Tick every object with an explicit `dt` in seconds
    ///
    /// Returns true if anything is still animating.
    pub fn tick_with(&mut self, dt: f64) -> bool {
        let dt = if dt < 0.0 || !dt.is_finite() {
            warn!(dt, "ignoring invalid frame delta");
            0.0
        } else {
            dt
        };
        self.frame_index += 1;

        for (_, clock) in self.clocks.iter_mut() {
            clock.update(dt);
        }

        for (_, pendulum) in self.pendulums.iter_mut() {
            pendulum.update(dt);
        }

        let clocks = &mut self.clocks;
        self.clips.retain(|id, clip| {
            let Some(clock) = clocks.get_mut(clip.target) else {
                debug!(?id, "dropping clip for removed clock");
                return false;
            };
            clock.rotate_hand(clip.playback.advance(dt));
            if clip.playback.is_finished() {
                debug!(?id, time = clock.time(), "clip finished");
                false
            } else {
                true
            }
        });

        self.has_active_animations()
    }

    /// Whether any clock is running, pendulum bouncing or clip playing
    pub fn has_active_animations(&self) -> bool {
        self.clocks.iter().any(|(_, c)| c.is_running())
            || self.pendulums.iter().any(|(_, p)| p.is_bouncing())
            || !self.clips.is_empty()
    }

    /// Number of ticks processed so far
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    // =========================================================================
    // Clocks
    // =========================================================================

    pub fn add_clock(&mut self, clock: Clock) -> ClockId {
        self.clocks.insert(clock)
    }

    pub fn clock(&self, id: ClockId) -> Option<&Clock> {
        self.clocks.get(id)
    }

    pub fn clock_mut(&mut self, id: ClockId) -> Option<&mut Clock> {
        self.clocks.get_mut(id)
    }

    /// Remove a clock along with any clips playing on it
    pub fn remove_clock(&mut self, id: ClockId) -> Option<Clock> {
        self.clips.retain(|_, clip| clip.target != id);
        self.clocks.remove(id)
    }

    pub fn clocks(&self) -> impl Iterator<Item = (ClockId, &Clock)> {
        self.clocks.iter()
    }

    pub fn clock_count(&self) -> usize {
        self.clocks.len()
    }

    // =========================================================================
    // Pendulums
    // =========================================================================

    pub fn add_pendulum(&mut self, pendulum: Pendulum) -> PendulumId {
        self.pendulums.insert(pendulum)
    }

    pub fn pendulum(&self, id: PendulumId) -> Option<&Pendulum> {
        self.pendulums.get(id)
    }

    pub fn pendulum_mut(&mut self, id: PendulumId) -> Option<&mut Pendulum> {
        self.pendulums.get_mut(id)
    }

    pub fn remove_pendulum(&mut self, id: PendulumId) -> Option<Pendulum> {
        self.pendulums.remove(id)
    }

    pub fn pendulums(&self) -> impl Iterator<Item = (PendulumId, &Pendulum)> {
        self.pendulums.iter()
    }

    pub fn pendulum_count(&self) -> usize {
        self.pendulums.len()
    }

    // =========================================================================
    // Clips
    // =========================================================================

    /// Play `clip` on the hand of `target`; `None` if the clock is gone
    pub fn play(&mut self, target: ClockId, clip: Rotate) -> Option<ClipId> {
        if !self.clocks.contains_key(target) {
            return None;
        }
        let id = self.clips.insert(ActiveClip {
            target,
            playback: clip.playback(),
        });
        debug!(?id, angle = clip.angle, run_time = clip.run_time, "clip started");
        Some(id)
    }

    pub fn is_clip_playing(&self, id: ClipId) -> bool {
        self.clips.contains_key(id)
    }

    /// Stop a clip where it is; the rotation applied so far stays
    pub fn cancel_clip(&mut self, id: ClipId) -> bool {
        self.clips.remove(id).is_some()
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
