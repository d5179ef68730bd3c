//! Declarative animation clips
//!
//! A [`Rotate`] describes "rotate something by an angle about a point over
//! some time" without doing it. [`RotatePlayback`] turns the description
//! into per-frame incremental rotations that sum to exactly the requested
//! angle.

use crate::easing::Easing;
use swing_core::Point;

/// Default clip duration, seconds
pub const DEFAULT_RUN_TIME: f64 = 1.0;

/// Eased rotation about a fixed point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotate {
    /// Total signed rotation, radians (counterclockwise positive)
    pub angle: f64,
    pub about_point: Point,
    /// Duration in seconds
    pub run_time: f64,
    pub easing: Easing,
}

impl Rotate {
    pub fn new(angle: f64, about_point: Point) -> Self {
        Self {
            angle,
            about_point,
            run_time: DEFAULT_RUN_TIME,
            easing: Easing::default(),
        }
    }

    pub fn run_time(mut self, seconds: f64) -> Self {
        self.run_time = seconds;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Start playing this clip
    pub fn playback(self) -> RotatePlayback {
        RotatePlayback {
            clip: self,
            elapsed: 0.0,
            applied: 0.0,
        }
    }
}

/// Progress through a [`Rotate`] clip
#[derive(Clone, Copy, Debug)]
pub struct RotatePlayback {
    clip: Rotate,
    elapsed: f64,
    /// Rotation already handed out
    applied: f64,
}

impl RotatePlayback {
    pub fn clip(&self) -> &Rotate {
        &self.clip
    }

    /// Normalized time in 0..=1
    pub fn progress(&self) -> f64 {
        if self.clip.run_time > 0.0 {
            (self.elapsed / self.clip.run_time).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` seconds and return the rotation to apply this frame
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.elapsed += dt.max(0.0);
        let target = if self.is_finished() {
            self.clip.angle
        } else {
            self.clip.angle * self.clip.easing.apply(self.progress())
        };
        let delta = target - self.applied;
        self.applied = target;
        delta
    }
}
