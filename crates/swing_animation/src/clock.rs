//! Clock face with a rotating hand
//!
//! [`TimeKeeper`] owns the hand's raw angle and advances it at a constant
//! angular velocity while running. [`Clock`] composes a keeper with the
//! face geometry (rim, twelve ticks, hand) and keeps the hand line in step
//! with the keeper.
//!
//! "Time" here is the hand's clockwise angle from 12 o'clock:
//! `time = π/2 − hand_angle`. The raw angle is never wrapped, so several
//! revolutions accumulate instead of folding back into one turn.

use crate::clip::Rotate;
use crate::config::ClockConfig;
use crate::error::Result;
use smallvec::SmallVec;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use swing_core::{Axis, Circle, Line, Point, Segment, Shape, Style, Vec2, ORIGIN, UP};
use tracing::debug;

/// Number of hour ticks on the face
pub const TICK_COUNT: usize = 12;

/// Hand length as a fraction of the distance to the inner end of the 12 o'clock tick
const HAND_LENGTH_FACTOR: f64 = 0.8;

/// Convert revolutions to radians
pub fn time_to_angle(time: f64) -> f64 {
    TAU * time
}

/// Convert radians to revolutions
pub fn angle_to_time(angle: f64) -> f64 {
    angle / TAU
}

/// Whether the keeper advances on update
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Paused,
    /// Revolutions per second, clockwise positive
    Running { angular_velocity: f64 },
}

/// Hand angle state of a clock
#[derive(Clone, Debug, PartialEq)]
pub struct TimeKeeper {
    /// Raw counterclockwise angle from +x, unbounded
    hand_angle: f64,
    motion: Motion,
}

impl TimeKeeper {
    /// Raw angle of a hand pointing at 12 o'clock
    pub const TWELVE_O_CLOCK: f64 = FRAC_PI_2;

    pub fn new() -> Self {
        Self {
            hand_angle: Self::TWELVE_O_CLOCK,
            motion: Motion::Paused,
        }
    }

    /// Begin (or keep) advancing at `angular_velocity` revolutions per second
    pub fn start(&mut self, angular_velocity: f64) {
        self.motion = Motion::Running { angular_velocity };
    }

    pub fn pause(&mut self) {
        self.motion = Motion::Paused;
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn is_running(&self) -> bool {
        matches!(self.motion, Motion::Running { .. })
    }

    /// Current rate; zero while paused
    pub fn angular_velocity(&self) -> f64 {
        match self.motion {
            Motion::Paused => 0.0,
            Motion::Running { angular_velocity } => angular_velocity,
        }
    }

    pub fn hand_angle(&self) -> f64 {
        self.hand_angle
    }

    pub fn time(&self) -> f64 {
        FRAC_PI_2 - self.hand_angle
    }

    /// Apply a raw rotation, counterclockwise positive
    pub fn rotate(&mut self, angle: f64) {
        self.hand_angle += angle;
    }

    /// Jump to `time`; returns the rotation that was applied
    pub fn set_time(&mut self, time: f64) -> f64 {
        let delta = self.time() - time;
        self.rotate(delta);
        delta
    }

    /// Advance by `dt` seconds; returns the rotation that was applied
    pub fn update(&mut self, dt: f64) -> f64 {
        match self.motion {
            Motion::Paused => 0.0,
            Motion::Running { angular_velocity } => {
                let delta = -TAU * angular_velocity * dt;
                self.rotate(delta);
                delta
            }
        }
    }
}

impl Default for TimeKeeper {
    fn default() -> Self {
        Self::new()
    }
}

/// An analog clock face
#[derive(Clone, Debug)]
pub struct Clock {
    config: ClockConfig,
    face: Circle,
    ticks: SmallVec<[Line; TICK_COUNT]>,
    hand: Line,
    keeper: TimeKeeper,
}

impl Clock {
    pub fn new(config: ClockConfig) -> Result<Self> {
        config.validate()?;

        let radius = config.radius;
        let stroke = Style::stroke(config.color, config.stroke_width);
        let face = Circle::new(radius).with_style(stroke);

        let unit_tick = Line::new(ORIGIN, UP).with_style(stroke);
        let ticks: SmallVec<[Line; TICK_COUNT]> = (0..TICK_COUNT)
            .map(|k| {
                let mut tick = unit_tick.clone();
                let mut size = radius * config.tick_size_radius_ratio;
                if k % 3 == 0 {
                    size *= config.bigger_ticks_factor;
                }
                tick.stretch_about_point(size, Axis::Y, unit_tick.start());
                tick.rotate(k as f64 * (PI / 6.0), unit_tick.start());
                let outward = (radius - tick.length()) * tick.unit_vector();
                tick.shift(outward);
                tick
            })
            .collect();

        let hand = Line::new(ORIGIN, HAND_LENGTH_FACTOR * ticks[0].start())
            .with_style(Style::stroke(config.color, config.hand_stroke_width));

        Ok(Self {
            config,
            face,
            ticks,
            hand,
            keeper: TimeKeeper::new(),
        })
    }

    /// Start the hand turning at `angular_velocity` revolutions per second
    ///
    /// Calling again while running replaces the rate.
    pub fn start(&mut self, angular_velocity: f64) -> &mut Self {
        debug!(angular_velocity, "clock started");
        self.keeper.start(angular_velocity);
        self
    }

    /// Freeze the hand; no-op when already paused
    pub fn pause(&mut self) -> &mut Self {
        if self.keeper.is_running() {
            debug!(time = self.time(), "clock paused");
            self.keeper.pause();
        }
        self
    }

    pub fn is_running(&self) -> bool {
        self.keeper.is_running()
    }

    pub fn angular_velocity(&self) -> f64 {
        self.keeper.angular_velocity()
    }

    /// Per-frame update with `dt` seconds elapsed
    pub fn update(&mut self, dt: f64) {
        let delta = self.keeper.update(dt);
        if delta != 0.0 {
            let center = self.center();
            self.hand.rotate(delta, center);
        }
    }

    /// Clockwise angle of the hand from 12 o'clock
    pub fn time(&self) -> f64 {
        self.keeper.time()
    }

    pub fn hand_angle(&self) -> f64 {
        self.keeper.hand_angle()
    }

    pub fn time_to_angle(&self, time: f64) -> f64 {
        time_to_angle(time)
    }

    pub fn angle_to_time(&self, angle: f64) -> f64 {
        angle_to_time(angle)
    }

    /// Jump the hand to `time` immediately
    pub fn set_time(&mut self, time: f64) -> &mut Self {
        let delta = self.keeper.set_time(time);
        let center = self.center();
        self.hand.rotate(delta, center);
        self
    }

    /// Describe an eased move of the hand to `time` without applying it
    pub fn set_time_for_animations(&self, time: f64) -> Rotate {
        Rotate::new(self.time() - time, self.center())
    }

    /// Rotate the hand about the face center, keeping the keeper in sync
    pub fn rotate_hand(&mut self, angle: f64) {
        self.keeper.rotate(angle);
        let center = self.center();
        self.hand.rotate(angle, center);
    }

    /// Center of the face
    pub fn center(&self) -> Point {
        self.face.center()
    }

    /// Move the whole clock by `by`
    pub fn shift(&mut self, by: Vec2) -> &mut Self {
        self.face.shift(by);
        self.hand.shift(by);
        for tick in &mut self.ticks {
            tick.shift(by);
        }
        self
    }

    /// Move the whole clock so the face is centered on `point`
    pub fn move_to(&mut self, point: Point) -> &mut Self {
        let by = point - self.center();
        self.shift(by)
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn face(&self) -> &Circle {
        &self.face
    }

    pub fn ticks(&self) -> &[Line] {
        &self.ticks
    }

    pub fn hand(&self) -> &Line {
        &self.hand
    }

    pub fn keeper(&self) -> &TimeKeeper {
        &self.keeper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn clock() -> Clock {
        Clock::new(ClockConfig::default()).unwrap()
    }

    #[test]
    fn test_face_layout() {
        let clock = clock();
        let r = clock.config().radius;
        assert_eq!(clock.ticks().len(), TICK_COUNT);

        for (k, tick) in clock.ticks().iter().enumerate() {
            // Every tick ends on the rim
            assert!((tick.end().length() - r).abs() < EPS, "tick {k}");
            let expected = if k % 3 == 0 { r / 4.0 } else { r / 8.0 };
            assert!((tick.length() - expected).abs() < EPS, "tick {k}");
        }

        // Tick k sits k·30° counterclockwise from 12 o'clock
        let three = clock.ticks()[3].unit_vector();
        assert!((three - Vec2::new(-1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_hand_points_to_twelve() {
        let clock = clock();
        let hand = clock.hand();
        assert_eq!(hand.start(), ORIGIN);
        assert!((hand.end() - Vec2::new(0.0, 0.6 * 0.7)).length() < EPS);
        assert!(clock.time().abs() < EPS);
    }

    #[test]
    fn test_running_turns_clockwise() {
        let mut clock = clock();
        clock.start(0.25);
        for _ in 0..60 {
            clock.update(1.0 / 60.0);
        }
        // A quarter revolution: pointing at 3 o'clock
        assert!((clock.time() - FRAC_PI_2).abs() < EPS);
        assert!((clock.hand().unit_vector() - Vec2::new(1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_paused_clock_ignores_updates() {
        let mut clock = clock();
        clock.update(1.0);
        assert!(clock.time().abs() < EPS);
        assert_eq!(clock.angular_velocity(), 0.0);
    }

    #[test]
    fn test_pause_resume_preserves_angle() {
        let mut clock = clock();
        clock.start(1.0);
        clock.update(0.1);
        let before = clock.hand_angle();

        clock.pause();
        assert_eq!(clock.hand_angle(), before);
        clock.pause();
        clock.start(1.0);
        assert_eq!(clock.hand_angle(), before);
    }

    #[test]
    fn test_restart_replaces_rate() {
        let mut clock = clock();
        clock.start(1.0).start(2.0);
        assert_eq!(clock.angular_velocity(), 2.0);
    }

    #[test]
    fn test_set_time_round_trip() {
        let mut clock = clock();
        clock.start(0.3);
        clock.update(0.7);
        for t in [0.0, 1.0, -2.5, 4.0 * PI, 100.0] {
            clock.set_time(t);
            assert!((clock.time() - t).abs() < EPS, "time {t}");
        }
    }

    #[test]
    fn test_set_time_moves_hand_geometry() {
        let mut clock = clock();
        clock.set_time(PI);
        // Half a turn: pointing at 6 o'clock
        assert!((clock.hand().unit_vector() - Vec2::new(0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn test_angle_time_inverse() {
        let clock = clock();
        for x in [0.0, 1.0, -3.7, 1e6, 1e-9] {
            let back = clock.time_to_angle(clock.angle_to_time(x));
            assert!((back - x).abs() <= 4.0 * f64::EPSILON * x.abs(), "{x}");
        }
        assert!((time_to_angle(0.5) - PI).abs() < EPS);
    }

    #[test]
    fn test_angles_are_not_wrapped() {
        let mut clock = clock();
        clock.start(1.0);
        for _ in 0..300 {
            clock.update(0.01);
        }
        // Three full revolutions
        assert!((clock.time() - 3.0 * TAU).abs() < 1e-6);
    }

    #[test]
    fn test_animation_descriptor_does_not_mutate() {
        let clock = clock();
        let clip = clock.set_time_for_animations(1.0);
        assert!((clip.angle + 1.0).abs() < EPS);
        assert_eq!(clip.about_point, clock.center());
        assert!(clock.time().abs() < EPS);
    }

    #[test]
    fn test_shift_moves_everything() {
        let mut clock = clock();
        clock.move_to(Vec2::new(2.0, 1.0));
        assert_eq!(clock.center(), Vec2::new(2.0, 1.0));
        assert_eq!(clock.hand().start(), Vec2::new(2.0, 1.0));

        // The hand now rotates about the new center
        clock.set_time(FRAC_PI_2);
        assert!((clock.hand().start() - Vec2::new(2.0, 1.0)).length() < EPS);
    }

    #[test]
    fn test_invalid_config() {
        let config = ClockConfig {
            radius: 0.0,
            ..ClockConfig::default()
        };
        assert!(Clock::new(config).is_err());
    }
}
