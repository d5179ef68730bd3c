//! Simple pendulum
//!
//! The physical state is `Y = [θ, ω]`, advanced per frame with classic RK4
//! on the undamped pendulum equation `θ'' = −(g/L)·sin θ` under normalized
//! gravity (`g = 1`).
//!
//! [`PendulumDynamics`] is the pure state machine (idle ↔ bouncing).
//! [`Pendulum`] owns the dynamics plus the rod, bob, dashed vertical
//! reference and the θ marking, and re-derives that geometry after every
//! step.
//!
//! The rod is advanced by rotating it through each step's Δθ about the pivot
//! rather than being rebuilt from θ. Forced state changes through
//! [`Pendulum::set_state`] rebuild the rod from the absolute angle.

use crate::config::PendulumConfig;
use crate::error::Result;
use std::f64::consts::FRAC_PI_2;
use std::ops::{Add, Mul};
use swing_core::{
    AngleArc, Circle, Label, Line, Point, Segment, Shape, Style, Vec2, DOWN, ORIGIN, RIGHT,
};
use tracing::{debug, trace};

/// Normalized gravitational constant
pub const GRAVITY: f64 = 1.0;

/// Marking arc radius as a fraction of the rod length
const MARKING_RADIUS_FRACTION: f64 = 1.0 / 5.0;

/// Label distance relative to the marking arc radius
const LABEL_RADIUS_FACTOR: f64 = 1.6;

/// Dashed reference length is the rod length divided by this
const VERTICAL_DIVISOR: f64 = 1.5;

/// Text of the angle label
pub const ANGLE_LABEL_TEXT: &str = r"\theta";

// ─────────────────────────────────────────────────────────────────────────────
// State and integration
// ─────────────────────────────────────────────────────────────────────────────

/// Angular displacement and velocity
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PendulumState {
    /// Radians from straight down, counterclockwise positive
    pub theta: f64,
    /// Radians per second
    pub omega: f64,
}

impl PendulumState {
    pub const fn new(theta: f64, omega: f64) -> Self {
        Self { theta, omega }
    }

    /// Time derivative `[ω, −(g/L)·sin θ]`
    pub fn derivative(&self, gravity_over_length: f64) -> PendulumState {
        PendulumState::new(self.omega, -gravity_over_length * self.theta.sin())
    }

    /// Mechanical energy per unit `m·L²`: `½ω² − (g/L)·cos θ`
    pub fn energy(&self, gravity_over_length: f64) -> f64 {
        0.5 * self.omega * self.omega - gravity_over_length * self.theta.cos()
    }
}

impl Add for PendulumState {
    type Output = PendulumState;

    fn add(self, rhs: PendulumState) -> PendulumState {
        PendulumState::new(self.theta + rhs.theta, self.omega + rhs.omega)
    }
}

impl Mul<PendulumState> for f64 {
    type Output = PendulumState;

    fn mul(self, rhs: PendulumState) -> PendulumState {
        PendulumState::new(self * rhs.theta, self * rhs.omega)
    }
}

/// One RK4 step of size `dt`; returns ΔY, not the new state
pub fn rk4_delta(y: PendulumState, dt: f64, gravity_over_length: f64) -> PendulumState {
    let f = |s: PendulumState| s.derivative(gravity_over_length);

    let k1 = f(y);
    let k2 = f(y + (dt / 2.0) * k1);
    let k3 = f(y + (dt / 2.0) * k2);
    let k4 = f(y + dt * k3);

    (dt / 6.0) * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
}

/// Pendulum state machine: idle until bouncing, then integrates every update
#[derive(Clone, Debug, PartialEq)]
pub struct PendulumDynamics {
    state: PendulumState,
    rod_length: f64,
    bouncing: bool,
}

impl PendulumDynamics {
    /// Idle pendulum at `angle`, at rest
    pub fn new(rod_length: f64, angle: f64) -> Self {
        Self {
            state: PendulumState::new(angle, 0.0),
            rod_length,
            bouncing: false,
        }
    }

    pub fn state(&self) -> PendulumState {
        self.state
    }

    /// Overwrite the state; energy is not conserved across this
    pub fn set_state(&mut self, angle: f64, angular_velocity: f64) {
        self.state = PendulumState::new(angle, angular_velocity);
    }

    pub fn rod_length(&self) -> f64 {
        self.rod_length
    }

    pub fn gravity_over_length(&self) -> f64 {
        GRAVITY / self.rod_length
    }

    /// Start integrating from the current angle with `init_velocity`
    pub fn start_bouncing(&mut self, init_velocity: f64) {
        self.state.omega = init_velocity;
        self.bouncing = true;
    }

    pub fn stop_bouncing(&mut self) {
        self.bouncing = false;
    }

    pub fn is_bouncing(&self) -> bool {
        self.bouncing
    }

    pub fn energy(&self) -> f64 {
        self.state.energy(self.gravity_over_length())
    }

    /// Advance by `dt` while bouncing; returns the applied ΔY
    pub fn update(&mut self, dt: f64) -> Option<PendulumState> {
        if !self.bouncing {
            return None;
        }
        let delta = rk4_delta(self.state, dt, self.gravity_over_length());
        self.state = self.state + delta;
        Some(delta)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Composite
// ─────────────────────────────────────────────────────────────────────────────

/// The θ arc and its label
#[derive(Clone, Debug)]
pub struct AngleMarking {
    /// `None` while the rod is colinear with the vertical
    arc: Option<AngleArc>,
    label: Label,
}

impl AngleMarking {
    pub fn arc(&self) -> Option<&AngleArc> {
        self.arc.as_ref()
    }

    pub fn label(&self) -> &Label {
        &self.label
    }
}

/// A pendulum hanging from a fixed pivot
#[derive(Clone, Debug)]
pub struct Pendulum {
    config: PendulumConfig,
    dynamics: PendulumDynamics,
    rod: Line,
    mass: Circle,
    vertical: Line,
    marking: Option<AngleMarking>,
}

impl Pendulum {
    pub fn new(config: PendulumConfig) -> Result<Self> {
        config.validate()?;

        let length = config.rod_length;
        let angle = config.angle;

        let rod = Line::new(ORIGIN, length * RIGHT)
            .with_style(Style {
                z_index: 1,
                ..Style::stroke(config.rod_color, Style::default().stroke_width)
            })
            .rotated(angle - FRAC_PI_2, ORIGIN);
        let mass = Circle::new(config.mass_radius)
            .with_style(Style {
                z_index: 2,
                ..Style::filled(config.mass_color)
            })
            .moved_to(rod.end());
        let vertical = Line::dashed(ORIGIN, length / VERTICAL_DIVISOR * DOWN).with_style(Style {
            z_index: 1,
            ..Style::default()
        });

        let marking = config.add_angle_label.then(|| AngleMarking {
            arc: None,
            label: Label::new(ANGLE_LABEL_TEXT),
        });

        let mut pendulum = Self {
            dynamics: PendulumDynamics::new(length, angle),
            config,
            rod,
            mass,
            vertical,
            marking,
        };
        pendulum.refresh_marking();
        Ok(pendulum)
    }

    /// Begin swinging from the current angle with `init_velocity`
    ///
    /// Any velocity left over from before a previous stop is discarded.
    pub fn start_bouncing(&mut self, init_velocity: f64) -> &mut Self {
        debug!(
            angle = self.angle(),
            init_velocity, "pendulum started bouncing"
        );
        self.dynamics.start_bouncing(init_velocity);
        self
    }

    /// Freeze the pendulum at its current state
    pub fn stop_bouncing(&mut self) -> &mut Self {
        if self.dynamics.is_bouncing() {
            debug!(
                angle = self.angle(),
                angular_velocity = self.angular_velocity(),
                "pendulum stopped bouncing"
            );
            self.dynamics.stop_bouncing();
        }
        self
    }

    pub fn is_bouncing(&self) -> bool {
        self.dynamics.is_bouncing()
    }

    /// Per-frame update with `dt` seconds elapsed
    pub fn update(&mut self, dt: f64) {
        let Some(delta) = self.dynamics.update(dt) else {
            return;
        };
        let pivot = self.rod.start();
        self.rod.rotate(delta.theta, pivot);
        self.mass.move_to(self.rod.end());
        self.refresh_marking();
    }

    pub fn angle(&self) -> f64 {
        self.dynamics.state().theta
    }

    pub fn angular_velocity(&self) -> f64 {
        self.dynamics.state().omega
    }

    pub fn state(&self) -> PendulumState {
        self.dynamics.state()
    }

    /// Force the physical state and rebuild the geometry from it
    pub fn set_state(&mut self, angle: f64, angular_velocity: f64) -> &mut Self {
        self.dynamics.set_state(angle, angular_velocity);
        let pivot = self.pivot();
        let end = pivot + self.config.rod_length * Vec2::from_angle(angle - FRAC_PI_2);
        self.rod.set_endpoints(pivot, end);
        self.mass.move_to(end);
        self.refresh_marking();
        self
    }

    pub fn energy(&self) -> f64 {
        self.dynamics.energy()
    }

    pub fn dynamics(&self) -> &PendulumDynamics {
        &self.dynamics
    }

    pub fn config(&self) -> &PendulumConfig {
        &self.config
    }

    pub fn rod_length(&self) -> f64 {
        self.config.rod_length
    }

    pub fn mass_value(&self) -> f64 {
        self.config.mass_value
    }

    /// Fixed point the rod hangs from
    pub fn pivot(&self) -> Point {
        self.rod.start()
    }

    pub fn rod(&self) -> &Line {
        &self.rod
    }

    pub fn mass(&self) -> &Circle {
        &self.mass
    }

    pub fn vertical(&self) -> &Line {
        &self.vertical
    }

    pub fn marking(&self) -> Option<&AngleMarking> {
        self.marking.as_ref()
    }

    pub fn angle_arc(&self) -> Option<&AngleArc> {
        self.marking.as_ref().and_then(AngleMarking::arc)
    }

    pub fn label(&self) -> Option<&Label> {
        self.marking.as_ref().map(AngleMarking::label)
    }

    /// Move the whole pendulum by `by`
    pub fn shift(&mut self, by: Vec2) -> &mut Self {
        self.rod.shift(by);
        self.mass.shift(by);
        self.vertical.shift(by);
        if let Some(marking) = &mut self.marking {
            if let Some(arc) = &mut marking.arc {
                arc.shift(by);
            }
            marking.label.shift(by);
        }
        self
    }

    /// Move the whole pendulum so the pivot lands on `point`
    pub fn move_to(&mut self, point: Point) -> &mut Self {
        let by = point - self.pivot();
        self.shift(by)
    }

    fn refresh_marking(&mut self) {
        let Some(marking) = &mut self.marking else {
            return;
        };
        let other_angle = self.dynamics.state().theta > 0.0;
        let radius = self.config.rod_length * MARKING_RADIUS_FRACTION;

        marking.arc = AngleArc::between(&self.rod, &self.vertical, radius, other_angle)
            .ok()
            .map(|mut arc| {
                arc.set_z_index(0);
                arc
            });

        let position = match AngleArc::between(
            &self.rod,
            &self.vertical,
            LABEL_RADIUS_FACTOR * radius,
            other_angle,
        ) {
            Ok(outer) => outer.midpoint(),
            Err(err) => {
                trace!(%err, "angle marking degenerate, placing label along the rod");
                label_fallback_position(&self.rod, self.config.rod_length)
            }
        };
        marking.label.move_to(position);
    }
}

/// Label spot used when no arc can be built: out along the rod
pub fn label_fallback_position(rod: &Line, rod_length: f64) -> Point {
    rod.start() + LABEL_RADIUS_FACTOR * rod_length * MARKING_RADIUS_FRACTION * rod.unit_vector()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_6, PI, TAU};

    fn pendulum(angle: f64) -> Pendulum {
        Pendulum::new(PendulumConfig::default().with_angle(angle)).unwrap()
    }

    /// Times at which θ crosses zero going from positive to negative
    fn downward_crossings(dynamics: &mut PendulumDynamics, dt: f64, steps: usize) -> Vec<f64> {
        let mut crossings = Vec::new();
        let mut prev = dynamics.state().theta;
        for i in 0..steps {
            dynamics.update(dt);
            let theta = dynamics.state().theta;
            if prev > 0.0 && theta <= 0.0 {
                let frac = prev / (prev - theta);
                crossings.push((i as f64 + frac) * dt);
            }
            prev = theta;
        }
        crossings
    }

    #[test]
    fn test_rk4_is_deterministic() {
        let y = PendulumState::new(0.7, -0.3);
        let a = rk4_delta(y, 1.0 / 60.0, 1.0 / 3.0);
        let b = rk4_delta(y, 1.0 / 60.0, 1.0 / 3.0);
        assert_eq!(a, b);
        assert_eq!(rk4_delta(y, 0.0, 1.0 / 3.0), PendulumState::default());
    }

    #[test]
    fn test_rk4_matches_small_step_reference() {
        // One step against a Taylor expansion of θ for tiny dt
        let y = PendulumState::new(0.2, 0.0);
        let dt = 1e-3;
        let delta = rk4_delta(y, dt, 1.0);
        let expected_theta = -0.5 * (0.2f64).sin() * dt * dt;
        assert!((delta.theta - expected_theta).abs() < 1e-12);
        assert!((delta.omega + (0.2f64).sin() * dt).abs() < 1e-9);
    }

    #[test]
    fn test_energy_drift_is_small() {
        let mut dynamics = PendulumDynamics::new(3.0, FRAC_PI_6);
        dynamics.start_bouncing(0.0);
        let e0 = dynamics.energy();
        for _ in 0..1000 {
            dynamics.update(1.0 / 120.0);
        }
        let drift = ((dynamics.energy() - e0) / e0).abs();
        assert!(drift < 0.01, "drift {drift}");
    }

    #[test]
    fn test_stable_across_frame_rates() {
        for fps in [240.0, 120.0, 60.0, 30.0, 24.0] {
            let mut dynamics = PendulumDynamics::new(3.0, 1.2);
            dynamics.start_bouncing(0.5);
            let e0 = dynamics.energy();
            let steps = (fps * 60.0) as usize;
            for _ in 0..steps {
                dynamics.update(1.0 / fps);
            }
            // Measured against the potential scale g/L; e0 itself is near zero here
            let drift = (dynamics.energy() - e0).abs() / dynamics.gravity_over_length();
            assert!(drift < 1e-4, "fps {fps}: drift {drift}");
            assert!(dynamics.state().theta.abs() < PI);
        }
    }

    #[test]
    fn test_small_angle_period() {
        let length = 3.0;
        let mut dynamics = PendulumDynamics::new(length, 0.01);
        dynamics.start_bouncing(0.0);

        let crossings = downward_crossings(&mut dynamics, 1.0 / 120.0, 120 * 40);
        assert!(crossings.len() >= 3);
        let measured = crossings[2] - crossings[1];
        let expected = TAU * (length / GRAVITY).sqrt();
        assert!(
            ((measured - expected) / expected).abs() < 0.02,
            "measured {measured}, expected {expected}"
        );
    }

    #[test]
    fn test_idle_pendulum_does_not_move() {
        let mut p = pendulum(0.4);
        let rod = p.rod().clone();
        p.update(1.0);
        assert_eq!(p.angle(), 0.4);
        assert_eq!(p.rod(), &rod);
    }

    #[test]
    fn test_stop_then_start_resets_velocity() {
        let mut p = pendulum(0.5);
        p.start_bouncing(0.0);
        for _ in 0..37 {
            p.update(1.0 / 60.0);
        }
        p.stop_bouncing();
        let theta = p.angle();
        assert!(p.angular_velocity() != 0.0);

        // Frozen while stopped
        p.update(1.0 / 60.0);
        assert_eq!(p.angle(), theta);

        p.start_bouncing(-0.25);
        assert_eq!(p.angle(), theta);
        assert_eq!(p.angular_velocity(), -0.25);
        assert!(p.is_bouncing());
    }

    #[test]
    fn test_mass_follows_rod() {
        let mut p = pendulum(FRAC_PI_6);
        p.start_bouncing(0.0);
        for _ in 0..90 {
            p.update(1.0 / 60.0);
            assert_eq!(p.mass().center(), p.rod().end());
            assert_eq!(p.pivot(), ORIGIN);
        }
    }

    #[test]
    fn test_incremental_rod_tracks_closed_form() {
        let mut p = pendulum(1.0);
        p.start_bouncing(0.3);
        for _ in 0..20_000 {
            p.update(1.0 / 60.0);
        }
        let closed_form = p.rod_length() * Vec2::from_angle(p.angle() - FRAC_PI_2);
        let drift = (p.rod().end() - closed_form).length();
        assert!(drift < 1e-8, "drift {drift}");
        assert!((p.rod().length() - p.rod_length()).abs() < 1e-8);
    }

    #[test]
    fn test_initial_geometry() {
        let p = pendulum(FRAC_PI_6);
        // θ > 0 swings the bob to the right of the pivot
        let end = p.rod().end();
        assert!((end - Vec2::new(1.5, -3.0 * FRAC_PI_6.cos())).length() < 1e-12);
        assert_eq!(p.vertical().end(), Vec2::new(0.0, -2.0));
        assert!(p.vertical().dashed);
        assert!(p.mass().z_index() > p.rod().z_index());
    }

    #[test]
    fn test_marking_sits_between_rod_and_vertical() {
        for angle in [FRAC_PI_6, -FRAC_PI_6] {
            let p = pendulum(angle);
            let arc = p.angle_arc().unwrap();
            assert!((arc.value().abs() - FRAC_PI_6).abs() < 1e-12);
            assert!((arc.radius() - 0.6).abs() < 1e-12);

            // Label on the rod's side, at 1.6× the arc radius, halfway down
            let label = p.label().unwrap().center();
            assert_eq!(label.x.signum(), angle.signum());
            assert!((label.length() - 0.96).abs() < 1e-12);
            assert!((label.angle() - (angle / 2.0 - FRAC_PI_2)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_degenerate_marking_falls_back() {
        let p = pendulum(0.0);
        assert!(p.angle_arc().is_none());

        let label = p.label().unwrap().center();
        let expected = p.rod().start() + 1.6 * 3.0 / 5.0 * p.rod().unit_vector();
        assert!((label - expected).length() < 1e-12);
        assert_eq!(label, label_fallback_position(p.rod(), 3.0));
    }

    #[test]
    fn test_marking_recovers_after_crossing_vertical() {
        let mut p = pendulum(0.0);
        p.start_bouncing(0.5);
        p.update(1.0 / 60.0);
        assert!(p.angle() > 0.0);
        assert!(p.angle_arc().is_some());
    }

    #[test]
    fn test_marking_disabled() {
        let config = PendulumConfig {
            add_angle_label: false,
            ..PendulumConfig::default()
        };
        let mut p = Pendulum::new(config).unwrap();
        p.start_bouncing(0.0);
        p.update(1.0 / 60.0);
        assert!(p.marking().is_none());
        assert!(p.label().is_none());
    }

    #[test]
    fn test_set_state_rebuilds_geometry() {
        let mut p = pendulum(FRAC_PI_6);
        p.set_state(-1.0, 2.0);
        assert_eq!(p.angle(), -1.0);
        assert_eq!(p.angular_velocity(), 2.0);
        let expected = 3.0 * Vec2::from_angle(-1.0 - FRAC_PI_2);
        assert!((p.rod().end() - expected).length() < 1e-12);
        assert_eq!(p.mass().center(), p.rod().end());
        assert!(p.angle_arc().unwrap().value() > 0.0);
    }

    #[test]
    fn test_shifted_pendulum_swings_about_new_pivot() {
        let mut p = pendulum(FRAC_PI_6);
        p.move_to(Vec2::new(1.0, 2.0));
        assert_eq!(p.pivot(), Vec2::new(1.0, 2.0));
        p.start_bouncing(0.0);
        for _ in 0..30 {
            p.update(1.0 / 60.0);
        }
        assert_eq!(p.pivot(), Vec2::new(1.0, 2.0));
        let arc = p.angle_arc().unwrap();
        assert!((arc.arc().arc_center() - Vec2::new(1.0, 2.0)).length() < 1e-9);
    }

    #[test]
    fn test_rejects_invalid_rod() {
        assert!(Pendulum::new(PendulumConfig::default().with_rod_length(-1.0)).is_err());
    }
}
