//! Swing Animation System
//!
//! Frame-driven simulation of two animated objects and the scheduler that
//! drives them.
//!
//! # Features
//!
//! - **Clock**: a face with twelve ticks and a hand turning at a constant
//!   angular velocity, with instantaneous and eased time setting
//! - **Pendulum**: RK4-integrated simple pendulum whose rod, bob and θ
//!   marking are re-derived from the physical state every frame
//! - **Clips**: declarative eased rotations played back by the scheduler
//! - **Scheduler**: owns objects by typed id and ticks them with explicit
//!   or wall-clock frame deltas

pub mod clip;
pub mod clock;
pub mod config;
pub mod easing;
pub mod error;
pub mod pendulum;
pub mod scheduler;

pub use clip::{Rotate, RotatePlayback};
pub use clock::{angle_to_time, time_to_angle, Clock, Motion, TimeKeeper};
pub use config::{ClockConfig, PendulumConfig};
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use pendulum::{
    label_fallback_position, rk4_delta, AngleMarking, Pendulum, PendulumDynamics, PendulumState,
    GRAVITY,
};
pub use scheduler::{AnimationScheduler, ClipId, ClockId, PendulumId};
