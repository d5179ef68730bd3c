//! Easing curves for clip playback
//!
//! Each curve maps normalized progress `t` in 0..=1 to eased progress,
//! with `f(0) == 0` and `f(1) == 1`.

use serde::{Deserialize, Serialize};

/// Steepness of the `Smooth` sigmoid
const SMOOTH_INFLECTION: f64 = 10.0;

/// Easing function applied to clip progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Normalized logistic curve; slow start and finish
    #[default]
    Smooth,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Eased progress for `t`, clamped to 0..=1
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Smooth => smooth(t, SMOOTH_INFLECTION),
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn smooth(t: f64, inflection: f64) -> f64 {
    let error = sigmoid(-inflection / 2.0);
    ((sigmoid(inflection * (t - 0.5)) - error) / (1.0 - 2.0 * error)).clamp(0.0, 1.0)
}
