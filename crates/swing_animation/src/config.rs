//! Construction parameters for clocks and pendulums
//!
//! Both configs deserialize with every field optional; missing fields take
//! the defaults below.

use crate::error::{AnimationError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_6;
use swing_core::Color;

/// Clock face parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub radius: f64,
    pub color: Color,
    /// Stroke width of the rim and ticks
    pub stroke_width: f64,
    pub hand_stroke_width: f64,
    /// Length of an hour tick as a fraction of the radius
    pub tick_size_radius_ratio: f64,
    /// Extra length factor for the 12/3/6/9 ticks
    pub bigger_ticks_factor: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            radius: 0.7,
            color: Color::WHITE,
            stroke_width: 1.5,
            hand_stroke_width: 3.0,
            tick_size_radius_ratio: 1.0 / 8.0,
            bigger_ticks_factor: 2.0,
        }
    }
}

impl ClockConfig {
    pub fn validate(&self) -> Result<()> {
        AnimationError::check_positive("radius", self.radius)?;
        AnimationError::check_non_negative("stroke_width", self.stroke_width)?;
        AnimationError::check_non_negative("hand_stroke_width", self.hand_stroke_width)?;
        AnimationError::check_positive("tick_size_radius_ratio", self.tick_size_radius_ratio)?;
        AnimationError::check_positive("bigger_ticks_factor", self.bigger_ticks_factor)?;
        Ok(())
    }
}

/// Pendulum parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumConfig {
    pub rod_length: f64,
    /// Initial angular displacement from vertical, radians
    pub angle: f64,
    pub rod_color: Color,
    /// Bob mass; the simple pendulum's motion does not depend on it
    pub mass_value: f64,
    pub mass_radius: f64,
    pub mass_color: Color,
    pub add_angle_label: bool,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            rod_length: 3.0,
            angle: FRAC_PI_6,
            rod_color: Color::YELLOW,
            mass_value: 1.0,
            mass_radius: 0.2,
            mass_color: Color::WHITE,
            add_angle_label: true,
        }
    }
}

impl PendulumConfig {
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_rod_length(mut self, rod_length: f64) -> Self {
        self.rod_length = rod_length;
        self
    }

    pub fn validate(&self) -> Result<()> {
        AnimationError::check_positive("rod_length", self.rod_length)?;
        AnimationError::check_finite("angle", self.angle)?;
        AnimationError::check_non_negative("mass_radius", self.mass_radius)?;
        AnimationError::check_finite("mass_value", self.mass_value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ClockConfig::default().validate().is_ok());
        assert!(PendulumConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_rod() {
        let err = PendulumConfig::default()
            .with_rod_length(0.0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            AnimationError::NonPositive {
                field: "rod_length",
                value: 0.0
            }
        );
        assert!(PendulumConfig::default()
            .with_rod_length(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_rejects_bad_clock_radius() {
        let config = ClockConfig {
            radius: -1.0,
            ..ClockConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PendulumConfig =
            toml::from_str("rod_length = 2.0\nrod_color = 0xFF0000").unwrap();
        assert_eq!(config.rod_length, 2.0);
        assert_eq!(config.rod_color.to_hex(), 0xFF0000);
        assert_eq!(config.angle, FRAC_PI_6);
        assert!(config.add_angle_label);
    }
}
