//! Scene file handling
//!
//! A scene file is TOML with a `[run]` table and any number of `[[clock]]`
//! and `[[pendulum]]` entries. Object entries accept every construction
//! field of the corresponding config plus placement and start-up options.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use swing_animation::{ClockConfig, PendulumConfig};

/// Whole scene description
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default, rename = "clock")]
    pub clocks: Vec<ClockEntry>,
    #[serde(default, rename = "pendulum")]
    pub pendulums: Vec<PendulumEntry>,
}

/// Host loop settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// Frames per second fed to the simulation
    pub fps: u32,
    /// Seconds of simulated time
    pub duration: f64,
    /// Print state every this many frames
    pub sample_every: u32,
    /// Pace frames against the wall clock instead of stepping as fast as possible
    pub realtime: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            duration: 5.0,
            sample_every: 30,
            realtime: false,
        }
    }
}

impl RunConfig {
    pub fn frame_count(&self) -> u64 {
        (self.duration * f64::from(self.fps)).round().max(0.0) as u64
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClockEntry {
    #[serde(flatten)]
    pub config: ClockConfig,
    /// Position of the face center
    #[serde(default)]
    pub offset: [f64; 2],
    /// Revolutions per second; the clock stays paused when absent
    #[serde(default)]
    pub speed: Option<f64>,
    /// Time to jump to before the first frame
    #[serde(default)]
    pub time: Option<f64>,
    /// Time to ease to over one second
    #[serde(default)]
    pub animate_to: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PendulumEntry {
    #[serde(flatten)]
    pub config: PendulumConfig,
    /// Position of the pivot
    #[serde(default)]
    pub offset: [f64; 2],
    /// Starts bouncing with this velocity; stays idle when absent
    #[serde(default)]
    pub initial_velocity: Option<f64>,
}

impl SceneConfig {
    /// Load a scene from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let scene: SceneConfig = toml::from_str(content)?;
        if scene.run.fps == 0 {
            anyhow::bail!("run.fps must be at least 1");
        }
        if !(scene.run.duration.is_finite() && scene.run.duration >= 0.0) {
            anyhow::bail!("run.duration must be a non-negative number");
        }
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_scene_parses() {
        let scene = SceneConfig::parse(include_str!("../scenes/default.toml")).unwrap();
        assert_eq!(scene.run.fps, 60);
        assert_eq!(scene.clocks.len(), 2);
        assert_eq!(scene.pendulums.len(), 2);

        assert_eq!(scene.clocks[0].config.radius, 1.0);
        assert_eq!(scene.clocks[0].speed, Some(0.1));
        // Unset fields fall back to the config defaults
        assert_eq!(scene.clocks[1].config.radius, 0.7);

        let second = &scene.pendulums[1];
        assert_eq!(second.config.rod_length, 2.0);
        assert_eq!(second.config.rod_color.to_hex(), 0x58C4DD);
        assert_eq!(second.initial_velocity, Some(0.8));
    }

    #[test]
    fn test_empty_scene_uses_defaults() {
        let scene = SceneConfig::parse("").unwrap();
        assert_eq!(scene.run.frame_count(), 300);
        assert!(scene.clocks.is_empty());
    }

    #[test]
    fn test_rejects_zero_fps() {
        assert!(SceneConfig::parse("[run]\nfps = 0").is_err());
    }
}
