//! Colors and stroke styles

use serde::{Deserialize, Serialize};

/// RGBA color
///
/// Serialized as a `0xRRGGBB` integer so configs stay readable.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    /// `0xF7D96F`
    pub const YELLOW: Color = Color::rgb(0.968_627_45, 0.850_980_4, 0.435_294_12);
    /// `0x888888`
    pub const GRAY: Color = Color::rgb(0.533_333_36, 0.533_333_36, 0.533_333_36);
    /// `0xFC6255`
    pub const RED: Color = Color::rgb(0.988_235_3, 0.384_313_73, 0.333_333_34);
    /// `0x58C4DD`
    pub const BLUE: Color = Color::rgb(0.345_098_05, 0.768_627_46, 0.866_666_7);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Pack into `0xRRGGBB`, dropping alpha
    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Color::from_hex(hex)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Visual style shared by every shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub color: Color,
    pub stroke_width: f64,
    /// 0.0 draws an outline only, 1.0 a solid fill
    pub fill_opacity: f32,
    pub z_index: i32,
}

impl Style {
    pub fn stroke(color: Color, stroke_width: f64) -> Self {
        Self {
            color,
            stroke_width,
            ..Self::default()
        }
    }

    pub fn filled(color: Color) -> Self {
        Self {
            color,
            fill_opacity: 1.0,
            ..Self::default()
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            stroke_width: 4.0,
            fill_opacity: 0.0,
            z_index: 0,
        }
    }
}
