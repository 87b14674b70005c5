//! Colors and themes.

use super::component::Font;
use serde::{Deserialize, Serialize};

/// RGBA color used by components and themes.
///
/// Channels are represented as `f32` in the range `0.0 ..= 1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel (opacity)
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// Creates a new color from `f32` channel values in the range `0.0 ..= 1.0`.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }

    /// Creates a new color from `u8` channel values in the range `0 ..= 255`.
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    fn channel_u8(v: f32) -> u8 {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// Returns the red channel as an `u8` (0–255).
    pub fn r_u8(&self) -> u8 {
        Self::channel_u8(self.r)
    }
    /// Returns the green channel as an `u8` (0–255).
    pub fn g_u8(&self) -> u8 {
        Self::channel_u8(self.g)
    }
    /// Returns the blue channel as an `u8` (0–255).
    pub fn b_u8(&self) -> u8 {
        Self::channel_u8(self.b)
    }
    /// Returns the alpha channel as an `u8` (0–255).
    pub fn a_u8(&self) -> u8 {
        Self::channel_u8(self.a)
    }

    /// SVG paint value, `rgb(r,g,b)`. Opacity is emitted separately by the renderer.
    pub fn to_svg_rgb(&self) -> String {
        format!("rgb({},{},{})", self.r_u8(), self.g_u8(), self.b_u8())
    }

    /// Alpha clamped to `0.0 ..= 1.0`, for `fill-opacity`/`stroke-opacity`.
    pub fn opacity(&self) -> f32 {
        self.a.clamp(0.0, 1.0)
    }
}

/// Named set of defaults used when a component does not specify its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub background: Color,
    pub foreground: Color,
    pub default_font: Font,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            background: Color::WHITE,
            foreground: Color::BLACK,
            default_font: Font::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_channels_round_trip_through_f32() {
        let c = Color::from_u8(12, 128, 255, 64);
        assert_eq!((c.r_u8(), c.g_u8(), c.b_u8(), c.a_u8()), (12, 128, 255, 64));
        assert_eq!(c.to_svg_rgb(), "rgb(12,128,255)");
    }

    #[test]
    fn out_of_range_channels_are_clamped() {
        let c = Color::new(1.5, -0.2, 0.5, 2.0);
        assert_eq!(c.r_u8(), 255);
        assert_eq!(c.g_u8(), 0);
        assert_eq!(c.opacity(), 1.0);
    }
}
