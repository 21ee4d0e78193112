//! Colors and materials.

use serde::{Deserialize, Serialize};

/// A linear RGB color.
///
/// Colors are authored as sRGB hex values (`0x333333`) and stored linear, which
/// is what the shaders and the sRGB render targets expect. In JSON they are
/// written back as hex integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Creates a color from linear components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a `0xRRGGBB` sRGB value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Returns the `0xRRGGBB` sRGB value of this color.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns the components with the given alpha appended.
    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.077_399_38
    } else if c >= 1.0 {
        1.0
    } else {
        (c * 0.947_867_3 + 0.052_132_7).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c < 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(0.416_666_66) - 0.055
    }
}

/// Which faces of a surface are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Front faces only (counter-clockwise winding).
    #[default]
    Front,
    /// Back faces only.
    Back,
    /// Both faces; back faces are lit with the flipped normal.
    Double,
}

/// Lighting model for a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// Flat color, lights are ignored.
    Unlit,
    /// Diffuse response to ambient and point lights.
    #[default]
    Lit,
}

/// Material for filled surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMaterial {
    /// Base color.
    pub color: Color,
    /// Opacity in `[0, 1]`, only honored when `transparent` is set.
    pub opacity: f32,
    /// Whether the surface is blended and sorted with the transparent items.
    pub transparent: bool,
    /// Rasterized faces.
    pub side: Side,
    /// Lighting model.
    pub shading: Shading,
}

impl SurfaceMaterial {
    /// A lit, opaque, front-sided material.
    pub fn standard(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            transparent: false,
            side: Side::Front,
            shading: Shading::Lit,
        }
    }

    /// An unlit, opaque, front-sided material.
    pub fn basic(color: Color) -> Self {
        Self {
            shading: Shading::Unlit,
            ..Self::standard(color)
        }
    }

    /// Makes the material transparent with the given opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }

    /// Sets which faces are rasterized.
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Returns the color with the effective alpha.
    pub fn rgba(&self) -> [f32; 4] {
        let alpha = if self.transparent { self.opacity } else { 1.0 };
        self.color.with_alpha(alpha)
    }
}

/// Material for line segments. Lines are always unlit.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMaterial {
    pub color: Color,
}

impl LineMaterial {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn rgba(&self) -> [f32; 4] {
        self.color.with_alpha(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_extremes() {
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
        assert_eq!(Color::from_hex(0x000000), Color::BLACK);
        assert_eq!(Color::from_hex(0x00ffff), Color::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_hex_is_srgb_encoded() {
        // 0x33 is ~0.2 in sRGB but ~0.033 linear
        let gray = Color::from_hex(0x333333);
        assert!((gray.r - 0.0331).abs() < 0.001);
        assert_eq!(gray.r, gray.g);
        assert_eq!(gray.g, gray.b);
    }

    #[test]
    fn test_hex_survives_linear_storage() {
        for hex in [0x333333, 0x00ffff, 0x123456, 0xfedcba, 0x808080] {
            assert_eq!(Color::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn test_opacity_ignored_when_opaque() {
        let mut material = SurfaceMaterial::standard(Color::WHITE);
        material.opacity = 0.3;
        assert_eq!(material.rgba()[3], 1.0);

        let material = SurfaceMaterial::standard(Color::WHITE).with_opacity(0.3);
        assert!(material.transparent);
        assert_eq!(material.rgba()[3], 0.3);
    }

    #[test]
    fn test_basic_is_unlit() {
        let material = SurfaceMaterial::basic(Color::BLACK);
        assert_eq!(material.shading, Shading::Unlit);
        assert_eq!(material.side, Side::Front);
    }
}
