//! Scene lights.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::material::Color;

/// Uniform light reaching every surface regardless of orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::new(Color::WHITE, 1.0)
    }
}

/// Omnidirectional light with physically based falloff.
///
/// `distance` is the cutoff range (0 = unlimited); `decay` is the falloff
/// exponent, 2 for inverse-square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
    pub position: Vec3,
}

impl PointLight {
    pub fn new(color: Color, intensity: f32, distance: f32) -> Self {
        Self {
            color,
            intensity,
            distance,
            decay: 2.0,
            position: Vec3::ZERO,
        }
    }

    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Fraction of the intensity that reaches a point `d` units away.
    pub fn attenuation(&self, d: f32) -> f32 {
        let falloff = 1.0 / d.powf(self.decay).max(0.01);
        if self.distance > 0.0 {
            let ratio = (d / self.distance).powi(4);
            falloff * (1.0 - ratio).clamp(0.0, 1.0).powi(2)
        } else {
            falloff
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Color::WHITE, 1.0, 100.0).at(Vec3::new(10.0, 10.0, 10.0))
    }
}

/// Any light the scene can hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient(AmbientLight),
    Point(PointLight),
}

impl From<AmbientLight> for Light {
    fn from(light: AmbientLight) -> Self {
        Light::Ambient(light)
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}
