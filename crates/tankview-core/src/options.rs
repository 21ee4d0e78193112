//! Configuration options for tankview.
//!
//! Every value has a default reproducing the reference scene, so an options
//! file only needs to list what it changes.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::light::{AmbientLight, PointLight};
use crate::material::Color;
use crate::node::RenderOrder;

/// Window and scene configuration for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    /// Window title.
    pub title: String,
    /// Initial window width in logical pixels.
    pub width: u32,
    /// Initial window height in logical pixels.
    pub height: u32,
    /// Scene to assemble.
    pub scene: SceneOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            title: "tankview".to_string(),
            width: 1280,
            height: 720,
            scene: SceneOptions::default(),
        }
    }
}

impl AppOptions {
    /// Parses options from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&json)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Serializes options as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Everything the scene assembler needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
    /// Clear color behind the scene.
    pub background_color: Color,
    pub tank: TankOptions,
    pub particle: ParticleOptions,
    pub ambient_light: AmbientLight,
    pub point_light: PointLight,
    pub camera: CameraOptions,
    pub controls: ControlOptions,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            background_color: Color::from_hex(0x333333),
            tank: TankOptions::default(),
            particle: ParticleOptions::default(),
            ambient_light: AmbientLight::default(),
            point_light: PointLight::default(),
            camera: CameraOptions::default(),
            controls: ControlOptions::default(),
        }
    }
}

/// Tank dimensions and draw priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankOptions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub render_order: RenderOrder,
}

impl Default for TankOptions {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 5.0,
            depth: 10.0,
            render_order: 2,
        }
    }
}

/// Particle placement and draw priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleOptions {
    /// Uniform scale applied to the unit sphere (0.1 for fluid particles).
    pub scale: f32,
    pub position: Vec3,
    pub render_order: RenderOrder,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            position: Vec3::ZERO,
            render_order: 1,
        }
    }
}

/// Initial perspective camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 5.0, 15.0),
            target: Vec3::ZERO,
        }
    }
}

/// Orbit control switches and speeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlOptions {
    pub enable_rotate: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    /// Radians per pixel of drag.
    pub rotate_speed: f32,
    /// World units per pixel of drag, scaled by the target distance.
    pub pan_speed: f32,
    /// Dolly factor per wheel line.
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            enable_rotate: true,
            enable_pan: true,
            enable_zoom: true,
            rotate_speed: 0.01,
            pan_speed: 0.001,
            zoom_speed: 0.95,
            min_distance: 0.5,
            max_distance: 500.0,
        }
    }
}
