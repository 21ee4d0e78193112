//! Orbit camera controls.
//!
//! Controls translate pointer gestures into camera motion around a target
//! point and report whether the camera actually moved. They never draw; the
//! caller decides what to do with a [`ControlEvent`].

use std::f32::consts::PI;

use glam::Vec3;
use tankview_core::ControlOptions;

use crate::camera::Camera;

/// Keeps the camera off the poles so `up` never aligns with the view axis.
const POLAR_EPSILON: f32 = 1e-3;

/// Camera moves smaller than this are not reported.
const CHANGE_EPSILON: f32 = 1e-5;

/// A pointer gesture, already mapped to its control meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlInput {
    /// Drag in pixels that orbits the camera around its target.
    Rotate { dx: f32, dy: f32 },
    /// Drag in pixels that slides camera and target together.
    Pan { dx: f32, dy: f32 },
    /// Wheel movement in lines. Positive values move closer.
    Zoom { lines: f32 },
}

/// Notification emitted when a gesture moved the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    Changed,
}

/// Orbit, pan and dolly controls bound to a camera's target.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub enable_rotate: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::from_options(&ControlOptions::default())
    }
}

impl OrbitControls {
    /// Creates controls with every gesture enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_options(options: &ControlOptions) -> Self {
        Self {
            enable_rotate: options.enable_rotate,
            enable_pan: options.enable_pan,
            enable_zoom: options.enable_zoom,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            min_distance: options.min_distance,
            max_distance: options.max_distance,
        }
    }

    /// Applies a gesture to the camera.
    ///
    /// Returns `Some(ControlEvent::Changed)` only if the camera position or
    /// target moved. Disabled gestures leave the camera untouched.
    pub fn handle(&self, camera: &mut Camera, input: ControlInput) -> Option<ControlEvent> {
        let before = (camera.position, camera.target);

        match input {
            ControlInput::Rotate { dx, dy } if self.enable_rotate => self.rotate(camera, dx, dy),
            ControlInput::Pan { dx, dy } if self.enable_pan => self.pan(camera, dx, dy),
            ControlInput::Zoom { lines } if self.enable_zoom => self.zoom(camera, lines),
            _ => return None,
        }

        let moved = !camera.position.abs_diff_eq(before.0, CHANGE_EPSILON)
            || !camera.target.abs_diff_eq(before.1, CHANGE_EPSILON);
        if moved {
            log::trace!("camera moved to {:?}", camera.position);
            Some(ControlEvent::Changed)
        } else {
            None
        }
    }

    fn rotate(&self, camera: &mut Camera, dx: f32, dy: f32) {
        if dx.abs() <= f32::EPSILON && dy.abs() <= f32::EPSILON {
            return;
        }
        let offset = camera.position - camera.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        let theta = offset.x.atan2(offset.z) - dx * self.rotate_speed;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() - dy * self.rotate_speed)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        let offset = radius
            * Vec3::new(
                phi.sin() * theta.sin(),
                phi.cos(),
                phi.sin() * theta.cos(),
            );
        camera.position = camera.target + offset;
    }

    fn pan(&self, camera: &mut Camera, dx: f32, dy: f32) {
        let distance = camera.distance_to_target();
        if distance <= f32::EPSILON {
            return;
        }

        let right = camera.right();
        let up = right.cross(camera.forward());
        let delta = (-dx * right + dy * up) * self.pan_speed * distance;
        camera.position += delta;
        camera.target += delta;
    }

    fn zoom(&self, camera: &mut Camera, lines: f32) {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        let scaled = (radius * self.zoom_speed.powf(lines))
            .clamp(self.min_distance, self.max_distance);
        camera.position = camera.target + offset * (scaled / radius);
    }
}
