//! Perspective camera.

use glam::{Mat4, Vec3};
use tankview_core::CameraOptions;

/// A perspective camera looking at a target point.
///
/// The projection matrix is cached: after changing `fov`, `aspect_ratio`,
/// `near` or `far`, call [`Camera::update_projection_matrix`] before drawing.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    projection: Mat4,
}

impl Camera {
    /// Creates a camera with a 75 degree field of view looking at the origin.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self::perspective(75.0, aspect_ratio, 0.1, 1000.0)
    }

    /// Creates a perspective camera at the origin looking down -Z.
    #[must_use]
    pub fn perspective(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: fov_degrees.to_radians(),
            aspect_ratio,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Creates a camera from options for a viewport of the given aspect ratio.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect_ratio: f32) -> Self {
        let mut camera = Self::perspective(
            options.fov_degrees,
            aspect_ratio,
            options.near,
            options.far,
        );
        camera.position = options.position;
        camera.target = options.target;
        camera
    }

    /// Sets the aspect ratio. The projection is not refreshed.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Recomputes the cached projection matrix from the current parameters.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far);
    }

    /// Returns the cached projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Returns the camera's right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    /// Returns the distance between the camera and its target.
    #[must_use]
    pub fn distance_to_target(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Points the camera at a new target.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Returns FOV in degrees.
    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Sets FOV from degrees. The projection is not refreshed.
    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.fov = degrees.to_radians().clamp(0.1, std::f32::consts::PI - 0.1);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}
