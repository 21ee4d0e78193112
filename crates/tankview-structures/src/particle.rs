//! A single particle drawn as a translucent sphere.

use std::any::Any;

use glam::{Mat4, Vec3};
use tankview_core::{Color, Drawable, Geometry, Mesh, Node, RenderOrder, SurfaceMaterial};

/// Sphere tessellation around the equator.
pub const PARTICLE_WIDTH_SEGMENTS: u32 = 16;
/// Sphere tessellation from pole to pole.
pub const PARTICLE_HEIGHT_SEGMENTS: u32 = 16;
/// Opacity of a particle.
pub const PARTICLE_OPACITY: f32 = 0.8;

/// A unit-radius cyan sphere.
///
/// Each particle owns its own material. Radius changes are applied as a
/// scale transform; the geometry always has radius 1.
#[derive(Debug, Clone)]
pub struct Particle {
    name: String,
    mesh: Node,
    position: Vec3,
    scale: f32,
}

impl Particle {
    pub fn new() -> Self {
        let geometry = Geometry::sphere(1.0, PARTICLE_WIDTH_SEGMENTS, PARTICLE_HEIGHT_SEGMENTS);
        let material =
            SurfaceMaterial::standard(Color::from_hex(0x00ffff)).with_opacity(PARTICLE_OPACITY);
        Self {
            name: "particle".to_string(),
            mesh: Mesh::new("particle", geometry, material).into(),
            position: Vec3::ZERO,
            scale: 1.0,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Scales the sphere, e.g. `0.1` for a fluid particle.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self.update_transform();
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self.update_transform();
        self
    }

    fn update_transform(&mut self) {
        self.mesh.set_transform(
            Mat4::from_translation(self.position) * Mat4::from_scale(Vec3::splat(self.scale)),
        );
    }

    /// Returns the sphere surface.
    pub fn mesh(&self) -> &Node {
        &self.mesh
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_render_order(&mut self, render_order: RenderOrder) {
        self.mesh.set_render_order(render_order);
    }

    pub fn render_order(&self) -> RenderOrder {
        self.mesh.render_order()
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawable for Particle {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "Particle"
    }

    fn world_nodes(&self) -> Vec<(&Node, Mat4)> {
        vec![(&self.mesh, self.mesh.transform())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_defaults() {
        let particle = Particle::new();
        let Node::Mesh(mesh) = particle.mesh() else {
            panic!("particle should be a mesh");
        };
        assert_eq!(mesh.geometry().num_vertices(), 17 * 17);
        assert_eq!(mesh.material().color.to_hex(), 0x00ffff);
        assert!(mesh.material().transparent);
        assert_eq!(particle.render_order(), 0);
        assert_eq!(particle.scale(), 1.0);
    }

    #[test]
    fn test_unit_radius_bounds() {
        let bb = Particle::new().bounding_box().unwrap();
        assert!(bb.min.abs_diff_eq(Vec3::splat(-1.0), 1e-5));
        assert!(bb.max.abs_diff_eq(Vec3::splat(1.0), 1e-5));
    }

    #[test]
    fn test_scale_is_a_transform() {
        let particle = Particle::new()
            .with_scale(0.1)
            .with_position(Vec3::new(1.0, 0.0, 0.0));
        let Node::Mesh(mesh) = particle.mesh() else {
            panic!("particle should be a mesh");
        };
        // Geometry keeps radius 1
        let local = mesh.geometry().bounding_box().unwrap();
        assert!(local.max.abs_diff_eq(Vec3::ONE, 1e-5));

        let bb = particle.bounding_box().unwrap();
        assert!(bb.min.abs_diff_eq(Vec3::new(0.9, -0.1, -0.1), 1e-5));
        assert!(bb.max.abs_diff_eq(Vec3::new(1.1, 0.1, 0.1), 1e-5));
    }

    #[test]
    fn test_materials_are_per_instance() {
        let a = Particle::new();
        let b = Particle::new();
        let (Node::Mesh(ma), Node::Mesh(mb)) = (a.mesh(), b.mesh()) else {
            panic!("particles should be meshes");
        };
        assert!(!std::ptr::eq(ma.material(), mb.material()));
        assert_eq!(ma.material(), mb.material());
    }

    #[test]
    fn test_set_render_order() {
        let mut particle = Particle::new();
        particle.set_render_order(1);
        assert_eq!(particle.render_order(), 1);
    }
}
