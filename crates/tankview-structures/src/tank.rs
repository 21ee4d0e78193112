//! The tank volume: a translucent box with a wireframe outline.

use std::any::Any;

use glam::{Mat4, Vec3};
use tankview_core::{
    Color, Drawable, EdgesGeometry, Geometry, Group, LineMaterial, LineSegments, Mesh, Node,
    RenderOrder, Side, SurfaceMaterial,
};

const SURFACE: usize = 0;
const OUTLINE: usize = 1;

/// Opacity of the tank walls.
pub const TANK_OPACITY: f32 = 0.3;

/// A box-shaped tank drawn as translucent walls plus their edges.
///
/// The outline is always derived from the current surface geometry, so both
/// share the same extents. Both carry the same render order.
#[derive(Debug, Clone)]
pub struct Tank {
    name: String,
    dimensions: Vec3,
    group: Group,
}

impl Tank {
    /// Creates a tank of the given width (x), height (y) and depth (z),
    /// centered at the origin.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        let mut tank = Self {
            name: "tank".to_string(),
            dimensions: Vec3::new(width, height, depth),
            group: Group::new("tank"),
        };
        tank.rebuild(0);
        tank
    }

    /// Renames the tank.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn rebuild(&mut self, render_order: RenderOrder) {
        let geometry = Geometry::cuboid(self.dimensions.x, self.dimensions.y, self.dimensions.z);
        let edges = EdgesGeometry::new(&geometry);
        log::debug!(
            "tank {:?}: {} triangles, {} outline segments",
            self.dimensions,
            geometry.num_triangles(),
            edges.num_segments()
        );

        let material = SurfaceMaterial::standard(Color::WHITE)
            .with_opacity(TANK_OPACITY)
            .with_side(Side::Double);

        let mut group = Group::new(self.group.name().to_string());
        group.set_transform(self.group.transform());
        group.add(Mesh::new("tank surface", geometry, material));
        group.add(LineSegments::new(
            "tank outline",
            edges,
            LineMaterial::new(Color::BLACK),
        ));
        self.group = group;
        self.set_render_order(render_order);
    }

    /// Returns width, height and depth.
    pub fn dimensions(&self) -> Vec3 {
        self.dimensions
    }

    /// Changes the dimensions, regenerating surface and outline together.
    pub fn set_dimensions(&mut self, width: f32, height: f32, depth: f32) {
        self.dimensions = Vec3::new(width, height, depth);
        self.rebuild(self.render_order());
    }

    /// Returns the grouped surface and outline.
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// Returns the translucent walls.
    pub fn surface(&self) -> &Node {
        &self.group.children()[SURFACE]
    }

    /// Returns the wireframe outline.
    pub fn outline(&self) -> &Node {
        &self.group.children()[OUTLINE]
    }

    /// Sets the draw priority of both the surface and the outline.
    pub fn set_render_order(&mut self, render_order: RenderOrder) {
        for node in self.group.children_mut() {
            node.set_render_order(render_order);
        }
    }

    pub fn render_order(&self) -> RenderOrder {
        self.surface().render_order()
    }

    /// Moves the whole tank.
    pub fn set_transform(&mut self, transform: Mat4) {
        self.group.set_transform(transform);
    }
}

impl Drawable for Tank {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "Tank"
    }

    fn world_nodes(&self) -> Vec<(&Node, Mat4)> {
        self.group.world_nodes().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tank_nodes() {
        let tank = Tank::new(10.0, 5.0, 10.0);
        assert_eq!(tank.group().children().len(), 2);
        assert!(tank.surface().is_transparent());
        assert!(!tank.outline().is_transparent());

        let Node::Lines(outline) = tank.outline() else {
            panic!("outline should be line segments");
        };
        assert_eq!(outline.geometry().num_segments(), 12);

        let Node::Mesh(surface) = tank.surface() else {
            panic!("surface should be a mesh");
        };
        assert_eq!(surface.material().side, Side::Double);
        assert!((surface.material().opacity - TANK_OPACITY).abs() < f32::EPSILON);
    }

    #[test]
    fn test_render_order_applies_to_both() {
        let mut tank = Tank::new(10.0, 5.0, 10.0);
        tank.set_render_order(2);
        assert_eq!(tank.surface().render_order(), 2);
        assert_eq!(tank.outline().render_order(), 2);
        assert_eq!(tank.render_order(), 2);
    }

    #[test]
    fn test_set_dimensions_keeps_outline_in_sync() {
        let mut tank = Tank::new(10.0, 5.0, 10.0);
        tank.set_render_order(3);
        tank.set_dimensions(4.0, 8.0, 2.0);

        let surface = tank.surface().bounding_box().unwrap();
        let outline = tank.outline().bounding_box().unwrap();
        assert_eq!(surface, outline);
        assert_eq!(surface.size(), Vec3::new(4.0, 8.0, 2.0));
        assert_eq!(tank.outline().render_order(), 3);
    }

    #[test]
    fn test_thin_tank_outline_spans_surface() {
        let tank = Tank::new(1e-5, 1.0, 1.0);
        let surface = tank.surface().bounding_box().unwrap();
        let outline = tank.outline().bounding_box().unwrap();
        assert_eq!(surface, outline);
        assert!(outline.min.x < outline.max.x);
    }

    #[test]
    fn test_drawable_bounds() {
        let tank = Tank::new(10.0, 5.0, 10.0);
        let bb = tank.bounding_box().unwrap();
        assert_eq!(bb.min, Vec3::new(-5.0, -2.5, -5.0));
        assert_eq!(bb.max, Vec3::new(5.0, 2.5, 5.0));
    }

    proptest! {
        #[test]
        fn prop_outline_matches_surface(
            w in 1e-6f32..500.0,
            h in 1e-6f32..500.0,
            d in 1e-6f32..500.0,
            order in -10i32..10,
        ) {
            let mut tank = Tank::new(w, h, d);
            tank.set_render_order(order);
            let surface = tank.surface().bounding_box().unwrap();
            let outline = tank.outline().bounding_box().unwrap();
            prop_assert_eq!(surface, outline);
            prop_assert_eq!(tank.surface().render_order(), tank.outline().render_order());
        }
    }
}
