//! Scene nodes.
//!
//! A [`Node`] is a single drawable primitive: a filled [`Mesh`] or a set of
//! [`LineSegments`]. Nodes carry a model transform and a render order; a
//! [`Group`] bundles nodes that are positioned together.

use glam::Mat4;

use crate::geometry::{Aabb, EdgesGeometry, Geometry};
use crate::material::{LineMaterial, SurfaceMaterial};

/// Draw priority. Higher values draw later.
pub type RenderOrder = i32;

/// A filled, shaded surface.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    geometry: Geometry,
    material: SurfaceMaterial,
    transform: Mat4,
    render_order: RenderOrder,
}

impl Mesh {
    /// Creates a mesh with identity transform and render order 0.
    pub fn new(name: impl Into<String>, geometry: Geometry, material: SurfaceMaterial) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            transform: Mat4::IDENTITY,
            render_order: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn material(&self) -> &SurfaceMaterial {
        &self.material
    }
}

/// Unlit line segments, typically an outline.
#[derive(Debug, Clone)]
pub struct LineSegments {
    name: String,
    geometry: EdgesGeometry,
    material: LineMaterial,
    transform: Mat4,
    render_order: RenderOrder,
}

impl LineSegments {
    /// Creates line segments with identity transform and render order 0.
    pub fn new(name: impl Into<String>, geometry: EdgesGeometry, material: LineMaterial) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            transform: Mat4::IDENTITY,
            render_order: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &EdgesGeometry {
        &self.geometry
    }

    pub fn material(&self) -> &LineMaterial {
        &self.material
    }
}

/// A drawable scene node.
#[derive(Debug, Clone)]
pub enum Node {
    Mesh(Mesh),
    Lines(LineSegments),
}

impl Node {
    /// Returns the node name.
    pub fn name(&self) -> &str {
        match self {
            Node::Mesh(mesh) => mesh.name(),
            Node::Lines(lines) => lines.name(),
        }
    }

    /// Returns the draw priority.
    pub fn render_order(&self) -> RenderOrder {
        match self {
            Node::Mesh(mesh) => mesh.render_order,
            Node::Lines(lines) => lines.render_order,
        }
    }

    /// Sets the draw priority.
    pub fn set_render_order(&mut self, render_order: RenderOrder) {
        match self {
            Node::Mesh(mesh) => mesh.render_order = render_order,
            Node::Lines(lines) => lines.render_order = render_order,
        }
    }

    /// Returns the local model transform.
    pub fn transform(&self) -> Mat4 {
        match self {
            Node::Mesh(mesh) => mesh.transform,
            Node::Lines(lines) => lines.transform,
        }
    }

    /// Sets the local model transform.
    pub fn set_transform(&mut self, transform: Mat4) {
        match self {
            Node::Mesh(mesh) => mesh.transform = transform,
            Node::Lines(lines) => lines.transform = transform,
        }
    }

    /// Whether the node is blended with the transparent items.
    pub fn is_transparent(&self) -> bool {
        match self {
            Node::Mesh(mesh) => mesh.material.transparent,
            Node::Lines(_) => false,
        }
    }

    /// Returns the bounding box in local coordinates.
    pub fn local_bounding_box(&self) -> Option<Aabb> {
        match self {
            Node::Mesh(mesh) => mesh.geometry.bounding_box(),
            Node::Lines(lines) => lines.geometry.bounding_box(),
        }
    }

    /// Returns the bounding box after applying the node transform.
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.local_bounding_box()
            .map(|bb| bb.transformed(&self.transform()))
    }
}

impl From<Mesh> for Node {
    fn from(mesh: Mesh) -> Self {
        Node::Mesh(mesh)
    }
}

impl From<LineSegments> for Node {
    fn from(lines: LineSegments) -> Self {
        Node::Lines(lines)
    }
}

/// A set of nodes positioned together.
#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    children: Vec<Node>,
    transform: Mat4,
}

impl Group {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            transform: Mat4::IDENTITY,
        }
    }

    /// Appends a child node and returns its index.
    pub fn add(&mut self, node: impl Into<Node>) -> usize {
        self.children.push(node.into());
        self.children.len() - 1
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    /// Iterates over children paired with their world transform.
    pub fn world_nodes(&self) -> impl Iterator<Item = (&Node, Mat4)> + '_ {
        self.children
            .iter()
            .map(move |node| (node, self.transform * node.transform()))
    }

    /// Returns the union of the children's bounding boxes in world space.
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.world_nodes()
            .filter_map(|(node, world)| node.local_bounding_box().map(|bb| bb.transformed(&world)))
            .reduce(|a, b| a.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;
    use glam::Vec3;

    fn unit_box() -> Mesh {
        Mesh::new(
            "box",
            Geometry::cuboid(1.0, 1.0, 1.0),
            SurfaceMaterial::standard(Color::WHITE).with_opacity(0.5),
        )
    }

    #[test]
    fn test_node_defaults() {
        let node = Node::from(unit_box());
        assert_eq!(node.render_order(), 0);
        assert_eq!(node.transform(), Mat4::IDENTITY);
        assert!(node.is_transparent());
        assert_eq!(node.name(), "box");
    }

    #[test]
    fn test_lines_are_opaque() {
        let geometry = Geometry::cuboid(1.0, 1.0, 1.0);
        let lines = LineSegments::new(
            "outline",
            EdgesGeometry::new(&geometry),
            LineMaterial::new(Color::BLACK),
        );
        assert!(!Node::from(lines).is_transparent());
    }

    #[test]
    fn test_set_render_order() {
        let mut node = Node::from(unit_box());
        node.set_render_order(7);
        assert_eq!(node.render_order(), 7);
    }

    #[test]
    fn test_group_bounding_box_applies_transform() {
        let mut group = Group::new("group");
        group.add(unit_box());
        group.set_transform(Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0)));
        let bb = group.bounding_box().unwrap();
        assert_eq!(bb.min, Vec3::new(2.5, -0.5, -0.5));
        assert_eq!(bb.max, Vec3::new(3.5, 0.5, 0.5));
    }

    #[test]
    fn test_empty_group_has_no_extent() {
        assert!(Group::new("empty").bounding_box().is_none());
    }
}
