//! Drawable trait and draw ordering.

use std::any::Any;

use glam::Mat4;

use crate::geometry::Aabb;
use crate::node::Node;

/// An object placed in the scene.
///
/// Drawables own their nodes; the renderer only ever borrows them through
/// [`Drawable::world_nodes`].
pub trait Drawable: Any {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the name of this drawable.
    fn name(&self) -> &str;

    /// Returns the type name of this drawable (e.g. "`Tank`").
    fn type_name(&self) -> &'static str;

    /// Returns every node with its world transform.
    fn world_nodes(&self) -> Vec<(&Node, Mat4)>;

    /// Returns the axis-aligned bounding box in world coordinates.
    fn bounding_box(&self) -> Option<Aabb> {
        self.world_nodes()
            .into_iter()
            .filter_map(|(node, world)| node.local_bounding_box().map(|bb| bb.transformed(&world)))
            .reduce(|a, b| a.union(&b))
    }
}

/// One node scheduled for drawing.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    /// Name of the drawable owning the node.
    pub owner: &'a str,
    /// The node to draw.
    pub node: &'a Node,
    /// World transform of the node.
    pub world: Mat4,
}

/// Flattens drawables into the order their nodes are drawn.
///
/// Items are sorted by ascending render order. Within one render order,
/// opaque nodes come before transparent ones and otherwise insertion order is
/// kept.
pub fn build_draw_list<'a, I>(drawables: I) -> Vec<DrawItem<'a>>
where
    I: IntoIterator<Item = &'a dyn Drawable>,
{
    let mut items: Vec<DrawItem<'a>> = drawables
        .into_iter()
        .flat_map(|drawable| {
            let owner = drawable.name();
            drawable
                .world_nodes()
                .into_iter()
                .map(move |(node, world)| DrawItem { owner, node, world })
        })
        .collect();

    items.sort_by_key(|item| (item.node.render_order(), item.node.is_transparent()));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{EdgesGeometry, Geometry};
    use crate::material::{Color, LineMaterial, SurfaceMaterial};
    use crate::node::{LineSegments, Mesh};

    struct Fixture {
        name: String,
        nodes: Vec<Node>,
    }

    impl Drawable for Fixture {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn type_name(&self) -> &'static str {
            "Fixture"
        }

        fn world_nodes(&self) -> Vec<(&Node, Mat4)> {
            self.nodes.iter().map(|n| (n, n.transform())).collect()
        }
    }

    fn mesh(name: &str, order: i32, transparent: bool) -> Node {
        let mut material = SurfaceMaterial::standard(Color::WHITE);
        if transparent {
            material = material.with_opacity(0.5);
        }
        let mut node = Node::from(Mesh::new(name, Geometry::cuboid(1.0, 1.0, 1.0), material));
        node.set_render_order(order);
        node
    }

    fn outline(name: &str, order: i32) -> Node {
        let geometry = Geometry::cuboid(1.0, 1.0, 1.0);
        let mut node = Node::from(LineSegments::new(
            name,
            EdgesGeometry::new(&geometry),
            LineMaterial::new(Color::BLACK),
        ));
        node.set_render_order(order);
        node
    }

    fn names(items: &[DrawItem<'_>]) -> Vec<String> {
        items.iter().map(|i| i.node.name().to_string()).collect()
    }

    #[test]
    fn test_sorted_by_render_order() {
        let a = Fixture {
            name: "a".into(),
            nodes: vec![mesh("high", 2, true)],
        };
        let b = Fixture {
            name: "b".into(),
            nodes: vec![mesh("low", 1, true)],
        };
        let list = build_draw_list([&a as &dyn Drawable, &b as &dyn Drawable]);
        assert_eq!(names(&list), ["low", "high"]);
        assert_eq!(list[0].owner, "b");
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let a = Fixture {
            name: "a".into(),
            nodes: vec![mesh("first", 0, true), mesh("second", 0, true)],
        };
        let b = Fixture {
            name: "b".into(),
            nodes: vec![mesh("third", 0, true)],
        };
        let list = build_draw_list([&a as &dyn Drawable, &b as &dyn Drawable]);
        assert_eq!(names(&list), ["first", "second", "third"]);
    }

    #[test]
    fn test_opaque_before_transparent_within_order() {
        let a = Fixture {
            name: "a".into(),
            nodes: vec![mesh("surface", 2, true), outline("outline", 2)],
        };
        let list = build_draw_list([&a as &dyn Drawable]);
        assert_eq!(names(&list), ["outline", "surface"]);
    }

    #[test]
    fn test_default_bounding_box() {
        let a = Fixture {
            name: "a".into(),
            nodes: vec![mesh("m", 0, false)],
        };
        let bb = a.bounding_box().unwrap();
        assert_eq!(bb.size(), glam::Vec3::ONE);
    }
}
