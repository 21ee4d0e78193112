//! Assembled scenes.
//!
//! A [`Scene`] is produced once by a [`SceneBuilder`] and is immutable in
//! content afterwards: only its camera can change.

use std::sync::atomic::{AtomicU64, Ordering};

use tankview_core::{build_draw_list, Aabb, Color, DrawItem, Drawable, Light};

use crate::camera::Camera;

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);

/// Collects the contents of a scene before it is frozen.
pub struct SceneBuilder {
    background: Color,
    camera: Camera,
    drawables: Vec<Box<dyn Drawable>>,
    lights: Vec<Light>,
}

impl SceneBuilder {
    /// Starts an empty scene viewed through `camera`.
    #[must_use]
    pub fn new(camera: Camera) -> Self {
        Self {
            background: Color::BLACK,
            camera,
            drawables: Vec::new(),
            lights: Vec::new(),
        }
    }

    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Adds an object. Objects keep the order they were added in.
    #[must_use]
    pub fn add(mut self, drawable: impl Drawable) -> Self {
        log::debug!("adding {} '{}'", drawable.type_name(), drawable.name());
        self.drawables.push(Box::new(drawable));
        self
    }

    #[must_use]
    pub fn light(mut self, light: impl Into<Light>) -> Self {
        self.lights.push(light.into());
        self
    }

    /// Freezes the scene.
    #[must_use]
    pub fn build(self) -> Scene {
        let id = NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "scene {id} built with {} objects and {} lights",
            self.drawables.len(),
            self.lights.len()
        );
        Scene {
            id,
            background: self.background,
            camera: self.camera,
            drawables: self.drawables,
            lights: self.lights,
        }
    }
}

/// Objects, lights and a camera ready to be drawn.
pub struct Scene {
    id: u64,
    background: Color,
    camera: Camera,
    drawables: Vec<Box<dyn Drawable>>,
    lights: Vec<Light>,
}

impl Scene {
    /// Process-unique identifier, used by renderers to cache GPU resources.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Returns the objects in insertion order.
    pub fn drawables(&self) -> impl Iterator<Item = &dyn Drawable> {
        self.drawables.iter().map(|d| &**d)
    }

    #[must_use]
    pub fn num_drawables(&self) -> usize {
        self.drawables.len()
    }

    /// Finds an object by name and concrete type.
    #[must_use]
    pub fn get<T: Drawable>(&self, name: &str) -> Option<&T> {
        self.drawables()
            .find(|d| d.name() == name)
            .and_then(|d| d.as_any().downcast_ref::<T>())
    }

    #[must_use]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Returns every node in the order it will be drawn.
    #[must_use]
    pub fn draw_list(&self) -> Vec<DrawItem<'_>> {
        build_draw_list(self.drawables())
    }

    /// Returns the union of all object bounds.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.drawables()
            .filter_map(|d| d.bounding_box())
            .reduce(|a, b| a.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use glam::{Mat4, Vec3};
    use tankview_core::{AmbientLight, Geometry, Mesh, Node, PointLight, SurfaceMaterial};

    use super::*;

    struct Block {
        name: String,
        node: Node,
    }

    impl Block {
        fn new(name: &str, order: i32) -> Self {
            let mut node = Node::from(Mesh::new(
                name,
                Geometry::cuboid(1.0, 1.0, 1.0),
                SurfaceMaterial::standard(Color::WHITE).with_opacity(0.5),
            ));
            node.set_render_order(order);
            Self {
                name: name.to_string(),
                node,
            }
        }
    }

    impl Drawable for Block {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn type_name(&self) -> &'static str {
            "Block"
        }

        fn world_nodes(&self) -> Vec<(&Node, Mat4)> {
            vec![(&self.node, self.node.transform())]
        }
    }

    #[test]
    fn test_build_scene() {
        let scene = SceneBuilder::new(Camera::default())
            .background(Color::from_hex(0x333333))
            .add(Block::new("a", 0))
            .light(AmbientLight::default())
            .light(PointLight::default())
            .build();

        assert_eq!(scene.num_drawables(), 1);
        assert_eq!(scene.lights().len(), 2);
        assert_eq!(scene.background().to_hex(), 0x333333);
        assert!(scene.get::<Block>("a").is_some());
        assert!(scene.get::<Block>("missing").is_none());
    }

    #[test]
    fn test_scene_ids_are_unique() {
        let a = SceneBuilder::new(Camera::default()).build();
        let b = SceneBuilder::new(Camera::default()).build();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_draw_list_follows_render_order() {
        let scene = SceneBuilder::new(Camera::default())
            .add(Block::new("late", 2))
            .add(Block::new("early", 1))
            .build();
        let names: Vec<_> = scene.draw_list().iter().map(|i| i.owner).collect();
        assert_eq!(names, ["early", "late"]);
    }

    #[test]
    fn test_empty_scene_has_no_bounds() {
        let scene = SceneBuilder::new(Camera::default()).build();
        assert!(scene.bounding_box().is_none());
        assert!(scene.draw_list().is_empty());
    }

    #[test]
    fn test_camera_is_mutable() {
        let mut scene = SceneBuilder::new(Camera::default()).build();
        scene.camera_mut().position = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(scene.camera().position, Vec3::new(1.0, 2.0, 3.0));
    }
}
