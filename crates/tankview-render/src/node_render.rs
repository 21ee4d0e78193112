//! GPU resources for scene nodes.

use glam::{Mat4, Vec3};
use tankview_core::{Node, Shading, Side};
use wgpu::util::DeviceExt;

/// Per-node uniforms.
/// Layout must match WGSL `NodeUniforms` exactly (160 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct NodeUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// 1 if the node is shaded by the scene lights.
    pub lit: u32,
    pub _padding: [u32; 3],
}

impl NodeUniforms {
    /// Builds uniforms for a node placed at `world`.
    #[must_use]
    pub fn new(node: &Node, world: Mat4) -> Self {
        let (color, lit) = match node {
            Node::Mesh(mesh) => (
                mesh.material().rgba(),
                u32::from(mesh.material().shading == Shading::Lit),
            ),
            Node::Lines(lines) => (lines.material().rgba(), 0),
        };
        Self {
            model: world.to_cols_array_2d(),
            normal_matrix: world.inverse().transpose().to_cols_array_2d(),
            color,
            lit,
            _padding: [0; 3],
        }
    }
}

/// Which pipeline variant a draw uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    /// Triangles, back faces culled.
    CullBack,
    /// Triangles, front faces culled.
    CullFront,
    /// Triangles, nothing culled.
    CullNone,
    /// Line list.
    Lines,
}

/// Returns the pipelines a node is drawn with, in order.
///
/// Transparent double-sided surfaces are drawn in two passes, back faces
/// first, so the far side of the surface is composited before the near side.
#[must_use]
pub fn passes_for(node: &Node) -> Vec<PipelineKind> {
    match node {
        Node::Lines(_) => vec![PipelineKind::Lines],
        Node::Mesh(mesh) => match mesh.material().side {
            Side::Front => vec![PipelineKind::CullBack],
            Side::Back => vec![PipelineKind::CullFront],
            Side::Double if mesh.material().transparent => {
                vec![PipelineKind::CullFront, PipelineKind::CullBack]
            }
            Side::Double => vec![PipelineKind::CullNone],
        },
    }
}

fn to_vec4_data(points: &[Vec3]) -> Vec<f32> {
    points.iter().flat_map(|p| [p.x, p.y, p.z, 1.0]).collect()
}

/// GPU buffers and bind group for one node.
pub struct NodeRenderData {
    /// Vertex positions (storage buffer, vec4 for alignment).
    pub position_buffer: wgpu::Buffer,
    /// Vertex normals (storage buffer, vec4). Zero for lines.
    pub normal_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub vertex_count: u32,
    pub passes: Vec<PipelineKind>,
}

impl NodeRenderData {
    /// Uploads a node. Returns `None` for nodes without vertices.
    ///
    /// Bindings:
    /// 0: camera uniforms, 1: light uniforms, 2: node uniforms,
    /// 3: positions, 4: normals
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        light_buffer: &wgpu::Buffer,
        node: &Node,
        world: Mat4,
    ) -> Option<Self> {
        let (positions, normals) = match node {
            Node::Mesh(mesh) => mesh.geometry().expanded(),
            Node::Lines(lines) => {
                let positions = lines.geometry().line_positions();
                let normals = vec![Vec3::ZERO; positions.len()];
                (positions, normals)
            }
        };
        if positions.is_empty() {
            log::debug!("skipping empty node '{}'", node.name());
            return None;
        }

        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("node positions"),
            contents: bytemuck::cast_slice(&to_vec4_data(&positions)),
            usage: wgpu::BufferUsages::STORAGE,
        });
        let normal_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("node normals"),
            contents: bytemuck::cast_slice(&to_vec4_data(&normals)),
            usage: wgpu::BufferUsages::STORAGE,
        });
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("node uniforms"),
            contents: bytemuck::cast_slice(&[NodeUniforms::new(node, world)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("node bind group"),
            layout: bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: position_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: normal_buffer.as_entire_binding(),
                },
            ],
        });

        Some(Self {
            position_buffer,
            normal_buffer,
            uniform_buffer,
            bind_group,
            vertex_count: positions.len() as u32,
            passes: passes_for(node),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tankview_core::{
        Color, EdgesGeometry, Geometry, LineMaterial, LineSegments, Mesh, SurfaceMaterial,
    };

    fn mesh(material: SurfaceMaterial) -> Node {
        Node::from(Mesh::new("m", Geometry::cuboid(1.0, 1.0, 1.0), material))
    }

    #[test]
    fn test_node_uniforms_size() {
        assert_eq!(std::mem::size_of::<NodeUniforms>(), 160);
    }

    #[test]
    fn test_transparent_double_sided_draws_back_then_front() {
        let node = mesh(
            SurfaceMaterial::standard(Color::WHITE)
                .with_opacity(0.3)
                .with_side(Side::Double),
        );
        assert_eq!(
            passes_for(&node),
            [PipelineKind::CullFront, PipelineKind::CullBack]
        );
    }

    #[test]
    fn test_opaque_passes() {
        let front = mesh(SurfaceMaterial::standard(Color::WHITE));
        assert_eq!(passes_for(&front), [PipelineKind::CullBack]);

        let double = mesh(SurfaceMaterial::standard(Color::WHITE).with_side(Side::Double));
        assert_eq!(passes_for(&double), [PipelineKind::CullNone]);
    }

    #[test]
    fn test_lines_are_unlit() {
        let geometry = Geometry::cuboid(1.0, 1.0, 1.0);
        let node = Node::from(LineSegments::new(
            "outline",
            EdgesGeometry::new(&geometry),
            LineMaterial::new(Color::BLACK),
        ));
        let uniforms = NodeUniforms::new(&node, Mat4::IDENTITY);
        assert_eq!(uniforms.lit, 0);
        assert_eq!(uniforms.color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(passes_for(&node), [PipelineKind::Lines]);
    }

    #[test]
    fn test_transparent_mesh_uniform_alpha() {
        let node = mesh(SurfaceMaterial::standard(Color::WHITE).with_opacity(0.3));
        let uniforms = NodeUniforms::new(&node, Mat4::IDENTITY);
        assert_eq!(uniforms.lit, 1);
        assert!((uniforms.color[3] - 0.3).abs() < 1e-6);
    }
}
