//! CPU-side geometry: boxes, spheres and their edge outlines.

use std::collections::HashMap;
use std::f32::consts::PI;

use glam::{Mat4, Vec3};

/// Angle (degrees) above which the edge between two faces is outlined.
pub const DEFAULT_EDGE_THRESHOLD_DEGREES: f32 = 1.0;

/// Decimal digits kept when matching vertex positions across faces,
/// measured relative to the geometry's extent along each axis.
const EDGE_PRECISION_DIGITS: i32 = 4;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Computes the box enclosing all points, or `None` for an empty set.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    /// Returns the box size along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns the box center.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the axis-aligned box enclosing this box after a transform.
    #[must_use]
    pub fn transformed(&self, transform: &Mat4) -> Aabb {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
        .map(|c| transform.transform_point3(c));
        // Eight corners, never empty
        Aabb::from_points(&corners).unwrap_or(*self)
    }
}

/// Indexed triangle geometry with per-vertex normals.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Geometry {
    /// Creates geometry from raw buffers.
    ///
    /// `indices` holds three entries per counter-clockwise triangle.
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        debug_assert_eq!(indices.len() % 3, 0);
        Self {
            positions,
            normals,
            indices,
        }
    }

    /// A box centered at the origin, one quad per face.
    ///
    /// Faces do not share vertices so each keeps a flat normal.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) * 0.5;
        let extent = |axis: Vec3| axis.abs().dot(half);

        // (normal, u, v) with u x v == normal so the quads wind counter-clockwise
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u, v) in faces {
            let center = normal * extent(normal);
            let du = u * extent(u);
            let dv = v * extent(v);
            let base = positions.len() as u32;

            positions.extend_from_slice(&[
                center - du - dv,
                center + du - dv,
                center + du + dv,
                center - du + dv,
            ]);
            normals.extend_from_slice(&[normal; 4]);
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(positions, normals, indices)
    }

    /// A UV sphere centered at the origin.
    ///
    /// Produces `(width_segments + 1) * (height_segments + 1)` vertices; the
    /// degenerate triangles at the poles are skipped.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut grid = Vec::with_capacity(height_segments as usize + 1);

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = v * PI;
            let mut row = Vec::with_capacity(width_segments as usize + 1);

            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * 2.0 * PI;
                let position = Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                );
                row.push(positions.len() as u32);
                normals.push(position.normalize_or_zero());
                positions.push(position);
            }
            grid.push(row);
        }

        let mut indices = Vec::new();
        for iy in 0..height_segments as usize {
            for ix in 0..width_segments as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments as usize - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self::new(positions, normals, indices)
    }

    /// Returns the vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Returns the vertex normals.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Returns the triangle indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over triangles as position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// Expands the indexed triangles into flat per-corner positions and normals.
    pub fn expanded(&self) -> (Vec<Vec3>, Vec<Vec3>) {
        self.indices
            .iter()
            .map(|&i| (self.positions[i as usize], self.normals[i as usize]))
            .unzip()
    }

    /// Returns the bounding box of the vertex positions.
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }
}

/// Line segments along the creases of a triangle geometry.
///
/// An edge is kept when it borders a single triangle or when the normals of
/// the two triangles sharing it differ by more than the threshold angle.
/// Segment endpoints are copied from the source positions, never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgesGeometry {
    segments: Vec<[Vec3; 2]>,
    threshold_degrees: f32,
}

impl EdgesGeometry {
    /// Outlines `geometry` with the default 1 degree threshold.
    pub fn new(geometry: &Geometry) -> Self {
        Self::with_threshold(geometry, DEFAULT_EDGE_THRESHOLD_DEGREES)
    }

    /// Outlines `geometry`, keeping edges sharper than `threshold_degrees`.
    pub fn with_threshold(geometry: &Geometry, threshold_degrees: f32) -> Self {
        let threshold_dot = threshold_degrees.to_radians().cos();
        let scale = 10f32.powi(EDGE_PRECISION_DIGITS);
        // Normalize each axis to [0, 1] so thin geometry keeps distinct corners
        let (origin, inv_extent) = geometry.bounding_box().map_or((Vec3::ZERO, Vec3::ONE), |bb| {
            let size = bb.size();
            let inv = |s: f32| if s > 0.0 { s.recip() } else { 1.0 };
            (bb.min, Vec3::new(inv(size.x), inv(size.y), inv(size.z)))
        });
        #[allow(clippy::cast_possible_truncation)]
        let key = |p: Vec3| ((p - origin) * inv_extent * scale).round().as_ivec3().to_array();

        // Open edges waiting for their twin: (from, to) -> (normal, endpoints)
        let mut open: HashMap<([i32; 3], [i32; 3]), (Vec3, [Vec3; 2])> = HashMap::new();
        let mut segments = Vec::new();

        for tri in geometry.triangles() {
            let keys = tri.map(key);
            if keys[0] == keys[1] || keys[1] == keys[2] || keys[2] == keys[0] {
                continue;
            }
            let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();

            for j in 0..3 {
                let next = (j + 1) % 3;
                let (from, to) = (keys[j], keys[next]);
                if let Some((twin_normal, endpoints)) = open.remove(&(to, from)) {
                    if normal.dot(twin_normal) <= threshold_dot {
                        segments.push(endpoints);
                    }
                } else if !open.contains_key(&(from, to)) {
                    open.insert((from, to), (normal, [tri[j], tri[next]]));
                }
            }
        }

        // Boundary edges have no twin and are always outlined
        let mut boundary: Vec<_> = open.into_iter().collect();
        boundary.sort_by_key(|(k, _)| *k);
        segments.extend(boundary.into_iter().map(|(_, (_, endpoints))| endpoints));

        log::trace!(
            "outlined {} triangles into {} segments",
            geometry.num_triangles(),
            segments.len()
        );

        Self {
            segments,
            threshold_degrees,
        }
    }

    /// Returns the outline segments.
    pub fn segments(&self) -> &[[Vec3; 2]] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Returns the crease threshold in degrees.
    pub fn threshold_degrees(&self) -> f32 {
        self.threshold_degrees
    }

    /// Returns the segment endpoints as a flat line list.
    pub fn line_positions(&self) -> Vec<Vec3> {
        self.segments.iter().flatten().copied().collect()
    }

    /// Returns the bounding box of all segment endpoints.
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.segments.iter().flatten())
    }
}
