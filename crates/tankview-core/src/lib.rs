//! Core abstractions for tankview.
//!
//! This crate provides the renderer-independent pieces of the scene:
//! - [`Geometry`] and [`EdgesGeometry`] for CPU-side triangle and outline data
//! - [`SurfaceMaterial`] / [`LineMaterial`] and sRGB-aware [`Color`]s
//! - [`Node`] and [`Group`] scene nodes carrying a render order
//! - The [`Drawable`] trait and the ordered draw list built from drawables
//! - Lights and the serde-backed [`SceneOptions`] / [`AppOptions`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Geometry generation converts segment counts to floats
#![allow(clippy::cast_precision_loss)]

pub mod drawable;
pub mod error;
pub mod geometry;
pub mod light;
pub mod material;
pub mod node;
pub mod options;

pub use drawable::{build_draw_list, DrawItem, Drawable};
pub use error::{Result, TankviewError};
pub use geometry::{Aabb, EdgesGeometry, Geometry, DEFAULT_EDGE_THRESHOLD_DEGREES};
pub use light::{AmbientLight, Light, PointLight};
pub use material::{Color, LineMaterial, Shading, Side, SurfaceMaterial};
pub use node::{Group, LineSegments, Mesh, Node, RenderOrder};
pub use options::{AppOptions, CameraOptions, ControlOptions, ParticleOptions, SceneOptions, TankOptions};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec3, Vec4};
