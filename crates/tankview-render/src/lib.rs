//! Rendering backend for tankview.
//!
//! This crate provides the wgpu-based rendering engine, including:
//! - A perspective [`Camera`] and [`OrbitControls`] that move it
//! - [`SceneBuilder`] / [`Scene`], the frozen set of drawables and lights
//! - [`RenderEngine`], drawing scenes to a window or an offscreen texture
//! - Capability probing and screenshot saving

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
// GPU sizes and counts are u32 on the wgpu side
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

pub mod camera;
pub mod capability;
pub mod engine;
pub mod error;
pub mod node_render;
pub mod orbit;
pub mod scene;
pub mod screenshot;

pub use camera::Camera;
pub use capability::{CapabilityProbe, WgpuProbe};
pub use engine::{CameraUniforms, LightUniforms, RenderEngine, MAX_POINT_LIGHTS};
pub use error::{RenderError, RenderResult};
pub use node_render::{NodeRenderData, NodeUniforms, PipelineKind};
pub use orbit::{ControlEvent, ControlInput, OrbitControls};
pub use scene::{Scene, SceneBuilder};
pub use screenshot::{encode_png, save_image};
