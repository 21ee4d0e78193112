//! The main rendering engine.

mod capture;
mod pipelines;
mod rendering;

use std::num::NonZeroU64;
use std::sync::Arc;

use tankview_core::Light;
use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use crate::node_render::NodeRenderData;

pub use pipelines::ScenePipelines;

/// Most point lights the shader evaluates.
pub const MAX_POINT_LIGHTS: usize = 4;

/// Depth buffer format shared by all pipelines.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Color format of the headless target.
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Camera uniforms for GPU.
/// Layout must match WGSL `Camera` exactly (208 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
}

impl CameraUniforms {
    #[must_use]
    pub fn new(camera: &Camera) -> Self {
        let view = camera.view_matrix();
        let proj = camera.projection_matrix();
        Self {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            view_proj: (proj * view).to_cols_array_2d(),
            camera_pos: camera.position.extend(1.0).to_array(),
        }
    }
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self::new(&Camera::default())
    }
}

/// One point light as seen by the shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniforms {
    /// xyz = position, w = cutoff distance.
    pub position_range: [f32; 4],
    /// rgb = color * intensity, a = decay exponent.
    pub color_decay: [f32; 4],
}

/// Light uniforms for GPU.
/// Layout must match WGSL `Lights` exactly (160 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct LightUniforms {
    pub ambient: [f32; 4],
    pub point_count: u32,
    pub _padding: [u32; 3],
    pub points: [PointLightUniforms; MAX_POINT_LIGHTS],
}

impl LightUniforms {
    /// Packs scene lights. Ambient lights add up; point lights past
    /// [`MAX_POINT_LIGHTS`] are dropped with a warning.
    #[must_use]
    pub fn new(lights: &[Light]) -> Self {
        let mut uniforms = Self::default();
        let mut count = 0;
        for light in lights {
            match light {
                Light::Ambient(ambient) => {
                    for (dst, src) in uniforms.ambient.iter_mut().zip(ambient.color.to_array()) {
                        *dst += src * ambient.intensity;
                    }
                }
                Light::Point(point) if count < MAX_POINT_LIGHTS => {
                    let [r, g, b] = point.color.to_array();
                    uniforms.points[count] = PointLightUniforms {
                        position_range: point.position.extend(point.distance).to_array(),
                        color_decay: [
                            r * point.intensity,
                            g * point.intensity,
                            b * point.intensity,
                            point.decay,
                        ],
                    };
                    count += 1;
                }
                Light::Point(_) => {
                    log::warn!("more than {MAX_POINT_LIGHTS} point lights, extra lights ignored");
                }
            }
        }
        uniforms.point_count = count as u32;
        uniforms
    }
}

/// GPU resources of the scene currently uploaded.
pub(crate) struct PreparedScene {
    pub scene_id: u64,
    /// Node resources in draw order.
    pub nodes: Vec<NodeRenderData>,
}

/// Color target used when there is no window.
pub(crate) struct OffscreenTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

/// The main rendering engine backed by wgpu.
pub struct RenderEngine {
    /// The wgpu instance.
    pub instance: wgpu::Instance,
    /// The wgpu adapter.
    pub adapter: wgpu::Adapter,
    /// The wgpu device.
    pub device: wgpu::Device,
    /// The wgpu queue.
    pub queue: wgpu::Queue,
    /// The render surface (None for headless).
    pub surface: Option<wgpu::Surface<'static>>,
    /// Surface configuration. For headless engines this only records the
    /// size and color format of the offscreen target.
    pub surface_config: wgpu::SurfaceConfiguration,
    /// Depth texture.
    pub depth_texture: wgpu::Texture,
    /// Depth texture view.
    pub depth_view: wgpu::TextureView,
    /// Current viewport width.
    pub width: u32,
    /// Current viewport height.
    pub height: u32,
    /// Camera uniform buffer.
    pub camera_buffer: wgpu::Buffer,
    /// Light uniform buffer.
    pub light_buffer: wgpu::Buffer,
    pub(crate) pipelines: ScenePipelines,
    pub(crate) prepared: Option<PreparedScene>,
    pub(crate) offscreen: Option<OffscreenTarget>,
}

impl RenderEngine {
    /// Creates a new windowed render engine.
    pub async fn new_windowed(window: Arc<winit::window::Window>) -> RenderResult<Self> {
        let instance = Self::create_instance();
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::AdapterCreationFailed)?;

        let (device, queue) = Self::request_device(&adapter, "tankview device").await?;

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| RenderError::Surface("surface reports no formats".to_string()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        log::info!("window surface {width}x{height} ({surface_format:?})");

        Ok(Self::assemble(
            instance,
            adapter,
            device,
            queue,
            Some(surface),
            surface_config,
        ))
    }

    /// Creates a render engine that draws into an offscreen texture.
    pub async fn new_headless(width: u32, height: u32) -> RenderResult<Self> {
        let instance = Self::create_instance();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::AdapterCreationFailed)?;

        let (device, queue) = Self::request_device(&adapter, "tankview device (headless)").await?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            format: OFFSCREEN_FORMAT,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let mut engine = Self::assemble(instance, adapter, device, queue, None, surface_config);
        engine.offscreen = Some(engine.create_offscreen_target());
        Ok(engine)
    }

    fn create_instance() -> wgpu::Instance {
        wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        })
    }

    async fn request_device(
        adapter: &wgpu::Adapter,
        label: &str,
    ) -> RenderResult<(wgpu::Device, wgpu::Queue)> {
        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        Ok(adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some(label),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await?)
    }

    fn assemble(
        instance: wgpu::Instance,
        adapter: wgpu::Adapter,
        device: wgpu::Device,
        queue: wgpu::Queue,
        surface: Option<wgpu::Surface<'static>>,
        surface_config: wgpu::SurfaceConfiguration,
    ) -> Self {
        let width = surface_config.width;
        let height = surface_config.height;
        let (depth_texture, depth_view) = Self::create_depth_texture(&device, width, height);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera uniforms"),
            contents: bytemuck::cast_slice(&[CameraUniforms::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("light uniforms"),
            contents: bytemuck::cast_slice(&[LightUniforms::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let pipelines = ScenePipelines::new(&device, surface_config.format);

        Self {
            instance,
            adapter,
            device,
            queue,
            surface,
            surface_config,
            depth_texture,
            depth_view,
            width,
            height,
            camera_buffer,
            light_buffer,
            pipelines,
            prepared: None,
            offscreen: None,
        }
    }

    /// Resizes the render target. Zero-sized requests are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring resize to {width}x{height}");
            return;
        }

        self.width = width;
        self.height = height;
        self.surface_config.width = width;
        self.surface_config.height = height;

        if let Some(ref surface) = self.surface {
            surface.configure(&self.device, &self.surface_config);
        }
        if self.offscreen.is_some() {
            self.offscreen = Some(self.create_offscreen_target());
        }

        let (depth_texture, depth_view) = Self::create_depth_texture(&self.device, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    fn create_offscreen_target(&self) -> OffscreenTarget {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen color"),
            size: wgpu::Extent3d {
                width: self.surface_config.width,
                height: self.surface_config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        OffscreenTarget { texture, view }
    }

    /// Uploads camera uniforms.
    pub fn update_camera_uniforms(&self, camera: &Camera) {
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniforms::new(camera)]),
        );
    }

    /// Uploads light uniforms.
    pub fn update_light_uniforms(&self, lights: &[Light]) {
        self.queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::cast_slice(&[LightUniforms::new(lights)]),
        );
    }

    /// Returns the viewport dimensions.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns true if the engine renders into a window.
    #[must_use]
    pub fn is_windowed(&self) -> bool {
        self.surface.is_some()
    }
}

/// Minimum binding sizes checked by the bind group layout.
pub(crate) const CAMERA_UNIFORM_SIZE: Option<NonZeroU64> =
    NonZeroU64::new(std::mem::size_of::<CameraUniforms>() as u64);
pub(crate) const LIGHT_UNIFORM_SIZE: Option<NonZeroU64> =
    NonZeroU64::new(std::mem::size_of::<LightUniforms>() as u64);
pub(crate) const NODE_UNIFORM_SIZE: Option<NonZeroU64> =
    NonZeroU64::new(std::mem::size_of::<crate::node_render::NodeUniforms>() as u64);

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use tankview_core::{AmbientLight, Color, PointLight};

    #[test]
    fn test_uniform_sizes_match_shader() {
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 208);
        assert_eq!(std::mem::size_of::<LightUniforms>(), 160);
    }

    #[test]
    fn test_light_packing() {
        let lights = [
            Light::from(AmbientLight::new(Color::WHITE, 0.5)),
            Light::from(PointLight::new(Color::WHITE, 2.0, 100.0).at(Vec3::new(10.0, 10.0, 10.0))),
        ];
        let uniforms = LightUniforms::new(&lights);
        assert_eq!(uniforms.ambient[..3], [0.5, 0.5, 0.5]);
        assert_eq!(uniforms.point_count, 1);
        assert_eq!(uniforms.points[0].position_range, [10.0, 10.0, 10.0, 100.0]);
        assert_eq!(uniforms.points[0].color_decay, [2.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_extra_point_lights_are_dropped() {
        let lights: Vec<Light> = (0..6).map(|_| PointLight::default().into()).collect();
        assert_eq!(LightUniforms::new(&lights).point_count, MAX_POINT_LIGHTS as u32);
    }

    #[test]
    fn test_headless_engine_creation() {
        let result = pollster::block_on(RenderEngine::new_headless(64, 48));
        let Ok(engine) = result else {
            eprintln!("skipping: no graphics adapter");
            return;
        };
        assert_eq!(engine.dimensions(), (64, 48));
        assert!(!engine.is_windowed());
    }

    #[test]
    fn test_resize_ignores_zero() {
        let Ok(mut engine) = pollster::block_on(RenderEngine::new_headless(64, 48)) else {
            eprintln!("skipping: no graphics adapter");
            return;
        };
        engine.resize(0, 100);
        assert_eq!(engine.dimensions(), (64, 48));
        engine.resize(32, 16);
        assert_eq!(engine.dimensions(), (32, 16));
    }
}
