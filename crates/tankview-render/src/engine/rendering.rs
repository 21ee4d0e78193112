//! Scene upload and frame rendering.

use tankview_core::Color;

use super::{PreparedScene, RenderEngine};
use crate::error::{RenderError, RenderResult};
use crate::node_render::NodeRenderData;
use crate::scene::Scene;

impl RenderEngine {
    /// Uploads the scene's nodes unless this scene is already resident.
    ///
    /// Scene content is fixed after assembly, so node buffers are built once
    /// per scene and reused by every later frame.
    pub fn prepare(&mut self, scene: &Scene) {
        if self
            .prepared
            .as_ref()
            .is_some_and(|prepared| prepared.scene_id == scene.id())
        {
            return;
        }

        let nodes: Vec<NodeRenderData> = scene
            .draw_list()
            .into_iter()
            .filter_map(|item| {
                NodeRenderData::new(
                    &self.device,
                    &self.pipelines.bind_group_layout,
                    &self.camera_buffer,
                    &self.light_buffer,
                    item.node,
                    item.world,
                )
            })
            .collect();

        log::debug!("uploaded scene {} ({} nodes)", scene.id(), nodes.len());
        self.prepared = Some(PreparedScene {
            scene_id: scene.id(),
            nodes,
        });
    }

    /// Draws one frame of the scene with its current camera.
    ///
    /// Windowed engines present to the surface; headless engines draw into
    /// the offscreen target, which [`RenderEngine::capture`] reads back.
    pub fn render(&mut self, scene: &Scene) -> RenderResult<()> {
        self.prepare(scene);
        self.update_camera_uniforms(scene.camera());
        self.update_light_uniforms(scene.lights());

        if let Some(surface) = &self.surface {
            let frame = match surface.get_current_texture() {
                Ok(frame) => frame,
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::debug!("surface lost or outdated, reconfiguring");
                    surface.configure(&self.device, &self.surface_config);
                    surface.get_current_texture()?
                }
                Err(err) => return Err(err.into()),
            };
            let view = frame
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());
            self.encode_scene(&view, scene.background());
            frame.present();
            Ok(())
        } else {
            let target = self
                .offscreen
                .as_ref()
                .ok_or(RenderError::NoOffscreenTarget)?;
            self.encode_scene(&target.view, scene.background());
            Ok(())
        }
    }

    fn encode_scene(&self, view: &wgpu::TextureView, background: Color) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(background.r),
                            g: f64::from(background.g),
                            b: f64::from(background.b),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            if let Some(prepared) = &self.prepared {
                for node in &prepared.nodes {
                    render_pass.set_bind_group(0, &node.bind_group, &[]);
                    for &kind in &node.passes {
                        render_pass.set_pipeline(self.pipelines.get(kind));
                        render_pass.draw(0..node.vertex_count, 0..1);
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }
}
