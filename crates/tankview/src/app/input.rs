use std::sync::Arc;

use pollster::FutureExt;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use tankview_core::TankviewError;
use tankview_render::{ControlEvent, ControlInput, RenderEngine, RenderError, RenderResult};

use super::App;
use crate::controller::{RenderOnDemand, Trigger};
use crate::startup::{start, Startup};

impl App {
    /// Applies a trigger now and asks the window for a redraw event, which
    /// draws the pending frame. Duplicate redraw events find nothing pending.
    fn schedule(&mut self, trigger: Trigger) {
        let (Some(controller), Some(assembled)) = (&mut self.controller, &mut self.assembled)
        else {
            return;
        };
        controller.schedule(&mut assembled.scene, trigger);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Draws immediately through the controller.
    fn redraw(&mut self, event_loop: &ActiveEventLoop, trigger: Trigger) {
        let (Some(controller), Some(assembled)) = (&mut self.controller, &mut self.assembled)
        else {
            return;
        };
        let result = controller.trigger(&mut assembled.scene, trigger);
        self.handle_render_result(event_loop, result);
    }

    /// Draws the pending frame, if any.
    fn redraw_pending(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(controller), Some(assembled)) = (&mut self.controller, &self.assembled) else {
            return;
        };
        let result = controller.render_if_requested(&assembled.scene);
        self.handle_render_result(event_loop, result);
    }

    fn handle_render_result(&mut self, event_loop: &ActiveEventLoop, result: RenderResult<bool>) {
        if let Err(err) = result {
            log::error!("render failed: {err}");
            if matches!(err, RenderError::OutOfMemory) {
                self.fatal_error = Some(TankviewError::RenderError(err.to_string()));
                event_loop.exit();
            }
        }
    }

    /// Feeds a gesture to the orbit controls and redraws if the camera moved.
    fn apply_control(&mut self, event_loop: &ActiveEventLoop, input: ControlInput) {
        let Some(assembled) = &mut self.assembled else {
            return;
        };
        let camera = assembled.scene.camera_mut();
        if assembled.controls.handle(camera, input) == Some(ControlEvent::Changed) {
            self.redraw(event_loop, Trigger::ControlsChanged);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.fallback.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(LogicalSize::new(self.options.width, self.options.height));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.fatal_error = Some(TankviewError::RenderError(format!(
                    "failed to create window: {err}"
                )));
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let assembled = match start(
            self.probe.as_ref(),
            &self.options.scene,
            size.width,
            size.height,
        ) {
            Startup::Scene(assembled) => *assembled,
            Startup::Fallback(notice) => {
                self.fallback = Some(notice);
                event_loop.exit();
                return;
            }
        };

        let engine = match RenderEngine::new_windowed(window.clone()).block_on() {
            Ok(engine) => engine,
            Err(err) => {
                self.fatal_error = Some(TankviewError::RenderError(format!(
                    "failed to create render engine: {err}"
                )));
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.controller = Some(RenderOnDemand::new(engine));
        self.assembled = Some(assembled);
        self.schedule(Trigger::InitialLoad);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.schedule(Trigger::Resized {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::RedrawRequested => {
                self.redraw_pending(event_loop);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.pointer.set_shift(modifiers.state().shift_key());
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.pointer.set_button(button, state == ElementState::Pressed);
            }
            WindowEvent::CursorEntered { .. } | WindowEvent::CursorLeft { .. } => {
                self.pointer.reset_position();
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(input) = self.pointer.moved(position.x, position.y) {
                    self.apply_control(event_loop, input);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                self.apply_control(event_loop, ControlInput::Zoom { lines });
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}
