//! Render-on-demand redraw policy.
//!
//! Nothing is drawn on a timer. Every [`Trigger`] marks a repaint as pending.
//! [`RenderOnDemand::trigger`] performs it right away, so each trigger results
//! in exactly one redraw with the camera as it is at that moment. A host whose
//! windowing system delivers its own redraw events can instead
//! [`schedule`](RenderOnDemand::schedule) the trigger and draw the pending
//! frame on the next such event, so duplicate events never draw twice.

use tankview_render::{RenderEngine, RenderResult, Scene};

/// Something that can draw a scene.
pub trait RenderSurface {
    /// Resizes the drawing target. Zero-sized requests may be ignored.
    fn resize(&mut self, width: u32, height: u32);

    /// Returns the current target size in pixels.
    fn size(&self) -> (u32, u32);

    /// Draws one frame.
    fn render(&mut self, scene: &Scene) -> RenderResult<()>;
}

impl RenderSurface for RenderEngine {
    fn resize(&mut self, width: u32, height: u32) {
        RenderEngine::resize(self, width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn render(&mut self, scene: &Scene) -> RenderResult<()> {
        RenderEngine::render(self, scene)
    }
}

/// Events that require a repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The scene was just assembled.
    InitialLoad,
    /// Orbit controls moved the camera.
    ControlsChanged,
    /// The viewport changed size.
    Resized { width: u32, height: u32 },
}

/// Redraws a scene only when a trigger asks for it.
pub struct RenderOnDemand<S> {
    surface: S,
    render_requested: bool,
    redraw_count: u64,
}

impl<S: RenderSurface> RenderOnDemand<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            render_requested: false,
            redraw_count: 0,
        }
    }

    /// Handles a trigger. Returns true if a frame was drawn.
    ///
    /// On resize the surface is resized first, then the camera aspect ratio
    /// and projection are updated, then the frame is drawn.
    pub fn trigger(&mut self, scene: &mut Scene, trigger: Trigger) -> RenderResult<bool> {
        self.schedule(scene, trigger);
        self.render_if_requested(scene)
    }

    /// Applies the state change of a trigger and marks a repaint as pending
    /// without drawing. Several scheduled triggers share one pending frame.
    pub fn schedule(&mut self, scene: &mut Scene, trigger: Trigger) {
        log::trace!("trigger {trigger:?}");
        if let Trigger::Resized { width, height } = trigger {
            self.surface.resize(width, height);
            let (width, height) = self.surface.size();
            let camera = scene.camera_mut();
            camera.set_aspect_ratio(width as f32 / height.max(1) as f32);
            camera.update_projection_matrix();
        }
        self.request_render();
    }

    /// Marks a repaint as pending without drawing.
    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Draws a frame if one is pending. The pending flag is cleared before
    /// drawing, even if drawing fails.
    pub fn render_if_requested(&mut self, scene: &Scene) -> RenderResult<bool> {
        if !self.render_requested {
            return Ok(false);
        }
        self.render_requested = false;
        self.surface.render(scene)?;
        self.redraw_count += 1;
        Ok(true)
    }

    pub fn is_render_requested(&self) -> bool {
        self.render_requested
    }

    /// Number of frames drawn so far.
    pub fn redraw_count(&self) -> u64 {
        self.redraw_count
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
