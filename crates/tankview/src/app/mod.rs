//! Application window and event loop management.

mod input;
mod pointer;

use std::sync::Arc;

use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::Window;

use tankview_core::{AppOptions, Result, TankviewError};
use tankview_render::{CapabilityProbe, RenderEngine, WgpuProbe};

use crate::assembler::AssembledScene;
use crate::controller::RenderOnDemand;
use crate::startup::FallbackNotice;
use pointer::PointerState;

/// The viewer application state.
pub struct App {
    pub(super) options: AppOptions,
    pub(super) probe: Box<dyn CapabilityProbe>,
    pub(super) window: Option<Arc<Window>>,
    pub(super) controller: Option<RenderOnDemand<RenderEngine>>,
    pub(super) assembled: Option<AssembledScene>,
    pub(super) fallback: Option<FallbackNotice>,
    pub(super) fatal_error: Option<TankviewError>,
    // Mouse state for camera control
    pub(super) pointer: PointerState,
}

impl App {
    /// Creates a new application probing for a wgpu adapter.
    pub fn new(options: AppOptions) -> Self {
        Self::with_probe(options, Box::new(WgpuProbe::new()))
    }

    pub fn with_probe(options: AppOptions, probe: Box<dyn CapabilityProbe>) -> Self {
        Self {
            options,
            probe,
            window: None,
            controller: None,
            assembled: None,
            fallback: None,
            fatal_error: None,
            pointer: PointerState::default(),
        }
    }

    /// Converts the way the event loop ended into a result.
    fn finish(self) -> Result<()> {
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        if let Some(notice) = self.fallback {
            return Err(TankviewError::CapabilityUnavailable(notice.message().to_string()));
        }
        Ok(())
    }
}

/// Runs the viewer until its window is closed.
pub fn run_app(options: AppOptions) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| TankviewError::RenderError(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(options);
    event_loop
        .run_app(&mut app)
        .map_err(|e| TankviewError::RenderError(e.to_string()))?;
    app.finish()
}
