//! Headless rendering API.
//!
//! Renders the tank scene to an image buffer or file without opening a
//! window. Useful for integration tests and batch screenshot generation.

use std::path::Path;

use pollster::FutureExt;
use tankview_core::{Result, SceneOptions, TankviewError};
use tankview_render::{RenderEngine, RenderError};

use crate::assembler::assemble_scene;
use crate::controller::{RenderOnDemand, Trigger};

fn render_error(err: RenderError) -> TankviewError {
    match err {
        RenderError::AdapterCreationFailed => TankviewError::CapabilityUnavailable(err.to_string()),
        other => TankviewError::RenderError(other.to_string()),
    }
}

/// Renders the scene to tightly packed RGBA8 pixels.
///
/// The buffer holds `width * height * 4` bytes, rows top to bottom.
///
/// # Example
/// ```no_run
/// use tankview::*;
///
/// let pixels = render_to_image(&SceneOptions::default(), 800, 600).unwrap();
/// assert_eq!(pixels.len(), 800 * 600 * 4);
/// ```
pub fn render_to_image(options: &SceneOptions, width: u32, height: u32) -> Result<Vec<u8>> {
    let engine = RenderEngine::new_headless(width, height)
        .block_on()
        .map_err(render_error)?;

    let mut assembled = assemble_scene(options, width, height);
    let mut controller = RenderOnDemand::new(engine);
    controller
        .trigger(&mut assembled.scene, Trigger::InitialLoad)
        .map_err(render_error)?;

    controller.surface().capture().map_err(render_error)
}

/// Renders the scene and saves it as PNG or JPEG, chosen by extension.
pub fn render_to_file(
    path: impl AsRef<Path>,
    options: &SceneOptions,
    width: u32,
    height: u32,
) -> Result<()> {
    let data = render_to_image(options, width, height)?;
    tankview_render::save_image(path, &data, width, height).map_err(render_error)
}
