//! tankview: a render-on-demand viewer for a particle inside a translucent tank.
//!
//! The scene is static. A cuboid tank with translucent walls and a black
//! wireframe outline surrounds a small sphere, lit by an ambient light and a
//! point light. The only thing that ever changes is the camera, which orbits,
//! pans and zooms around the tank. Frames are drawn only when something asks
//! for one: the initial load, a camera change, or a resize. Each of these
//! yields exactly one frame, however many redraw events the windowing system
//! sends for it.
//!
//! # Quick Start
//!
//! ```no_run
//! fn main() -> tankview::Result<()> {
//!     tankview::show()
//! }
//! ```
//!
//! # Headless rendering
//!
//! ```no_run
//! use tankview::*;
//!
//! render_to_file("tank.png", &SceneOptions::default(), 800, 600)?;
//! # Ok::<(), TankviewError>(())
//! ```

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
// Pixel sizes are converted to floats for aspect ratios and mouse deltas
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

mod app;
pub mod assembler;
pub mod controller;
pub mod headless;
pub mod startup;

use std::path::Path;

// Re-export core types
pub use tankview_core::{
    AmbientLight, AppOptions, CameraOptions, Color, ControlOptions, Drawable, Light, Node,
    ParticleOptions, PointLight, RenderOrder, Result, SceneOptions, Side, TankOptions,
    TankviewError, Vec3,
};

// Re-export render types
pub use tankview_render::{
    Camera, CapabilityProbe, ControlEvent, ControlInput, OrbitControls, RenderEngine, RenderError,
    RenderResult, Scene, SceneBuilder, WgpuProbe,
};

// Re-export structures
pub use tankview_structures::{Particle, Tank};

pub use assembler::{assemble_scene, AssembledScene, PARTICLE_NAME, TANK_NAME};
pub use controller::{RenderOnDemand, RenderSurface, Trigger};
pub use headless::{render_to_file, render_to_image};
pub use startup::{start, FallbackNotice, Startup};

/// Opens the viewer with default settings and blocks until it is closed.
///
/// Returns [`TankviewError::CapabilityUnavailable`] if no suitable graphics
/// adapter exists. The fallback message is logged before returning.
pub fn show() -> Result<()> {
    show_with_options(AppOptions::default())
}

/// Opens the viewer with the given settings.
pub fn show_with_options(options: AppOptions) -> Result<()> {
    // A logger may already be installed by the host program
    let _ = env_logger::try_init();
    log::info!("tankview starting: {}x{}", options.width, options.height);
    app::run_app(options)
}

/// Loads [`AppOptions`] from a JSON file and opens the viewer.
pub fn show_with_config_file(path: impl AsRef<Path>) -> Result<()> {
    let options = AppOptions::from_json_file(path)?;
    show_with_options(options)
}
