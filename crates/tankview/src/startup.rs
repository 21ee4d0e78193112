//! Capability check performed once before the scene is built.

use std::fmt;

use tankview_core::{Result, SceneOptions, TankviewError};
use tankview_render::CapabilityProbe;

use crate::assembler::{assemble_scene, AssembledScene};

/// Message shown instead of the scene when rendering is unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackNotice {
    message: String,
}

impl FallbackNotice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FallbackNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of [`start`].
pub enum Startup {
    /// Rendering is available and the scene was assembled.
    Scene(Box<AssembledScene>),
    /// Rendering is unavailable; nothing was assembled.
    Fallback(FallbackNotice),
}

impl Startup {
    /// Converts a fallback into [`TankviewError::CapabilityUnavailable`].
    pub fn into_result(self) -> Result<AssembledScene> {
        match self {
            Startup::Scene(assembled) => Ok(*assembled),
            Startup::Fallback(notice) => Err(TankviewError::CapabilityUnavailable(notice.message)),
        }
    }
}

/// Probes once and assembles the scene only if rendering is supported.
pub fn start(
    probe: &dyn CapabilityProbe,
    options: &SceneOptions,
    width: u32,
    height: u32,
) -> Startup {
    if probe.is_supported() {
        Startup::Scene(Box::new(assemble_scene(options, width, height)))
    } else {
        let notice = FallbackNotice::new(probe.unsupported_message());
        log::error!("{notice}");
        Startup::Fallback(notice)
    }
}
