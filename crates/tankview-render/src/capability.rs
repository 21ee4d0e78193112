//! Rendering capability detection.

/// Answers whether the host can render at all.
pub trait CapabilityProbe {
    /// Returns true if a rendering context can be created.
    fn is_supported(&self) -> bool;

    /// Human-readable explanation shown when rendering is unavailable.
    fn unsupported_message(&self) -> String;
}

/// Probes for a wgpu adapter on any backend.
#[derive(Debug, Clone)]
pub struct WgpuProbe {
    backends: wgpu::Backends,
}

impl Default for WgpuProbe {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
        }
    }
}

impl WgpuProbe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the probe to the given backends.
    #[must_use]
    pub fn with_backends(backends: wgpu::Backends) -> Self {
        Self { backends }
    }

    /// Requests an adapter and returns its description if one exists.
    pub async fn adapter_info(&self) -> Option<wgpu::AdapterInfo> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: self.backends,
            ..wgpu::InstanceDescriptor::default()
        });
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions::default())
            .await
            .ok()?;
        Some(adapter.get_info())
    }
}

impl CapabilityProbe for WgpuProbe {
    fn is_supported(&self) -> bool {
        match pollster::block_on(self.adapter_info()) {
            Some(info) => {
                log::info!("graphics adapter: {} ({:?})", info.name, info.backend);
                true
            }
            None => {
                log::warn!("no graphics adapter available");
                false
            }
        }
    }

    fn unsupported_message(&self) -> String {
        "Your graphics card does not seem to support the required rendering features \
         (no compatible GPU adapter was found)."
            .to_string()
    }
}
