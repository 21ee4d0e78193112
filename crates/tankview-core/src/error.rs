//! Error types for tankview.

use thiserror::Error;

/// The main error type for tankview operations.
#[derive(Error, Debug)]
pub enum TankviewError {
    /// The graphics capability the scene needs is missing on this host.
    #[error("rendering capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// Rendering error.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for tankview operations.
pub type Result<T> = std::result::Result<T, TankviewError>;
