//! Error types for starfield.
//!
//! The simulation core itself cannot fail. These types cover the edges
//! around it: loading configuration, presenting through the GPU, and
//! writing snapshots.

use thiserror::Error;

/// Errors that can occur during GPU initialization.
#[cfg(feature = "window")]
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reported no texture formats for this adapter.
    #[error("surface is not supported by the selected adapter")]
    UnsupportedSurface,
}

/// Errors raised while loading or validating a [`FieldConfig`](crate::FieldConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON for a field config.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside the range the simulation can honour.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur when rendering a headless snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Width or height was zero, so there is no surface to draw on.
    #[error("snapshot surface must be at least 1x1, got {width}x{height}")]
    EmptySurface {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Failed to encode or write the image.
    #[error("failed to write snapshot image: {0}")]
    Image(#[from] image::ImageError),
}

/// Top-level errors for the `starfield` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to create or run the event loop.
    #[cfg(feature = "window")]
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// The OS refused to create the window.
    #[cfg(feature = "window")]
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU presentation could not be set up.
    #[cfg(feature = "window")]
    #[error(transparent)]
    Gpu(#[from] GpuError),
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Snapshot rendering failed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
