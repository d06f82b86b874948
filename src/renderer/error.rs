//! Renderer startup failures

use std::fmt;

/// Why the GPU backend could not be brought up
///
/// All of these are fatal: the game does not start without a renderer.
#[derive(Debug)]
pub enum RenderInitError {
    /// No `<canvas id="canvas">` in the page
    MissingCanvas,
    Surface(wgpu::CreateSurfaceError),
    Adapter(wgpu::RequestAdapterError),
    Device(wgpu::RequestDeviceError),
    /// The surface reports no usable texture format
    NoSurfaceFormat,
}

impl fmt::Display for RenderInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderInitError::MissingCanvas => write!(f, "no canvas element to draw into"),
            RenderInitError::Surface(e) => write!(f, "failed to create surface: {}", e),
            RenderInitError::Adapter(e) => write!(f, "no suitable GPU adapter: {}", e),
            RenderInitError::Device(e) => write!(f, "failed to create device: {}", e),
            RenderInitError::NoSurfaceFormat => write!(f, "surface has no supported formats"),
        }
    }
}

impl std::error::Error for RenderInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderInitError::Surface(e) => Some(e),
            RenderInitError::Adapter(e) => Some(e),
            RenderInitError::Device(e) => Some(e),
            RenderInitError::MissingCanvas | RenderInitError::NoSurfaceFormat => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for RenderInitError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        RenderInitError::Surface(e)
    }
}

impl From<wgpu::RequestAdapterError> for RenderInitError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        RenderInitError::Adapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for RenderInitError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RenderInitError::Device(e)
    }
}
