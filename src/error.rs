//! Error types for the canvas.
//!
//! The canvas core is synchronous and local, so very little can fail; the
//! windowed frontend adds the usual event-loop and GPU failure modes.

use std::fmt;

/// Errors from mounting or running a canvas.
#[derive(Debug)]
pub enum CanvasError {
    /// The canvas was mounted with an empty label set.
    NoLabels,
    /// Failed to create the event loop.
    #[cfg(feature = "window")]
    EventLoop(winit::error::EventLoopError),
    /// Failed to create the window.
    #[cfg(feature = "window")]
    Window(winit::error::OsError),
    /// GPU initialization failed.
    #[cfg(feature = "window")]
    Gpu(GpuError),
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasError::NoLabels => {
                write!(f, "No labels provided. Use .with_labels() to set at least one.")
            }
            #[cfg(feature = "window")]
            CanvasError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            #[cfg(feature = "window")]
            CanvasError::Window(e) => write!(f, "Failed to create window: {}", e),
            #[cfg(feature = "window")]
            CanvasError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for CanvasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CanvasError::NoLabels => None,
            #[cfg(feature = "window")]
            CanvasError::EventLoop(e) => Some(e),
            #[cfg(feature = "window")]
            CanvasError::Window(e) => Some(e),
            #[cfg(feature = "window")]
            CanvasError::Gpu(e) => Some(e),
        }
    }
}

#[cfg(feature = "window")]
impl From<winit::error::EventLoopError> for CanvasError {
    fn from(e: winit::error::EventLoopError) -> Self {
        CanvasError::EventLoop(e)
    }
}

#[cfg(feature = "window")]
impl From<winit::error::OsError> for CanvasError {
    fn from(e: winit::error::OsError) -> Self {
        CanvasError::Window(e)
    }
}

#[cfg(feature = "window")]
impl From<GpuError> for CanvasError {
    fn from(e: GpuError) -> Self {
        CanvasError::Gpu(e)
    }
}

/// Errors that can occur while bringing up the GPU surface.
#[cfg(feature = "window")]
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

#[cfg(feature = "window")]
impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(
                f,
                "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."
            ),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

#[cfg(feature = "window")]
impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

#[cfg(feature = "window")]
impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

#[cfg(feature = "window")]
impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}
