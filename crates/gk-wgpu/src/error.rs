//! wgpu backend error types.

use gk_tensor::KernelError;
use thiserror::Error;

/// Errors produced by the wgpu backend.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("shader compilation failed: {0}")]
    ShaderCompilation(String),

    #[error("buffer mapping failed: {0}")]
    BufferMap(String),

    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error(transparent)]
    Kernel(#[from] KernelError),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, GpuError>;

impl From<GpuError> for KernelError {
    fn from(err: GpuError) -> Self {
        match err {
            GpuError::NoAdapter => {
                KernelError::DeviceUnavailable("no suitable GPU adapter found".to_string())
            }
            GpuError::DeviceRequest(e) => KernelError::DeviceUnavailable(e.to_string()),
            GpuError::ShaderCompilation(msg) => KernelError::ShaderCompilation(msg),
            GpuError::InvalidDimensions(msg) => KernelError::InvalidDimensions(msg),
            GpuError::BufferMap(msg) => KernelError::Backend(format!("buffer mapping failed: {msg}")),
            GpuError::Kernel(e) => e,
        }
    }
}
