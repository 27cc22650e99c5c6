//! `gk-tensor` - dense matrices and pluggable compute backends for gpu-kernels.
//!
//! This crate provides:
//! - A row-major `Matrix` type and the `MatmulDims` product shape
//! - A `ComputeBackend` trait for pluggable compute (CPU, wgpu)
//! - A reference `CpuBackend` implementation
//! - The shared `KernelError` type

pub mod backend;
pub mod cpu;
pub mod error;
pub mod matrix;
pub mod shape;

// Re-export primary types at the crate root for convenience.
pub use backend::ComputeBackend;
pub use cpu::CpuBackend;
pub use error::{KernelError, Result};
pub use matrix::Matrix;
pub use shape::MatmulDims;
