use std::fmt::Debug;

use crate::error::Result;

/// Trait for pluggable compute backends (CPU reference, wgpu, ...).
///
/// All operations work on f32 slices. Data is passed in as slices and
/// returned as owned vectors; a backend never keeps state between calls.
pub trait ComputeBackend: Send + Sync + Debug {
    /// Returns the name of this backend (e.g., "cpu", "wgpu").
    fn name(&self) -> &str;

    /// Matrix multiplication: C = A @ B.
    ///
    /// - `a`: row-major data of shape [m, k]
    /// - `b`: row-major data of shape [k, n]
    /// - Returns: row-major data of shape [m, n]
    ///
    /// Every output element is accumulated from `0.0` over `t = 0..k` in
    /// ascending order, so two backends fed integer-valued inputs agree
    /// exactly as long as no partial sum leaves the exactly representable
    /// range of f32.
    fn matmul(&self, a: &[f32], b: &[f32], m: usize, k: usize, n: usize) -> Result<Vec<f32>>;

    /// Element-wise doubling: result[i] = data[i] * 2.0.
    fn double(&self, data: &[f32]) -> Result<Vec<f32>>;
}
