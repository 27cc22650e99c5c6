pub mod matmul;
pub mod unary;

use crate::backend::ComputeBackend;
use crate::error::Result;
use crate::shape::MatmulDims;

pub use matmul::reference_matmul;

/// Pure-Rust CPU compute backend.
///
/// Implements all operations with straightforward loops optimized for
/// correctness rather than peak performance. Serves as the reference the GPU
/// results are checked against.
#[derive(Debug, Clone)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        CpuBackend
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeBackend for CpuBackend {
    fn name(&self) -> &str {
        "cpu"
    }

    fn matmul(&self, a: &[f32], b: &[f32], m: usize, k: usize, n: usize) -> Result<Vec<f32>> {
        let dims = MatmulDims::new(m, k, n);
        dims.check(a.len(), b.len())?;
        Ok(reference_matmul(a, b, dims))
    }

    fn double(&self, data: &[f32]) -> Result<Vec<f32>> {
        Ok(unary::double(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KernelError;

    fn backend() -> CpuBackend {
        CpuBackend::new()
    }

    #[test]
    fn test_matmul_identity() {
        let b = backend();
        // 2x2 identity @ [1,2;3,4]
        let a = vec![1.0, 0.0, 0.0, 1.0];
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let c = b.matmul(&a, &x, 2, 2, 2).unwrap();
        assert_eq!(c, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_matmul_basic() {
        let b = backend();
        // [1,2;3,4] @ [5,6;7,8] = [19,22;43,50]
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let x = vec![5.0, 6.0, 7.0, 8.0];
        let c = b.matmul(&a, &x, 2, 2, 2).unwrap();
        assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_matmul_rectangular() {
        let b = backend();
        // [1,2,3] @ [1;2;3] = [14]
        let c = b.matmul(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 1, 3, 1).unwrap();
        assert_eq!(c, vec![14.0]);

        // [1;2] @ [3,4] = [3,4;6,8]
        let c = b.matmul(&[1.0, 2.0], &[3.0, 4.0], 2, 1, 2).unwrap();
        assert_eq!(c, vec![3.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_matmul_empty_inner_dim_is_zero() {
        let b = backend();
        let c = b.matmul(&[], &[], 3, 0, 2).unwrap();
        assert_eq!(c, vec![0.0; 6]);
    }

    #[test]
    fn test_matmul_empty_output() {
        let b = backend();
        let c = b.matmul(&[], &[1.0, 2.0], 0, 1, 2).unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn test_matmul_length_mismatch() {
        let b = backend();
        let err = b.matmul(&[1.0, 2.0, 3.0], &[1.0], 2, 2, 1).unwrap_err();
        assert!(matches!(err, KernelError::LengthMismatch { expected: 4, got: 3, .. }));
    }

    #[test]
    fn test_matmul_overflowing_shape_is_rejected() {
        let b = backend();
        let err = b.matmul(&[], &[], usize::MAX, 0, 2).unwrap_err();
        assert!(matches!(err, KernelError::InvalidDimensions(_)), "got {err:?}");
    }

    #[test]
    fn test_double() {
        let b = backend();
        let r = b.double(&[1.0, 3.0, 5.0]).unwrap();
        assert_eq!(r, vec![2.0, 6.0, 10.0]);
    }

    #[test]
    fn test_double_empty() {
        let b = backend();
        assert!(b.double(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(backend().name(), "cpu");
    }
}
