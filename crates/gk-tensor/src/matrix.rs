use crate::backend::ComputeBackend;
use crate::error::{KernelError, Result};
use crate::shape::{element_count, MatmulDims};

/// A dense, row-major matrix of f32 values.
///
/// Operations that require computation are dispatched to a `ComputeBackend`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a new matrix from row-major data.
    ///
    /// # Panics
    /// Panics if `data.len() != rows * cols` or the product overflows.
    pub fn new(data: Vec<f32>, rows: usize, cols: usize) -> Self {
        assert_eq!(
            Some(data.len()),
            rows.checked_mul(cols),
            "data length {} does not match shape [{}x{}]",
            data.len(),
            rows,
            cols
        );
        Matrix { data, rows, cols }
    }

    /// Create a matrix from row-major data, reporting a length mismatch or
    /// an overflowing shape instead of panicking.
    pub fn try_new(data: Vec<f32>, rows: usize, cols: usize) -> Result<Self> {
        let expected = element_count("rows*cols", rows, cols)?;
        if data.len() != expected {
            return Err(KernelError::LengthMismatch {
                what: "matrix data",
                expected,
                got: data.len(),
            });
        }
        Ok(Matrix { data, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the underlying row-major data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Matrix multiplication using the given backend.
    ///
    /// self is [m, k], other is [k, n], result is [m, n].
    pub fn matmul(&self, other: &Matrix, backend: &dyn ComputeBackend) -> Result<Matrix> {
        let dims = self.matmul_dims(other)?;
        let result = backend.matmul(&self.data, &other.data, dims.m, dims.k, dims.n)?;
        Matrix::try_new(result, dims.m, dims.n)
    }

    /// The product shape of `self @ other`, or `MatmulMismatch` if the inner
    /// dimensions disagree.
    pub fn matmul_dims(&self, other: &Matrix) -> Result<MatmulDims> {
        if self.cols != other.rows {
            return Err(KernelError::MatmulMismatch {
                m: self.rows,
                k: self.cols,
                k2: other.rows,
                n: other.cols,
            });
        }
        Ok(MatmulDims::new(self.rows, self.cols, other.cols))
    }
}
