use crate::error::{KernelError, Result};
use std::fmt;

/// The (M, K, N) shape of a matrix product.
///
/// The left operand is M×K, the right operand is K×N and the output is M×N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatmulDims {
    pub m: usize,
    pub k: usize,
    pub n: usize,
}

impl MatmulDims {
    pub fn new(m: usize, k: usize, n: usize) -> Self {
        MatmulDims { m, k, n }
    }

    /// Number of elements in the left operand.
    pub fn lhs_len(&self) -> Result<usize> {
        element_count("m*k", self.m, self.k)
    }

    /// Number of elements in the right operand.
    pub fn rhs_len(&self) -> Result<usize> {
        element_count("k*n", self.k, self.n)
    }

    /// Number of elements in the output.
    pub fn out_len(&self) -> Result<usize> {
        element_count("m*n", self.m, self.n)
    }

    /// Rejects shapes whose operand or output sizes overflow `usize`.
    pub fn validate(&self) -> Result<()> {
        self.lhs_len()?;
        self.rhs_len()?;
        self.out_len()?;
        Ok(())
    }

    /// Checks flat operand lengths against this shape.
    ///
    /// On success all three element counts are known to fit in `usize`.
    pub fn check(&self, a_len: usize, b_len: usize) -> Result<()> {
        self.validate()?;
        let lhs = self.lhs_len()?;
        if a_len != lhs {
            return Err(KernelError::LengthMismatch {
                what: "matmul lhs (m*k)",
                expected: lhs,
                got: a_len,
            });
        }
        let rhs = self.rhs_len()?;
        if b_len != rhs {
            return Err(KernelError::LengthMismatch {
                what: "matmul rhs (k*n)",
                expected: rhs,
                got: b_len,
            });
        }
        Ok(())
    }

    /// Number of `tile`-sized blocks needed to cover the output grid, as
    /// (row blocks, column blocks). Partial blocks at the edges round up.
    ///
    /// # Panics
    /// Panics if `tile == 0`.
    pub fn tiles(&self, tile: usize) -> (usize, usize) {
        assert!(tile > 0, "tile size must be non-zero");
        (self.m.div_ceil(tile), self.n.div_ceil(tile))
    }
}

/// `rows * cols`, or `InvalidDimensions` when the product overflows.
pub(crate) fn element_count(what: &str, rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or_else(|| {
        KernelError::InvalidDimensions(format!("{what} = {rows} * {cols} overflows usize"))
    })
}

impl fmt::Display for MatmulDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}x{}] @ [{}x{}]", self.m, self.k, self.k, self.n)
    }
}

impl From<(usize, usize, usize)> for MatmulDims {
    fn from((m, k, n): (usize, usize, usize)) -> Self {
        MatmulDims::new(m, k, n)
    }
}
