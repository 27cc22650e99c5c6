use gk_tensor::MatmulDims;

use crate::error::{HarnessError, Result};

/// Largest integer below which every f32 is exact.
const F32_EXACT_INT_LIMIT: u64 = 1 << 24;

/// Settings for a CPU/GPU matrix-multiply parity run.
#[derive(Debug, Clone, PartialEq)]
pub struct ParityConfig {
    /// Shape of the product.
    pub dims: MatmulDims,
    /// Exclusive upper bound of the integer values drawn for A and B.
    pub upper: u32,
    /// Seed for the input generator. `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
}

impl Default for ParityConfig {
    fn default() -> Self {
        ParityConfig {
            dims: MatmulDims::new(64, 32, 64),
            upper: 100,
            seed: None,
        }
    }
}

impl ParityConfig {
    pub fn validate(&self) -> Result<()> {
        if self.upper == 0 {
            return Err(HarnessError::InvalidConfig(
                "upper bound for random values must be > 0".to_string(),
            ));
        }
        self.dims
            .validate()
            .map_err(|err| HarnessError::InvalidConfig(format!("shape {}: {err}", self.dims)))
    }

    /// Whether every partial sum of the product is an integer small enough
    /// to be exact in f32, which is what makes bitwise comparison between
    /// backends meaningful regardless of how the device contracts `a*b+c`.
    pub fn exact_sums_guaranteed(&self) -> bool {
        let max_value = u64::from(self.upper.saturating_sub(1));
        max_value
            .saturating_mul(max_value)
            .saturating_mul(self.dims.k as u64)
            < F32_EXACT_INT_LIMIT
    }
}

/// Settings for the vector doubling demo.
#[derive(Debug, Clone, PartialEq)]
pub struct DoublerConfig {
    pub input: Vec<f32>,
}

impl Default for DoublerConfig {
    fn default() -> Self {
        DoublerConfig {
            input: vec![1.0, 3.0, 5.0],
        }
    }
}
