use gk_tensor::{KernelError, Matrix, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG when `seed` is given, entropy-seeded otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// A `rows`×`cols` matrix of integer values drawn uniformly from `[0, upper)`.
///
/// Fails with `InvalidDimensions` when `rows * cols` overflows.
///
/// # Panics
/// Panics if `upper == 0`.
pub fn random_matrix<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    upper: u32,
    rng: &mut R,
) -> Result<Matrix> {
    let len = rows.checked_mul(cols).ok_or_else(|| {
        KernelError::InvalidDimensions(format!("random matrix [{rows}x{cols}] overflows usize"))
    })?;
    let data = (0..len).map(|_| rng.gen_range(0..upper) as f32).collect();
    Matrix::try_new(data, rows, cols)
}
