use crate::shape::MatmulDims;

/// Naive triple-loop matrix multiply over row-major slices.
///
/// Each output element starts at `0.0` and accumulates `a[i*k+t] * b[t*n+j]`
/// for `t` in ascending order. Callers must have run [`MatmulDims::check`]
/// on the operand lengths.
pub fn reference_matmul(a: &[f32], b: &[f32], dims: MatmulDims) -> Vec<f32> {
    let MatmulDims { m, k, n } = dims;
    let mut c = vec![0.0f32; m * n];
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0f32;
            for t in 0..k {
                sum += a[i * k + t] * b[t * n + j];
            }
            c[i * n + j] = sum;
        }
    }
    c
}
