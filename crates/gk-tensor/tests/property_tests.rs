//! Property-based tests for the CPU reference kernels.
//!
//! Key invariants:
//! - The reference multiply is deterministic
//! - Multiplying by the identity returns the other operand unchanged
//! - An empty inner dimension yields an all-zero output
//! - Doubling multiplies every element by exactly two

use gk_tensor::{ComputeBackend, CpuBackend, Matrix};
use proptest::prelude::*;

/// Integer-valued f32s in [0, 100), the range the parity harness draws from.
fn small_int() -> impl Strategy<Value = f32> {
    (0u32..100).prop_map(|v| v as f32)
}

fn operands() -> impl Strategy<Value = (usize, usize, usize, Vec<f32>, Vec<f32>)> {
    (0usize..12, 0usize..12, 0usize..12).prop_flat_map(|(m, k, n)| {
        (
            Just(m),
            Just(k),
            Just(n),
            prop::collection::vec(small_int(), m * k),
            prop::collection::vec(small_int(), k * n),
        )
    })
}

fn identity(size: usize) -> Vec<f32> {
    let mut data = vec![0.0; size * size];
    for i in 0..size {
        data[i * size + i] = 1.0;
    }
    data
}

proptest! {
    /// Repeated calls with identical inputs produce identical outputs.
    #[test]
    fn matmul_is_deterministic((m, k, n, a, b) in operands()) {
        let cpu = CpuBackend::new();
        let first = cpu.matmul(&a, &b, m, k, n).unwrap();
        let second = cpu.matmul(&a, &b, m, k, n).unwrap();
        prop_assert_eq!(first.len(), m * n);
        prop_assert_eq!(first, second);
    }

    /// A @ I == A and I @ A == A, bit for bit.
    #[test]
    fn identity_is_neutral((m, k, _n, a, _b) in operands()) {
        let cpu = CpuBackend::new();
        let right = cpu.matmul(&a, &identity(k), m, k, k).unwrap();
        prop_assert_eq!(&right, &a);
        let left = cpu.matmul(&identity(m), &a, m, m, k).unwrap();
        prop_assert_eq!(&left, &a);
    }

    /// K = 0 is an empty accumulation: every output element is zero.
    #[test]
    fn empty_inner_dimension_is_zero(m in 0usize..16, n in 0usize..16) {
        let cpu = CpuBackend::new();
        let out = cpu.matmul(&[], &[], m, 0, n).unwrap();
        prop_assert_eq!(out, vec![0.0f32; m * n]);
    }

    /// output[i] == 2 * input[i] for finite inputs.
    #[test]
    fn double_scales_by_two(input in prop::collection::vec(-1.0e6f32..1.0e6, 0..64)) {
        let cpu = CpuBackend::new();
        let out = cpu.double(&input).unwrap();
        prop_assert_eq!(out.len(), input.len());
        for (o, i) in out.iter().zip(input.iter()) {
            prop_assert_eq!(*o, 2.0 * *i);
        }
    }

    /// The Matrix front end agrees with the flat backend call.
    #[test]
    fn matrix_matmul_matches_backend((m, k, n, a, b) in operands()) {
        let cpu = CpuBackend::new();
        let flat = cpu.matmul(&a, &b, m, k, n).unwrap();
        let lhs = Matrix::new(a, m, k);
        let rhs = Matrix::new(b, k, n);
        let product = lhs.matmul(&rhs, &cpu).unwrap();
        prop_assert_eq!((product.rows(), product.cols()), (m, n));
        prop_assert_eq!(product.data(), flat.as_slice());
    }
}
