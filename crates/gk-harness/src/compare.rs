/// Outcome of an element-wise exact comparison of two result vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// True when both vectors have the same length and every element is
    /// equal under `==`.
    pub equal: bool,
    /// Number of positions that differ, counting a length difference as
    /// one mismatch per missing element.
    pub mismatches: usize,
    /// First differing index, if any.
    pub first_mismatch: Option<usize>,
    /// Largest absolute difference over the overlapping positions.
    pub max_abs_diff: f32,
}

/// Compares `actual` against `expected` element by element with exact
/// float equality. NaN never equals anything, including NaN.
pub fn compare_exact(expected: &[f32], actual: &[f32]) -> Comparison {
    let mut mismatches = 0;
    let mut first_mismatch = None;
    let mut max_abs_diff = 0.0f32;

    for (i, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
        if e != a {
            mismatches += 1;
            first_mismatch.get_or_insert(i);
            max_abs_diff = max_abs_diff.max((e - a).abs());
        }
    }

    let overlap = expected.len().min(actual.len());
    let missing = expected.len().max(actual.len()) - overlap;
    if missing > 0 {
        mismatches += missing;
        first_mismatch.get_or_insert(overlap);
    }

    Comparison {
        equal: mismatches == 0,
        mismatches,
        first_mismatch,
        max_abs_diff,
    }
}
