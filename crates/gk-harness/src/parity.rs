use std::fmt;
use std::time::Duration;

use gk_tensor::{ComputeBackend, KernelError, MatmulDims};
use tracing::{info, warn};

use crate::compare::{compare_exact, Comparison};
use crate::config::ParityConfig;
use crate::error::Result;
use crate::random::{random_matrix, rng_from_seed};
use crate::timing::{measure_time, millis};

/// What happened on the candidate side of a parity run.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    /// No compute device could be acquired; nothing was computed.
    Unavailable(String),
    /// The candidate was reachable but the multiply failed.
    Failed(KernelError),
    /// The multiply ran to completion.
    Completed {
        elapsed: Duration,
        comparison: Comparison,
    },
}

/// Result of multiplying the same operands on a reference and a candidate
/// backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ParityReport {
    pub dims: MatmulDims,
    pub seed: Option<u64>,
    pub reference: String,
    pub reference_elapsed: Duration,
    pub candidate: Option<String>,
    pub outcome: CandidateOutcome,
}

impl ParityReport {
    /// True only when the candidate completed and matched exactly.
    pub fn passed(&self) -> bool {
        matches!(
            &self.outcome,
            CandidateOutcome::Completed { comparison, .. } if comparison.equal
        )
    }
}

impl fmt::Display for ParityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "shape: {}", self.dims)?;
        writeln!(
            f,
            "{}: {:.3} ms",
            self.reference,
            millis(self.reference_elapsed)
        )?;
        let candidate = self.candidate.as_deref().unwrap_or("candidate");
        match &self.outcome {
            CandidateOutcome::Unavailable(reason) => {
                write!(f, "{candidate}: unavailable ({reason})")
            }
            CandidateOutcome::Failed(err) => write!(f, "{candidate}: failed ({err})"),
            CandidateOutcome::Completed {
                elapsed,
                comparison,
            } => {
                writeln!(f, "{candidate}: {:.3} ms", millis(*elapsed))?;
                write!(f, "{} == {}: {}", self.reference, candidate, comparison.equal)?;
                if !comparison.equal {
                    write!(
                        f,
                        " ({} mismatches, first at {:?}, max |diff| {})",
                        comparison.mismatches, comparison.first_mismatch, comparison.max_abs_diff
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Generates random operands per `config`, multiplies them on `reference`
/// and, when one could be acquired, on `candidate`, then compares the two
/// outputs for exact equality.
///
/// A failing reference is an error. Anything that goes wrong on the
/// candidate side ends up in the report's [`CandidateOutcome`]; nothing is
/// retried.
pub fn run_parity(
    config: &ParityConfig,
    reference: &dyn ComputeBackend,
    candidate: std::result::Result<&dyn ComputeBackend, KernelError>,
) -> Result<ParityReport> {
    config.validate()?;
    let dims = config.dims;
    if !config.exact_sums_guaranteed() {
        warn!(
            %dims,
            upper = config.upper,
            "partial sums may exceed 2^24, exact equality is not guaranteed"
        );
    }

    let mut rng = rng_from_seed(config.seed);
    let a = random_matrix(dims.m, dims.k, config.upper, &mut rng)?;
    let b = random_matrix(dims.k, dims.n, config.upper, &mut rng)?;

    let (expected, reference_elapsed) = measure_time(|| a.matmul(&b, reference));
    let expected = expected?;
    info!(
        backend = reference.name(),
        elapsed_ms = millis(reference_elapsed),
        "reference multiply done"
    );

    let (candidate_name, outcome) = match candidate {
        Err(err) => {
            warn!(%err, "no candidate backend, skipping comparison");
            (None, unavailable_or_failed(err))
        }
        Ok(backend) => {
            let (result, elapsed) = measure_time(|| a.matmul(&b, backend));
            let outcome = match result {
                Ok(actual) => {
                    let comparison = compare_exact(expected.data(), actual.data());
                    info!(
                        backend = backend.name(),
                        elapsed_ms = millis(elapsed),
                        equal = comparison.equal,
                        "candidate multiply done"
                    );
                    if !comparison.equal {
                        warn!(
                            mismatches = comparison.mismatches,
                            first = ?comparison.first_mismatch,
                            max_abs_diff = comparison.max_abs_diff,
                            "candidate disagrees with reference"
                        );
                    }
                    CandidateOutcome::Completed {
                        elapsed,
                        comparison,
                    }
                }
                Err(err) => {
                    warn!(backend = backend.name(), %err, "candidate multiply failed");
                    unavailable_or_failed(err)
                }
            };
            (Some(backend.name().to_string()), outcome)
        }
    };

    Ok(ParityReport {
        dims,
        seed: config.seed,
        reference: reference.name().to_string(),
        reference_elapsed,
        candidate: candidate_name,
        outcome,
    })
}

fn unavailable_or_failed(err: KernelError) -> CandidateOutcome {
    match err {
        KernelError::DeviceUnavailable(reason) => CandidateOutcome::Unavailable(reason),
        other => CandidateOutcome::Failed(other),
    }
}
