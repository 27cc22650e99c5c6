//! `gk-harness` - drives the CPU reference and the wgpu backend side by side.
//!
//! - [`run_parity`] multiplies random integer matrices on two backends,
//!   times both and compares the results exactly
//! - [`run_doubler`] runs the element-wise doubling kernel
//!
//! The `double` and `matmul_parity` binaries are thin wrappers around these.

pub mod compare;
pub mod config;
pub mod doubler;
pub mod error;
pub mod logging;
pub mod parity;
pub mod random;
pub mod timing;

pub use compare::{compare_exact, Comparison};
pub use config::{DoublerConfig, ParityConfig};
pub use doubler::{run_doubler, run_doubler_if_available, DoublerReport};
pub use error::{HarnessError, Result};
pub use parity::{run_parity, CandidateOutcome, ParityReport};
pub use random::{random_matrix, rng_from_seed};
pub use timing::measure_time;
