//! Multiplies random integer matrices on the CPU and the GPU, times both and
//! checks that the results are identical.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gk_harness::logging::init_logging;
use gk_harness::timing::{measure_time, millis};
use gk_harness::{run_parity, ParityConfig};
use gk_tensor::{ComputeBackend, CpuBackend, KernelError, MatmulDims};
use gk_wgpu::WgpuBackend;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "matmul_parity",
    about = "Compare a GPU matrix multiply against the CPU reference"
)]
struct Args {
    /// Rows of A and of the result.
    #[arg(long, default_value_t = 64)]
    m: usize,

    /// Columns of A, rows of B.
    #[arg(long, default_value_t = 32)]
    k: usize,

    /// Columns of B and of the result.
    #[arg(long, default_value_t = 64)]
    n: usize,

    /// Matrix entries are integers drawn from [0, upper).
    #[arg(long, default_value_t = 100)]
    upper: u32,

    /// Seed for the matrix generator; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<&Args> for ParityConfig {
    fn from(args: &Args) -> Self {
        ParityConfig {
            dims: MatmulDims::new(args.m, args.k, args.n),
            upper: args.upper,
            seed: args.seed,
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(&args.log_level);
    let config = ParityConfig::from(&args);

    let (gpu, setup) = measure_time(|| WgpuBackend::new_blocking().map_err(KernelError::from));
    if gpu.is_ok() {
        info!(setup_ms = millis(setup), "wgpu backend acquired");
    }
    let candidate = gpu
        .as_ref()
        .map(|backend| backend as &dyn ComputeBackend)
        .map_err(Clone::clone);

    let cpu = CpuBackend::new();
    let report = run_parity(&config, &cpu, candidate).context("parity run failed")?;

    println!("{report}");
    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
