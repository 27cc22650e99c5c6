//! Doubles a small vector on the GPU and prints input and result.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gk_harness::logging::init_logging;
use gk_harness::{run_doubler_if_available, DoublerConfig};
use gk_tensor::{ComputeBackend, KernelError};
use gk_wgpu::WgpuBackend;

#[derive(Parser, Debug)]
#[command(name = "double", about = "Double every element of a vector on the GPU")]
struct Args {
    /// Values to double.
    #[arg(allow_negative_numbers = true, default_values_t = [1.0f32, 3.0, 5.0])]
    values: Vec<f32>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(&args.log_level);

    // NoAdapter and a refused device request both map to DeviceUnavailable.
    let gpu = WgpuBackend::new_blocking().map_err(KernelError::from);
    let backend = gpu
        .as_ref()
        .map(|backend| backend as &dyn ComputeBackend)
        .map_err(Clone::clone);

    let config = DoublerConfig { input: args.values };
    let report = match run_doubler_if_available(&config, backend).context("doubling failed")? {
        Some(report) => report,
        None => return Ok(ExitCode::SUCCESS),
    };

    println!("input {:?}", report.input);
    println!("result {:?}", report.output);
    Ok(ExitCode::SUCCESS)
}
