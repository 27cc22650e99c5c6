use gk_tensor::{ComputeBackend, KernelError};
use tracing::{info, warn};

use crate::config::DoublerConfig;
use crate::error::Result;
use crate::timing::{measure_time, millis};

/// Input and output of one doubling run.
#[derive(Debug, Clone, PartialEq)]
pub struct DoublerReport {
    pub backend: String,
    pub input: Vec<f32>,
    pub output: Vec<f32>,
}

/// Doubles `config.input` on `backend`.
pub fn run_doubler(config: &DoublerConfig, backend: &dyn ComputeBackend) -> Result<DoublerReport> {
    let (output, elapsed) = measure_time(|| backend.double(&config.input));
    let output = output?;
    info!(
        backend = backend.name(),
        len = output.len(),
        elapsed_ms = millis(elapsed),
        "doubling done"
    );
    Ok(DoublerReport {
        backend: backend.name().to_string(),
        input: config.input.clone(),
        output,
    })
}

/// Doubles `config.input` on `backend` if one could be acquired.
///
/// An unavailable device is not an error: it is logged and `Ok(None)` comes
/// back without anything being computed. Any other acquisition failure is
/// returned as is.
pub fn run_doubler_if_available(
    config: &DoublerConfig,
    backend: std::result::Result<&dyn ComputeBackend, KernelError>,
) -> Result<Option<DoublerReport>> {
    match backend {
        Ok(backend) => run_doubler(config, backend).map(Some),
        Err(KernelError::DeviceUnavailable(reason)) => {
            warn!(%reason, "no compute device available, nothing to do");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarnessError;
    use gk_tensor::CpuBackend;

    #[test]
    fn test_default_input() {
        let report = run_doubler(&DoublerConfig::default(), &CpuBackend::new()).unwrap();
        assert_eq!(report.input, vec![1.0, 3.0, 5.0]);
        assert_eq!(report.output, vec![2.0, 6.0, 10.0]);
        assert_eq!(report.backend, "cpu");
    }

    #[test]
    fn test_unavailable_device_skips_the_run() {
        let config = DoublerConfig::default();
        let report = run_doubler_if_available(
            &config,
            Err(KernelError::DeviceUnavailable("device request refused".into())),
        )
        .unwrap();
        assert!(report.is_none());
    }

    #[test]
    fn test_other_setup_errors_are_returned() {
        let config = DoublerConfig::default();
        let err = run_doubler_if_available(
            &config,
            Err(KernelError::ShaderCompilation("double: parse error".into())),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            HarnessError::Kernel(KernelError::ShaderCompilation(_))
        ));
    }

    #[test]
    fn test_available_backend_runs() {
        let cpu = CpuBackend::new();
        let report = run_doubler_if_available(&DoublerConfig::default(), Ok(&cpu))
            .unwrap()
            .unwrap();
        assert_eq!(report.output, vec![2.0, 6.0, 10.0]);
    }
}
