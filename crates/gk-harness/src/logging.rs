use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber for a binary.
///
/// `RUST_LOG` wins when set; otherwise `level` is used as the filter.
/// Log lines go to stderr so stdout carries only the run's results.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
