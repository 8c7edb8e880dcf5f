//! Diagnostics sink backed by `tracing`.

use crate::ports::diagnostics_port::{DiagnosticsPort, Level};

/// Forwards every event to the `tracing` macros with a `component` field.
/// The installed subscriber decides what is printed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticsPort for TracingDiagnostics {
    fn event(&self, level: Level, component: &str, message: &str) {
        match level {
            Level::Debug => tracing::debug!(component, "{}", message),
            Level::Info => tracing::info!(component, "{}", message),
            Level::Warn => tracing::warn!(component, "{}", message),
        }
    }
}

/// Installs the stderr fmt subscriber. `RUST_LOG` wins over the default
/// level, which is `debug` when `verbose` and `info` otherwise.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
