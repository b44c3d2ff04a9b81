use crate::args::LogLevel;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber, writing to stderr so stdout carries only command output.
///
/// `--verbose` wins over `RUST_LOG`; without either the filter is `info`.
pub fn init_tracing(verbose: Option<LogLevel>) {
    let env_filter = match verbose {
        Some(level) => EnvFilter::default().add_directive(tracing::Level::from(level).into()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
