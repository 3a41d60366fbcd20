use tracing_subscriber::EnvFilter;

/// Installs the process-wide console subscriber used for verbose echoes.
///
/// Honors `RUST_LOG`; defaults to `info`. Safe to call more than once: only
/// the first call installs anything.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Err only means a global subscriber already exists.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
