use tracing_subscriber::EnvFilter;

/// Initializes `tracing` with structured output. `RUST_LOG` overrides the
/// default level when set; otherwise `--debug` selects `debug` over `info`.
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}
