use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// `RUST_LOG` wins over the configured filter; stdout stays reserved for the dashboard.
pub fn init(configured: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
