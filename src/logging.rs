use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. "gl_triangle=debug". Falls back to
    /// `RUST_LOG`, then to `info`.
    pub env_filter: Option<String>,
}

impl LoggingConfig {
    fn filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(directives) => EnvFilter::new(directives),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        }
    }
}

/// Installs the global stdout subscriber. Later calls are no-ops.
pub fn init_logging(config: &LoggingConfig) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logging initialized.");
    }
}
